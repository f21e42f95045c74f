//! Uniform tensor-product mesh of the square $[a,b]^2$.
//!
//! Grid arrays are `(M+1) x (M+1)` matrices with mesh-grid orientation:
//! the row index selects the y-coordinate and the column index selects
//! the x-coordinate, so `xs[(i, j)] = x_j` and `ys[(i, j)] = x_i`.
//!
//! Interior unknowns are numbered with the x-index as the slow index,
//! interior node `(i, j)` gets `(j-1)*(M-1) + (i-1)`.
//! This is exactly the column-major flattening of the interior block.
//! [`flatten_interior`] and [`unflatten_interior`] are the only
//! places this numbering is realized.

use crate::{config::PoissonConfig, error::Result};

#[derive(Debug, Clone)]
pub struct CartesianMesh {
  domain_min: f64,
  domain_max: f64,
  nintervals: usize,
  xs: na::DMatrix<f64>,
  ys: na::DMatrix<f64>,
}

impl CartesianMesh {
  pub fn new(domain_min: f64, domain_max: f64, nintervals: usize) -> Result<Self> {
    PoissonConfig::new(nintervals, domain_min, domain_max).validate()?;

    let axis = partition(domain_min, domain_max, nintervals);
    let nnodes = nintervals + 1;
    let xs = na::DMatrix::from_fn(nnodes, nnodes, |_, j| axis[j]);
    let ys = na::DMatrix::from_fn(nnodes, nnodes, |i, _| axis[i]);

    Ok(Self {
      domain_min,
      domain_max,
      nintervals,
      xs,
      ys,
    })
  }

  pub fn from_config(config: &PoissonConfig) -> Result<Self> {
    Self::new(config.domain_min, config.domain_max, config.nintervals)
  }

  pub fn nintervals(&self) -> usize {
    self.nintervals
  }
  pub fn nnodes_axis(&self) -> usize {
    self.nintervals + 1
  }
  pub fn ninterior_axis(&self) -> usize {
    self.nintervals - 1
  }
  /// Number of interior unknowns $(M-1)^2$.
  pub fn ninterior(&self) -> usize {
    self.ninterior_axis().pow(2)
  }
  pub fn domain_min(&self) -> f64 {
    self.domain_min
  }
  pub fn domain_max(&self) -> f64 {
    self.domain_max
  }
  pub fn mesh_width(&self) -> f64 {
    (self.domain_max - self.domain_min) / self.nintervals as f64
  }

  /// X-coordinates of all nodes.
  pub fn xs(&self) -> &na::DMatrix<f64> {
    &self.xs
  }
  /// Y-coordinates of all nodes.
  pub fn ys(&self) -> &na::DMatrix<f64> {
    &self.ys
  }

  /// Coordinates `(x, y)` of node `(i, j)`.
  pub fn node_pos(&self, i: usize, j: usize) -> (f64, f64) {
    (self.xs[(i, j)], self.ys[(i, j)])
  }

  pub fn is_boundary_node(&self, i: usize, j: usize) -> bool {
    let m = self.nintervals;
    i == 0 || j == 0 || i == m || j == m
  }

  /// Evaluates `f(x, y)` on every node.
  pub fn map_nodes<F>(&self, f: F) -> na::DMatrix<f64>
  where
    F: Fn(f64, f64) -> f64,
  {
    self.xs.zip_map(&self.ys, f)
  }
}

/// Uniform partition of `[min, max]` into `nintervals` intervals.
///
/// The last point is exactly `max`.
pub fn partition(min: f64, max: f64, nintervals: usize) -> Vec<f64> {
  let step = (max - min) / nintervals as f64;
  let mut points: Vec<f64> = (0..=nintervals).map(|k| k as f64 * step + min).collect();
  if let Some(last) = points.last_mut() {
    *last = max;
  }
  points
}

/// Linear index of interior node `(i, j)`, both in `1..M`.
pub fn interior_index(i: usize, j: usize, nintervals: usize) -> usize {
  debug_assert!((1..nintervals).contains(&i) && (1..nintervals).contains(&j));
  (j - 1) * (nintervals - 1) + (i - 1)
}

/// Interior node `(i, j)` of a linear interior index.
pub fn interior_node(k: usize, nintervals: usize) -> (usize, usize) {
  let n = nintervals - 1;
  (k % n + 1, k / n + 1)
}

/// Flattens the interior block of a full `(M+1) x (M+1)` grid array
/// into a vector of length $(M-1)^2$.
pub fn flatten_interior(grid: &na::DMatrix<f64>) -> na::DVector<f64> {
  assert!(grid.is_square() && grid.nrows() >= 3);
  let n = grid.nrows() - 2;
  let interior = grid.view((1, 1), (n, n));
  na::DVector::from_iterator(n * n, interior.iter().copied())
}

/// Inverse of [`flatten_interior`], returning the `(M-1) x (M-1)` block.
pub fn unflatten_interior(values: &na::DVector<f64>, nintervals: usize) -> na::DMatrix<f64> {
  let n = nintervals - 1;
  assert_eq!(values.len(), n * n);
  na::DMatrix::from_column_slice(n, n, values.as_slice())
}
