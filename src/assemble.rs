//! Assembly of the five-point finite-difference system $A u = h^2 f + g$.
//!
//! $A$ is the integer (graph) Laplacian on the interior nodes,
//! $A = I times.circle T + T times.circle I$ with the 1D stencil $T = "tridiag"(-1, 2, -1)$.
//! Unknowns follow the numbering of [`crate::mesh`].

use crate::{
  config::validate_nintervals,
  error::Result,
  mesh::{flatten_interior, interior_index},
  sparse::SparseMatrix,
};

/// 1D Dirichlet Laplacian stencil of order `n`.
pub fn laplace_matrix_1d(n: usize) -> SparseMatrix {
  SparseMatrix::from_const_diagonals(&[-1.0, 2.0, -1.0], &[-1, 0, 1], n)
}

/// Five-point Laplacian for the $(M-1)^2$ interior unknowns,
/// assembled directly as stencil triplets.
pub fn laplace_matrix(nintervals: usize) -> Result<SparseMatrix> {
  validate_nintervals(nintervals)?;

  let m = nintervals;
  let n = m - 1;
  let mut mat = SparseMatrix::zeros(n * n, n * n);
  for j in 1..m {
    for i in 1..m {
      let row = interior_index(i, j, m);
      mat.push(row, row, 4.0);
      if i > 1 {
        mat.push(row, interior_index(i - 1, j, m), -1.0);
      }
      if i < m - 1 {
        mat.push(row, interior_index(i + 1, j, m), -1.0);
      }
      if j > 1 {
        mat.push(row, interior_index(i, j - 1, m), -1.0);
      }
      if j < m - 1 {
        mat.push(row, interior_index(i, j + 1, m), -1.0);
      }
    }
  }
  Ok(mat)
}

/// Five-point Laplacian as the Kronecker sum $I times.circle T + T times.circle I$.
///
/// Equal to [`laplace_matrix`] entry by entry.
pub fn laplace_matrix_kronecker(nintervals: usize) -> Result<SparseMatrix> {
  validate_nintervals(nintervals)?;

  let n = nintervals - 1;
  let stencil = laplace_matrix_1d(n);
  let eye = SparseMatrix::identity(n);
  Ok(eye.kronecker(&stencil) + stencil.kronecker(&eye))
}

/// Boundary lifting vector $g$.
///
/// Every interior node adjacent to the boundary receives the known
/// boundary values of its neighbours. Contributions are additive, so nodes
/// next to a corner collect two of them.
pub fn boundary_lift(boundary: &na::DMatrix<f64>) -> na::DVector<f64> {
  assert!(boundary.is_square() && boundary.nrows() >= 3);
  let m = boundary.nrows() - 1;
  let n = m - 1;
  let mut lift = na::DVector::zeros(n * n);

  // left edge: first n entries
  for (k, i) in (1..m).enumerate() {
    lift[k] += boundary[(i, 0)];
  }
  // right edge: last n entries
  for (k, i) in (n * n - n..n * n).zip(1..m) {
    lift[k] += boundary[(i, m)];
  }
  // bottom edge: every n-th entry starting at 0
  for (k, j) in (0..n * n).step_by(n).zip(1..m) {
    lift[k] += boundary[(0, j)];
  }
  // top edge: every n-th entry starting at n-1
  for (k, j) in (n - 1..n * n).step_by(n).zip(1..m) {
    lift[k] += boundary[(m, j)];
  }

  lift
}

/// Right-hand side $h^2 f + g$ from the full source and boundary grids.
pub fn assemble_rhs(
  source: &na::DMatrix<f64>,
  boundary: &na::DMatrix<f64>,
  mesh_width: f64,
) -> na::DVector<f64> {
  assert_eq!(source.shape(), boundary.shape());
  let scaled_source = flatten_interior(source) * mesh_width.powi(2);
  scaled_source + boundary_lift(boundary)
}
