//! Source terms and Dirichlet data, and their evaluation on the mesh.

use crate::mesh::CartesianMesh;

use std::f64::consts::PI;

/// Edge of the square domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
  /// First column, $x = a$.
  Left,
  /// Last column, $x = b$.
  Right,
  /// First row, $y = a$.
  Bottom,
  /// Last row, $y = b$.
  Top,
}

impl Edge {
  /// Order in which edges are written into the boundary field.
  /// Later edges overwrite earlier ones at shared corners.
  pub const ASSIGNMENT_ORDER: [Edge; 4] = [Edge::Left, Edge::Bottom, Edge::Right, Edge::Top];
}

/// A Poisson problem $-Delta u = f$ with Dirichlet data on the four edges.
pub trait PoissonProblem {
  fn source(&self, x: f64, y: f64) -> f64;
  fn boundary(&self, edge: Edge, x: f64, y: f64) -> f64;
}

impl<P: PoissonProblem + ?Sized> PoissonProblem for &P {
  fn source(&self, x: f64, y: f64) -> f64 {
    (**self).source(x, y)
  }
  fn boundary(&self, edge: Edge, x: f64, y: f64) -> f64 {
    (**self).boundary(edge, x, y)
  }
}

/// $f = 20 cos(3 pi x) sin(2 pi y)$ with
/// $u = y^2$ left, $u = 1$ right, $u = x^3$ bottom, $u = 1$ top.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceProblem;

impl PoissonProblem for ReferenceProblem {
  fn source(&self, x: f64, y: f64) -> f64 {
    20.0 * ((3.0 * PI * x).cos() * (2.0 * PI * y).sin())
  }
  fn boundary(&self, edge: Edge, x: f64, y: f64) -> f64 {
    match edge {
      Edge::Left => y.powi(2),
      Edge::Right => 1.0,
      Edge::Bottom => x.powi(3),
      Edge::Top => 1.0,
    }
  }
}

/// Zero source and zero boundary. The exact solution is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomogeneousProblem;

impl PoissonProblem for HomogeneousProblem {
  fn source(&self, _x: f64, _y: f64) -> f64 {
    0.0
  }
  fn boundary(&self, _edge: Edge, _x: f64, _y: f64) -> f64 {
    0.0
  }
}

/// Problem built from a known solution $u$ and its negative Laplacian $-Delta u$.
///
/// The boundary data is $u$ restricted to the boundary.
pub struct ManufacturedProblem<U, L> {
  solution: U,
  neg_laplacian: L,
}

impl<U, L> ManufacturedProblem<U, L>
where
  U: Fn(f64, f64) -> f64,
  L: Fn(f64, f64) -> f64,
{
  pub fn new(solution: U, neg_laplacian: L) -> Self {
    Self {
      solution,
      neg_laplacian,
    }
  }

  pub fn exact(&self, x: f64, y: f64) -> f64 {
    (self.solution)(x, y)
  }
}

impl<U, L> PoissonProblem for ManufacturedProblem<U, L>
where
  U: Fn(f64, f64) -> f64,
  L: Fn(f64, f64) -> f64,
{
  fn source(&self, x: f64, y: f64) -> f64 {
    (self.neg_laplacian)(x, y)
  }
  fn boundary(&self, _edge: Edge, x: f64, y: f64) -> f64 {
    (self.solution)(x, y)
  }
}

/// $u = sin(pi x) sin(pi y) + x^2 y$, $-Delta u = 2 pi^2 sin(pi x) sin(pi y) - 2 y$.
pub fn smooth_manufactured_problem(
) -> ManufacturedProblem<impl Fn(f64, f64) -> f64, impl Fn(f64, f64) -> f64> {
  ManufacturedProblem::new(
    |x: f64, y: f64| (PI * x).sin() * (PI * y).sin() + x.powi(2) * y,
    |x: f64, y: f64| 2.0 * PI.powi(2) * (PI * x).sin() * (PI * y).sin() - 2.0 * y,
  )
}

/// Evaluates the source term on every node.
pub fn evaluate_source<P: PoissonProblem>(mesh: &CartesianMesh, problem: &P) -> na::DMatrix<f64> {
  mesh.map_nodes(|x, y| problem.source(x, y))
}

/// Boundary field with the Dirichlet data on the border and zeros in the interior.
///
/// Edges are written in [`Edge::ASSIGNMENT_ORDER`].
pub fn evaluate_boundary<P: PoissonProblem>(mesh: &CartesianMesh, problem: &P) -> na::DMatrix<f64> {
  let m = mesh.nintervals();
  let nnodes = mesh.nnodes_axis();
  let mut field = na::DMatrix::zeros(nnodes, nnodes);

  for edge in Edge::ASSIGNMENT_ORDER {
    for k in 0..nnodes {
      let (i, j) = match edge {
        Edge::Left => (k, 0),
        Edge::Right => (k, m),
        Edge::Bottom => (0, k),
        Edge::Top => (m, k),
      };
      let (x, y) = mesh.node_pos(i, j);
      field[(i, j)] = problem.boundary(edge, x, y);
    }
  }

  field
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn reference_boundary_edges() {
    let mesh = CartesianMesh::new(0.0, 1.0, 4).unwrap();
    let field = evaluate_boundary(&mesh, &ReferenceProblem);
    for k in 1..4 {
      let t = k as f64 / 4.0;
      assert_eq!(field[(k, 0)], t * t, "left");
      assert_eq!(field[(k, 4)], 1.0, "right");
      assert_eq!(field[(0, k)], t * t * t, "bottom");
      assert_eq!(field[(4, k)], 1.0, "top");
    }
    for i in 0..=4 {
      for j in 0..=4 {
        if !mesh.is_boundary_node(i, j) {
          assert_eq!(field[(i, j)], 0.0, "interior ({i}, {j})");
        }
      }
    }
    assert!(mesh.is_boundary_node(0, 2) && mesh.is_boundary_node(3, 4));
    assert!(!mesh.is_boundary_node(1, 3));
    assert_eq!(field[(0, 0)], 0.0);
    assert_eq!(field[(0, 4)], 1.0);
    assert_eq!(field[(4, 0)], 1.0);
    assert_eq!(field[(4, 4)], 1.0);
  }

  #[test]
  fn corner_precedence() {
    // Tags every edge with a distinct value to observe which write wins.
    struct Tagged;
    impl PoissonProblem for Tagged {
      fn source(&self, _x: f64, _y: f64) -> f64 {
        0.0
      }
      fn boundary(&self, edge: Edge, _x: f64, _y: f64) -> f64 {
        match edge {
          Edge::Left => 1.0,
          Edge::Right => 2.0,
          Edge::Bottom => 3.0,
          Edge::Top => 4.0,
        }
      }
    }

    let mesh = CartesianMesh::new(0.0, 1.0, 4).unwrap();
    let field = evaluate_boundary(&mesh, &Tagged);
    assert_eq!(field[(0, 0)], 3.0, "bottom-left: bottom");
    assert_eq!(field[(0, 4)], 2.0, "bottom-right: right");
    assert_eq!(field[(4, 0)], 4.0, "top-left: top");
    assert_eq!(field[(4, 4)], 4.0, "top-right: top");
  }

  #[test]
  fn source_orientation() {
    let mesh = CartesianMesh::new(0.0, 1.0, 5).unwrap();
    let source = evaluate_source(&mesh, &ReferenceProblem);
    // Row index is y, column index is x.
    let (x, y) = mesh.node_pos(2, 1);
    assert_eq!((x, y), (0.2, 0.4));
    assert_eq!(source[(2, 1)], ReferenceProblem.source(x, y));
    assert!((source[(2, 1)] - source[(1, 2)]).abs() > 1.0);
  }

  #[test]
  fn manufactured_boundary_is_solution() {
    let problem = smooth_manufactured_problem();
    let mesh = CartesianMesh::new(0.0, 1.0, 5).unwrap();
    let field = evaluate_boundary(&mesh, &problem);
    for k in 0..=5 {
      for (i, j) in [(k, 0), (k, 5), (0, k), (5, k)] {
        let (x, y) = mesh.node_pos(i, j);
        assert_eq!(field[(i, j)], problem.exact(x, y));
      }
    }
  }
}
