//! The full solve: mesh, evaluation, assembly, sparse solve and composition.

use crate::{
  assemble,
  config::PoissonConfig,
  error::Result,
  lse,
  mesh::{unflatten_interior, CartesianMesh},
  problem::{self, PoissonProblem},
};

use tracing::{debug, info, warn};

const RESIDUAL_WARN_TOL: f64 = 1e-8;

/// Statistics of the linear solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveDiagnostics {
  pub nunknowns: usize,
  pub nnz: usize,
  /// Maximum norm of $b - A u$.
  pub residual: f64,
}

pub struct PoissonSolution {
  mesh: CartesianMesh,
  field: na::DMatrix<f64>,
  diagnostics: SolveDiagnostics,
}

impl PoissonSolution {
  pub fn mesh(&self) -> &CartesianMesh {
    &self.mesh
  }
  /// Full `(M+1) x (M+1)` solution grid including boundary values.
  pub fn field(&self) -> &na::DMatrix<f64> {
    &self.field
  }
  pub fn diagnostics(&self) -> SolveDiagnostics {
    self.diagnostics
  }
  pub fn into_parts(self) -> (CartesianMesh, na::DMatrix<f64>) {
    (self.mesh, self.field)
  }

  /// Nodal errors against `exact`.
  pub fn nodal_error<F>(&self, exact: F) -> na::DMatrix<f64>
  where
    F: Fn(f64, f64) -> f64,
  {
    &self.field - self.mesh.map_nodes(exact)
  }

  /// Maximum nodal error against `exact`.
  pub fn max_error<F>(&self, exact: F) -> f64
  where
    F: Fn(f64, f64) -> f64,
  {
    self.nodal_error(exact).amax()
  }

  /// Discrete $L^2$ error $h sqrt(sum_i e_i^2)$ against `exact`.
  pub fn l2_error<F>(&self, exact: F) -> f64
  where
    F: Fn(f64, f64) -> f64,
  {
    self.mesh.mesh_width() * self.nodal_error(exact).norm()
  }

  /// Largest jump between a boundary node and its interior neighbour.
  pub fn max_seam_jump(&self) -> f64 {
    let m = self.mesh.nintervals();
    let g = &self.field;
    let mut jump: f64 = 0.0;
    for k in 1..m {
      jump = jump
        .max((g[(k, 0)] - g[(k, 1)]).abs())
        .max((g[(k, m)] - g[(k, m - 1)]).abs())
        .max((g[(0, k)] - g[(1, k)]).abs())
        .max((g[(m, k)] - g[(m - 1, k)]).abs());
    }
    jump
  }
}

/// Solves $-Delta u = f$ on $[a,b]^2$ with the Dirichlet data of `problem`.
pub fn solve_poisson<P: PoissonProblem>(
  config: &PoissonConfig,
  problem: &P,
) -> Result<PoissonSolution> {
  config.validate()?;
  let mesh = CartesianMesh::from_config(config)?;
  let m = mesh.nintervals();
  info!(
    "solving Poisson on [{}, {}]^2 with M={m} ({} unknowns)",
    mesh.domain_min(),
    mesh.domain_max(),
    mesh.ninterior()
  );

  let source = problem::evaluate_source(&mesh, problem);
  let boundary = problem::evaluate_boundary(&mesh, problem);

  let galmat = assemble::laplace_matrix(m)?.to_nalgebra_csc();
  let rhs = assemble::assemble_rhs(&source, &boundary, mesh.mesh_width());
  debug!("assembled system: nnz={}", galmat.nnz());

  let sol = lse::solve_sparse(galmat.clone(), &rhs, config.solver)?;
  let residual = lse::residual_norm(&galmat, &sol, &rhs);
  debug!("solved with {}: residual={residual:.3e}", config.solver);
  if residual > RESIDUAL_WARN_TOL * rhs.amax().max(1.0) {
    warn!("large residual {residual:.3e} after sparse solve");
  }

  let field = compose_solution(boundary, &sol, m);
  let diagnostics = SolveDiagnostics {
    nunknowns: sol.len(),
    nnz: galmat.nnz(),
    residual,
  };

  Ok(PoissonSolution {
    mesh,
    field,
    diagnostics,
  })
}

/// Writes the interior solution into the interior of the boundary field.
pub fn compose_solution(
  mut boundary: na::DMatrix<f64>,
  sol: &na::DVector<f64>,
  nintervals: usize,
) -> na::DMatrix<f64> {
  let n = nintervals - 1;
  assert_eq!(boundary.shape(), (nintervals + 1, nintervals + 1));
  boundary
    .view_mut((1, 1), (n, n))
    .copy_from(&unflatten_interior(sol, nintervals));
  boundary
}
