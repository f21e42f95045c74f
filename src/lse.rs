//! Sparse direct solvers for the assembled linear system.

use crate::{
  config::SolverKind,
  error::{PoissonError, Result},
  sparse::nalgebra2faer,
};

use faer::solvers::SpSolver;

use std::panic::{self, AssertUnwindSafe};

pub struct FaerLu {
  raw: faer::sparse::linalg::solvers::Lu<usize, f64>,
}
impl FaerLu {
  pub fn new(a: nas::CscMatrix<f64>) -> Result<Self> {
    let a = nalgebra2faer(a);
    let raw = catch_zero_pivot(|| a.sp_lu())?
      .map_err(|err| PoissonError::Factorization(format!("{err:?}")))?;
    Ok(Self { raw })
  }

  pub fn solve(&self, b: &na::DVector<f64>) -> Result<na::DVector<f64>> {
    let b = faer::col::from_slice(b.as_slice());
    let x = na::DVector::from_vec(self.raw.solve(b).as_slice().to_vec());
    ensure_finite(x)
  }
}

pub struct FaerCholesky {
  raw: faer::sparse::linalg::solvers::Cholesky<usize, f64>,
}
impl FaerCholesky {
  pub fn new(a: nas::CscMatrix<f64>) -> Result<Self> {
    let a = nalgebra2faer(a);
    let raw = catch_zero_pivot(|| a.sp_cholesky(faer::Side::Upper))?
      .map_err(|err| PoissonError::Factorization(format!("{err:?}")))?;
    Ok(Self { raw })
  }

  pub fn solve(&self, b: &na::DVector<f64>) -> Result<na::DVector<f64>> {
    let b = faer::col::from_slice(b.as_slice());
    let x = na::DVector::from_vec(self.raw.solve(b).as_slice().to_vec());
    ensure_finite(x)
  }
}

/// Factorizes `mat` with the requested solver and solves for `rhs`.
pub fn solve_sparse(
  mat: nas::CscMatrix<f64>,
  rhs: &na::DVector<f64>,
  solver: SolverKind,
) -> Result<na::DVector<f64>> {
  assert_eq!(mat.nrows(), rhs.len());
  match solver {
    SolverKind::Lu => FaerLu::new(mat)?.solve(rhs),
    SolverKind::Cholesky => FaerCholesky::new(mat)?.solve(rhs),
  }
}

/// Maximum norm of the residual $b - A x$.
pub fn residual_norm(
  mat: &nas::CscMatrix<f64>,
  sol: &na::DVector<f64>,
  rhs: &na::DVector<f64>,
) -> f64 {
  let residual = rhs - mat * sol;
  residual.amax()
}

/// faer's simplicial numeric factorization panics on an exact zero pivot
/// instead of returning an error.
fn catch_zero_pivot<T>(factorize: impl FnOnce() -> T) -> Result<T> {
  panic::catch_unwind(AssertUnwindSafe(factorize)).map_err(|_| {
    PoissonError::SingularSystem("zero pivot in numeric factorization".to_string())
  })
}

/// Tiny pivots that are not exactly zero only show up as overflow in the solution.
fn ensure_finite(x: na::DVector<f64>) -> Result<na::DVector<f64>> {
  let nonfinite = x.iter().filter(|v| !v.is_finite()).count();
  if nonfinite > 0 {
    return Err(PoissonError::SingularSystem(format!(
      "solution has {nonfinite} non-finite entries"
    )));
  }
  Ok(x)
}
