//! Grid-refinement study for problems with a known exact solution.

use crate::{
  config::{PoissonConfig, SolverKind},
  error::Result,
  poisson::solve_poisson,
  problem::ManufacturedProblem,
};

use itertools::Itertools;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceRecord {
  pub nintervals: usize,
  pub mesh_width: f64,
  pub max_error: f64,
  pub l2_error: f64,
  /// Observed order of the maximum error w.r.t. the previous level.
  /// Infinite on the first level.
  pub rate: f64,
}

/// Solves `problem` on every resolution in `levels` and measures the error.
pub fn measure_convergence<U, L>(
  problem: &ManufacturedProblem<U, L>,
  domain: (f64, f64),
  levels: &[usize],
  solver: SolverKind,
) -> Result<Vec<ConvergenceRecord>>
where
  U: Fn(f64, f64) -> f64,
  L: Fn(f64, f64) -> f64,
{
  let mut records: Vec<ConvergenceRecord> = Vec::with_capacity(levels.len());
  for &nintervals in levels {
    let config = PoissonConfig::new(nintervals, domain.0, domain.1).with_solver(solver);
    let solution = solve_poisson(&config, problem)?;

    let max_error = solution.max_error(|x, y| problem.exact(x, y));
    let l2_error = solution.l2_error(|x, y| problem.exact(x, y));
    let mesh_width = config.mesh_width();
    let rate = match records.last() {
      Some(prev) => (prev.max_error / max_error).log2() / (prev.mesh_width / mesh_width).log2(),
      None => f64::INFINITY,
    };

    records.push(ConvergenceRecord {
      nintervals,
      mesh_width,
      max_error,
      l2_error,
      rate,
    });
  }
  info!("convergence study:\n{}", format_table(&records));
  Ok(records)
}

pub fn format_table(records: &[ConvergenceRecord]) -> String {
  let separator = "-".repeat(58);
  let header = format!(
    "| {:>5} | {:>10} | {:>10} | {:>10} | {:>9} |",
    "M", "mesh width", "max error", "L2 error", "conv rate"
  );
  let rows = records.iter().map(|r| {
    format!(
      "| {:>5} | {:>10.3e} | {:>10.3e} | {:>10.3e} | {:>9.2} |",
      r.nintervals, r.mesh_width, r.max_error, r.l2_error, r.rate
    )
  });
  [separator.clone(), header, separator.clone()]
    .into_iter()
    .chain(rows)
    .chain([separator])
    .join("\n")
}
