use fdpoisson::{
  convergence::measure_convergence,
  io::{save_surface, SurfaceRender},
  problem::smooth_manufactured_problem,
  solve_poisson, PoissonConfig, ReferenceProblem, SolverKind,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fdpoisson", about = "Five-point finite-difference Poisson solver on a square")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Solve the reference problem and optionally write the surface for plotting.
  Solve {
    /// TOML file with `nintervals`, `domain_min`, `domain_max`, `solver`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of intervals M per axis.
    #[arg(short = 'm', long)]
    nintervals: Option<usize>,
    #[arg(long)]
    min: Option<f64>,
    #[arg(long)]
    max: Option<f64>,
    #[arg(long)]
    solver: Option<SolverKind>,
    /// Surface output in gnuplot grid layout.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Grid-refinement study on a manufactured solution.
  Convergence {
    #[arg(long, value_delimiter = ',', default_values_t = [10, 20, 40, 80])]
    levels: Vec<usize>,
    #[arg(long, default_value_t = SolverKind::Lu)]
    solver: SolverKind,
  },
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let cli = Cli::parse();
  match cli.command {
    Command::Solve {
      config,
      nintervals,
      min,
      max,
      solver,
      output,
    } => {
      let mut params = match &config {
        Some(path) => PoissonConfig::from_file(path)
          .with_context(|| format!("loading config {}", path.display()))?,
        None => PoissonConfig::default(),
      };
      if let Some(m) = nintervals {
        params.nintervals = m;
      }
      if let Some(a) = min {
        params.domain_min = a;
      }
      if let Some(b) = max {
        params.domain_max = b;
      }
      if let Some(solver) = solver {
        params.solver = solver;
      }

      let solution = solve_poisson(&params, &ReferenceProblem)?;
      let diagnostics = solution.diagnostics();
      let field = solution.field();
      println!(
        "M={} unknowns={} nnz={} residual={:.3e}",
        params.nintervals, diagnostics.nunknowns, diagnostics.nnz, diagnostics.residual
      );
      println!(
        "field range [{:.6}, {:.6}], max seam jump {:.3e}",
        field.min(),
        field.max(),
        solution.max_seam_jump()
      );

      if let Some(path) = output {
        save_surface(&SurfaceRender::from_solution(&solution), &path)
          .with_context(|| format!("writing surface {}", path.display()))?;
        println!("surface written to {}", path.display());
      }
    }
    Command::Convergence { levels, solver } => {
      let problem = smooth_manufactured_problem();
      let records = measure_convergence(&problem, (0.0, 1.0), &levels, solver)?;
      println!("{}", fdpoisson::convergence::format_table(&records));
    }
  }
  Ok(())
}
