//! Hand-off of a solution to an external surface renderer.
//!
//! The output is a plain-text grid in gnuplot `splot` layout: one
//! `x y g` line per node and a blank line after every mesh row.

use crate::poisson::PoissonSolution;

use std::{
  fs::File,
  io::{BufWriter, Write},
  path::Path,
};

/// Presentation settings forwarded to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderHints {
  pub colormap: String,
  pub axis_labels: [String; 3],
  /// Camera elevation in degrees.
  pub elevation: f64,
  /// Camera azimuth in degrees.
  pub azimuth: f64,
}

impl Default for RenderHints {
  fn default() -> Self {
    Self {
      colormap: "coolwarm".to_string(),
      axis_labels: ["X".to_string(), "Y".to_string(), "G".to_string()],
      elevation: 20.0,
      azimuth: -106.0,
    }
  }
}

/// Coordinate arrays and field values of one surface.
pub struct SurfaceRender<'a> {
  pub xs: &'a na::DMatrix<f64>,
  pub ys: &'a na::DMatrix<f64>,
  pub values: &'a na::DMatrix<f64>,
  pub hints: RenderHints,
}

impl<'a> SurfaceRender<'a> {
  pub fn from_solution(solution: &'a PoissonSolution) -> Self {
    Self {
      xs: solution.mesh().xs(),
      ys: solution.mesh().ys(),
      values: solution.field(),
      hints: RenderHints::default(),
    }
  }
}

pub fn save_surface(render: &SurfaceRender, path: impl AsRef<Path>) -> std::io::Result<()> {
  let file = File::create(path)?;
  let writer = BufWriter::new(file);
  write_surface(writer, render)
}

pub fn write_surface<W: Write>(mut writer: W, render: &SurfaceRender) -> std::io::Result<()> {
  assert_eq!(render.xs.shape(), render.values.shape());
  assert_eq!(render.ys.shape(), render.values.shape());

  let hints = &render.hints;
  let [xlabel, ylabel, zlabel] = &hints.axis_labels;
  writeln!(writer, "# labels: {xlabel} {ylabel} {zlabel}")?;
  writeln!(writer, "# colormap: {}", hints.colormap)?;
  writeln!(
    writer,
    "# view: elevation={} azimuth={}",
    hints.elevation, hints.azimuth
  )?;

  for i in 0..render.values.nrows() {
    for j in 0..render.values.ncols() {
      writeln!(
        writer,
        "{:.6} {:.6} {:.9e}",
        render.xs[(i, j)],
        render.ys[(i, j)],
        render.values[(i, j)]
      )?;
    }
    writeln!(writer)?;
  }
  writer.flush()
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{config::PoissonConfig, poisson::solve_poisson, problem::ReferenceProblem};

  #[test]
  fn surface_layout() {
    let solution = solve_poisson(&PoissonConfig::new(2, 0.0, 1.0), &ReferenceProblem).unwrap();
    let render = SurfaceRender::from_solution(&solution);
    let mut buf = Vec::new();
    write_surface(&mut buf, &render).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines[0], "# labels: X Y G");
    assert_eq!(lines[1], "# colormap: coolwarm");
    assert_eq!(lines[2], "# view: elevation=20 azimuth=-106");
    // 3 header lines, 3 rows of 3 nodes, each row followed by a blank line
    assert_eq!(lines.len(), 3 + 3 * 4);
    assert_eq!(lines[3], "0.000000 0.000000 0.000000000e0");
    assert_eq!(lines[6], "");
    // second row is y = 0.5, left boundary value y^2
    assert!(lines[7].starts_with("0.000000 0.500000 2.5"));
  }
}
