//! Run parameters: grid resolution, domain bounds and solver choice.

use crate::error::{PoissonError, Result};

use serde::{Deserialize, Serialize};

use std::{fmt, path::Path, str::FromStr};

/// Sparse direct factorization used for the interior system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
  #[default]
  Lu,
  Cholesky,
}

impl fmt::Display for SolverKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Lu => write!(f, "lu"),
      Self::Cholesky => write!(f, "cholesky"),
    }
  }
}

impl FromStr for SolverKind {
  type Err = PoissonError;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "lu" => Ok(Self::Lu),
      "cholesky" | "llt" => Ok(Self::Cholesky),
      other => Err(PoissonError::InvalidConfig(format!(
        "unknown solver `{other}` (expected `lu` or `cholesky`)"
      ))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoissonConfig {
  /// Number of intervals $M$ per axis. The mesh has $M+1$ nodes per axis.
  pub nintervals: usize,
  /// Lower domain bound $a$ of $[a,b]^2$.
  pub domain_min: f64,
  /// Upper domain bound $b$ of $[a,b]^2$.
  pub domain_max: f64,
  pub solver: SolverKind,
}

impl Default for PoissonConfig {
  fn default() -> Self {
    Self {
      nintervals: 50,
      domain_min: 0.0,
      domain_max: 1.0,
      solver: SolverKind::Lu,
    }
  }
}

impl PoissonConfig {
  pub fn new(nintervals: usize, domain_min: f64, domain_max: f64) -> Self {
    Self {
      nintervals,
      domain_min,
      domain_max,
      ..Self::default()
    }
  }

  pub fn with_solver(mut self, solver: SolverKind) -> Self {
    self.solver = solver;
    self
  }

  pub fn validate(&self) -> Result<()> {
    validate_nintervals(self.nintervals)?;
    if !self.domain_min.is_finite() || !self.domain_max.is_finite() {
      return Err(PoissonError::InvalidConfig(format!(
        "domain bounds must be finite (a={}, b={})",
        self.domain_min, self.domain_max
      )));
    }
    if self.domain_min >= self.domain_max {
      return Err(PoissonError::InvalidConfig(format!(
        "domain must satisfy a < b (a={}, b={})",
        self.domain_min, self.domain_max
      )));
    }
    Ok(())
  }

  /// Mesh width $h = (b-a)/M$.
  pub fn mesh_width(&self) -> f64 {
    (self.domain_max - self.domain_min) / self.nintervals as f64
  }

  pub fn from_toml_str(s: &str) -> Result<Self> {
    let config: Self = toml::from_str(s)?;
    config.validate()?;
    Ok(config)
  }

  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let contents = std::fs::read_to_string(path)?;
    Self::from_toml_str(&contents)
  }
}

/// There is no interior for fewer than two intervals.
pub fn validate_nintervals(nintervals: usize) -> Result<()> {
  if nintervals < 2 {
    return Err(PoissonError::InvalidConfig(format!(
      "grid resolution must be at least 2 intervals (got M={nintervals})"
    )));
  }
  Ok(())
}

#[cfg(test)]
mod test {
  use super::{PoissonConfig, SolverKind};
  use crate::PoissonError;

  #[test]
  fn defaults() {
    let config = PoissonConfig::default();
    assert_eq!(config.nintervals, 50);
    assert_eq!(config.domain_min, 0.0);
    assert_eq!(config.domain_max, 1.0);
    assert_eq!(config.solver, SolverKind::Lu);
    assert!(config.validate().is_ok());
    assert_eq!(config.mesh_width(), 0.02);
  }

  #[test]
  fn rejects_too_coarse_grid() {
    for m in [0, 1] {
      let err = PoissonConfig::new(m, 0.0, 1.0).validate().unwrap_err();
      assert!(matches!(err, PoissonError::InvalidConfig(_)), "{err}");
    }
    assert!(PoissonConfig::new(2, 0.0, 1.0).validate().is_ok());
  }

  #[test]
  fn rejects_bad_bounds() {
    assert!(PoissonConfig::new(10, 1.0, 1.0).validate().is_err());
    assert!(PoissonConfig::new(10, 2.0, 1.0).validate().is_err());
    assert!(PoissonConfig::new(10, f64::NAN, 1.0).validate().is_err());
    assert!(PoissonConfig::new(10, 0.0, f64::INFINITY).validate().is_err());
  }

  #[test]
  fn toml_partial_uses_defaults() {
    let config = PoissonConfig::from_toml_str("nintervals = 20\nsolver = \"cholesky\"\n").unwrap();
    assert_eq!(config.nintervals, 20);
    assert_eq!(config.domain_min, 0.0);
    assert_eq!(config.domain_max, 1.0);
    assert_eq!(config.solver, SolverKind::Cholesky);
  }

  #[test]
  fn toml_invalid_is_rejected() {
    let err = PoissonConfig::from_toml_str("nintervals = 1").unwrap_err();
    assert!(matches!(err, PoissonError::InvalidConfig(_)));
    let err = PoissonConfig::from_toml_str("nintervals = \"many\"").unwrap_err();
    assert!(matches!(err, PoissonError::ConfigParse(_)));
  }

  #[test]
  fn solver_kind_parsing() {
    assert_eq!("lu".parse::<SolverKind>().unwrap(), SolverKind::Lu);
    assert_eq!("Cholesky".parse::<SolverKind>().unwrap(), SolverKind::Cholesky);
    assert!("cg".parse::<SolverKind>().is_err());
    assert_eq!(SolverKind::Cholesky.to_string(), "cholesky");
  }
}
