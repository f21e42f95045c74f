use thiserror::Error;

pub type Result<T> = std::result::Result<T, PoissonError>;

#[derive(Debug, Error)]
pub enum PoissonError {
  #[error("invalid configuration: {0}")]
  InvalidConfig(String),
  #[error("sparse factorization failed: {0}")]
  Factorization(String),
  #[error("linear system is singular: {0}")]
  SingularSystem(String),
  #[error("failed to parse configuration: {0}")]
  ConfigParse(#[from] toml::de::Error),
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
