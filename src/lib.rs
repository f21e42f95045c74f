//! Finite-difference solver for the 2D Poisson equation $-Delta u = f$
//! on a square with Dirichlet boundary conditions.
//!
//! The pipeline is strictly forward:
//! mesh -> {source, boundary} -> {matrix, rhs} -> solve -> compose.

extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod assemble;
pub mod config;
pub mod convergence;
pub mod error;
pub mod io;
pub mod lse;
pub mod mesh;
pub mod poisson;
pub mod problem;
pub mod sparse;

pub use config::{PoissonConfig, SolverKind};
pub use error::{PoissonError, Result};
pub use poisson::{solve_poisson, PoissonSolution};
pub use problem::{Edge, HomogeneousProblem, ManufacturedProblem, PoissonProblem, ReferenceProblem};
