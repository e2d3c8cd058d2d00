pub mod core;
pub mod synthesis;
pub mod perception;
pub mod bench;

pub use crate::core::{ArcError, Result, SolverConfig};
pub use synthesis::{Grid, Solver, solve};
