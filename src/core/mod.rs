pub mod config;
pub mod error;

pub use config::SolverConfig;
pub use error::{ArcError, Result};
