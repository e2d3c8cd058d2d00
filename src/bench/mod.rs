pub mod arc;
pub mod metrics;
pub mod runner;
