pub mod dsl;
pub mod fill;
pub mod frame;
pub mod geometric;
pub mod path;
pub mod recolor;
pub mod row_col;
pub mod strategy;
pub mod tip;

pub use dsl::Grid;
pub use strategy::{Pattern, Solver, Strategy, solve};
