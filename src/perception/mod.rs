pub mod grid;
pub mod render;
pub mod submission;

pub use grid::{ArcExample, ArcTask, load_arc_task, write_prediction};
