pub mod attempt;
pub mod puzzle;

pub use attempt::{AttemptStatus, Attempts};
pub use puzzle::Puzzle;
