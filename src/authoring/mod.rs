pub mod level;

pub use level::LevelBuilder;
