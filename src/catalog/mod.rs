pub mod loader;

pub use loader::{PuzzleError, load_puzzles, parse_puzzles, resolve_image_path};
