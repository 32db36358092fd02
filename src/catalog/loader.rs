use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::Puzzle;

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("failed to read puzzle catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid puzzle catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("puzzle catalog contains no puzzles")]
    Empty,
    #[error("puzzle {index} ({title:?}) has {points} polygon points, at least 3 are required")]
    DegeneratePolygon {
        index: usize,
        title: String,
        points: usize,
    },
    #[error("a level needs at least 3 points, got {0}")]
    TooFewPoints(usize),
}

/// Parse a puzzle catalog: a JSON array of
/// `{ "image", "title", "difficulty", "polygon": [[u, v], ...] }`.
///
/// Every polygon must have at least 3 points. Coordinates outside
/// [0, 1] are accepted as-is.
pub fn parse_puzzles(json: &str) -> Result<Vec<Puzzle>, PuzzleError> {
    let puzzles: Vec<Puzzle> = serde_json::from_str(json)?;

    if puzzles.is_empty() {
        return Err(PuzzleError::Empty);
    }

    for (index, puzzle) in puzzles.iter().enumerate() {
        if !puzzle.polygon.is_valid() {
            return Err(PuzzleError::DegeneratePolygon {
                index,
                title: puzzle.title.clone(),
                points: puzzle.polygon.len(),
            });
        }
    }

    Ok(puzzles)
}

pub fn load_puzzles(path: &Path) -> Result<Vec<Puzzle>, PuzzleError> {
    let contents = std::fs::read_to_string(path).map_err(|source| PuzzleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_puzzles(&contents)
}

/// Resolve a catalog image reference against the catalog's directory.
///
/// Web-style absolute references ("/assets/a.jpg") are treated as relative
/// to `catalog_dir`, the way a static site serves them from its root.
pub fn resolve_image_path(catalog_dir: &Path, image: &str) -> PathBuf {
    let relative = image.trim_start_matches(['/', '\\']);
    catalog_dir.join(relative)
}
