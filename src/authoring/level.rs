use crate::catalog::PuzzleError;
use crate::domain::Puzzle;
use crate::geometry::{HitRegion, ImageSize, NormPoint, PixelPoint, to_normalized};

/// Decimal places kept in exported coordinates
const EXPORT_DECIMALS: i32 = 4;

fn round_coord(value: f64) -> f64 {
    let factor = 10f64.powi(EXPORT_DECIMALS);
    (value * factor).round() / factor
}

/// Collects the outline of a new hidden object, clicked point by point on
/// the image, and exports it in normalized catalog form.
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    image: ImageSize,
    points: Vec<PixelPoint>,
}

impl LevelBuilder {
    pub fn new(image: ImageSize) -> Self {
        Self {
            image,
            points: Vec::new(),
        }
    }

    /// Append a vertex in natural image pixels
    pub fn add_point(&mut self, p: PixelPoint) {
        self.points.push(p);
    }

    pub fn undo(&mut self) -> Option<PixelPoint> {
        self.points.pop()
    }

    pub fn reset(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    /// Normalized outline, rounded to 4 decimals
    pub fn export(&self) -> Result<HitRegion, PuzzleError> {
        if self.points.len() < 3 {
            return Err(PuzzleError::TooFewPoints(self.points.len()));
        }

        let normalized = self
            .points
            .iter()
            .map(|&p| {
                let n = to_normalized(p, self.image);
                NormPoint::new(round_coord(n.u), round_coord(n.v))
            })
            .collect();

        Ok(HitRegion::new(normalized))
    }

    /// Exported outline as pretty-printed JSON, ready to paste into a catalog
    pub fn to_json(&self) -> Result<String, PuzzleError> {
        Ok(serde_json::to_string_pretty(&self.export()?)?)
    }

    /// Full catalog entry for this outline
    pub fn to_puzzle(
        &self,
        image: &str,
        title: &str,
        difficulty: &str,
    ) -> Result<Puzzle, PuzzleError> {
        Ok(Puzzle::new(image, title, difficulty, self.export()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> LevelBuilder {
        let mut b = LevelBuilder::new(ImageSize::new(1000.0, 800.0));
        b.add_point(PixelPoint::new(100.0, 80.0));
        b.add_point(PixelPoint::new(500.0, 80.0));
        b.add_point(PixelPoint::new(333.0, 412.0));
        b
    }

    #[test]
    fn test_export_rounds_to_four_decimals() {
        let region = builder().export().unwrap();
        assert_eq!(
            region.points(),
            &[
                NormPoint::new(0.1, 0.1),
                NormPoint::new(0.5, 0.1),
                NormPoint::new(0.333, 0.515),
            ]
        );
        assert_eq!(round_coord(0.1234567), 0.1235);
    }

    #[test]
    fn test_too_few_points() {
        let mut b = builder();
        assert_eq!(b.undo(), Some(PixelPoint::new(333.0, 412.0)));
        assert!(matches!(b.export(), Err(PuzzleError::TooFewPoints(2))));

        b.reset();
        assert!(b.points().is_empty());
        assert!(matches!(b.to_json(), Err(PuzzleError::TooFewPoints(0))));
    }

    #[test]
    fn test_json_export_loads_back() {
        let b = builder();
        let json = b.to_json().unwrap();
        assert!(json.starts_with("[\n"));

        let region: HitRegion = serde_json::from_str(&json).unwrap();
        assert_eq!(region, b.export().unwrap());
    }

    #[test]
    fn test_to_puzzle_hits_inside_outline() {
        let puzzle = builder()
            .to_puzzle("/assets/new.jpg", "Nouveau", "Facile")
            .unwrap();
        assert!(puzzle.is_hit(NormPoint::new(0.3, 0.2)));
        assert!(!puzzle.is_hit(NormPoint::new(0.9, 0.9)));
    }
}
