use serde::{Deserialize, Serialize};

use crate::geometry::{HitRegion, NormPoint};

/// One hidden-object puzzle: an image and the region the player must find
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Image reference as written in the catalog (e.g. "/assets/kitchen.jpg")
    pub image: String,
    pub title: String,
    pub difficulty: String,
    /// Target region in normalized image coordinates
    pub polygon: HitRegion,
}

impl Puzzle {
    pub fn new(
        image: impl Into<String>,
        title: impl Into<String>,
        difficulty: impl Into<String>,
        polygon: HitRegion,
    ) -> Self {
        Self {
            image: image.into(),
            title: title.into(),
            difficulty: difficulty.into(),
            polygon,
        }
    }

    pub fn is_hit(&self, point: NormPoint) -> bool {
        self.polygon.contains(point)
    }
}
