use serde::{Deserialize, Serialize};

/// A point in raw pixel space.
///
/// Used both for the image's natural (untransformed) pixels and for screen
/// pixels relative to the viewer's top-left corner. Which one is meant is
/// always stated by the function taking it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in normalized image space: both axes span [0, 1] of the image's
/// natural width and height. Serialized as `[u, v]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct NormPoint {
    pub u: f64,
    pub v: f64,
}

impl NormPoint {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

impl From<[f64; 2]> for NormPoint {
    fn from([u, v]: [f64; 2]) -> Self {
        Self { u, v }
    }
}

impl From<NormPoint> for [f64; 2] {
    fn from(p: NormPoint) -> Self {
        [p.u, p.v]
    }
}

/// Natural pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    width: f64,
    height: f64,
}

impl ImageSize {
    /// A zero (or negative, or NaN) dimension is taken as 1, the value a
    /// viewer reports before the image has loaded.
    pub fn new(width: f64, height: f64) -> Self {
        let fix = |d: f64| if d > 0.0 && d.is_finite() { d } else { 1.0 };
        Self {
            width: fix(width),
            height: fix(height),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl From<(u32, u32)> for ImageSize {
    fn from((w, h): (u32, u32)) -> Self {
        Self::new(w as f64, h as f64)
    }
}

/// Convert a point in the image's natural pixel space to normalized space.
///
/// Any pan/zoom/fit transform must already be inverted by the caller (see
/// [`crate::geometry::Viewport::screen_to_image`]).
pub fn to_normalized(raw: PixelPoint, image: ImageSize) -> NormPoint {
    NormPoint {
        u: raw.x / image.width,
        v: raw.y / image.height,
    }
}

/// Inverse of [`to_normalized`], used to draw the target region over the image.
pub fn to_pixels(point: NormPoint, image: ImageSize) -> PixelPoint {
    PixelPoint {
        x: point.u * image.width,
        y: point.v * image.height,
    }
}
