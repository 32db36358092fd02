pub mod normalize;
pub mod polygon;
pub mod viewport;

pub use normalize::{ImageSize, NormPoint, PixelPoint, to_normalized, to_pixels};
pub use polygon::{HitRegion, RegionBounds, is_inside_polygon};
pub use viewport::{MAX_ZOOM, MIN_ZOOM, Viewport};
