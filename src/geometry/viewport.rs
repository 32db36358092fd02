use super::normalize::{ImageSize, NormPoint, PixelPoint, to_normalized};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 5.0;

/// An image displayed with object-contain fit inside a container, with a
/// pan/zoom transform applied on top.
///
/// Screen coordinates are pixels relative to the container's top-left.
/// Mapping image -> screen:
///   fit    = min(container_w / image_w, container_h / image_h)
///   margin = letterbox bands left by the fit, split evenly on both sides
///   screen = (margin + image * fit) * zoom + pan
#[derive(Debug, Clone)]
pub struct Viewport {
    container_w: f64,
    container_h: f64,
    image: ImageSize,
    fit: f64,
    margin_x: f64,
    margin_y: f64,
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
}

impl Viewport {
    /// Create a viewport at zoom 1 with no pan
    ///
    /// # Arguments
    /// * `container` - (width, height) of the display area in screen pixels
    /// * `image` - natural size of the displayed image
    pub fn new(container: (f64, f64), image: ImageSize) -> Self {
        let (w, h) = container;
        let fit = (w / image.width()).min(h / image.height());
        let fit = if fit > 0.0 && fit.is_finite() { fit } else { 1.0 };

        Self {
            container_w: w,
            container_h: h,
            image,
            fit,
            margin_x: (w - image.width() * fit) / 2.0,
            margin_y: (h - image.height() * fit) / 2.0,
            zoom: MIN_ZOOM,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Set an explicit transform; zoom is clamped to [MIN_ZOOM, MAX_ZOOM]
    pub fn with_transform(mut self, pan: (f64, f64), zoom: f64) -> Self {
        self.zoom = clamp_zoom(zoom);
        self.pan_x = pan.0;
        self.pan_y = pan.1;
        self
    }

    pub fn image(&self) -> ImageSize {
        self.image
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    /// Scale applied to natural image pixels by the object-contain fit
    pub fn fit_scale(&self) -> f64 {
        self.fit
    }

    /// Map a natural-image pixel to the screen
    pub fn image_to_screen(&self, p: PixelPoint) -> PixelPoint {
        PixelPoint {
            x: (self.margin_x + p.x * self.fit) * self.zoom + self.pan_x,
            y: (self.margin_y + p.y * self.fit) * self.zoom + self.pan_y,
        }
    }

    /// Undo pan, zoom and fit to get natural-image pixels from a screen point
    pub fn screen_to_image(&self, s: PixelPoint) -> PixelPoint {
        PixelPoint {
            x: ((s.x - self.pan_x) / self.zoom - self.margin_x) / self.fit,
            y: ((s.y - self.pan_y) / self.zoom - self.margin_y) / self.fit,
        }
    }

    pub fn screen_to_normalized(&self, s: PixelPoint) -> NormPoint {
        to_normalized(self.screen_to_image(s), self.image)
    }

    /// Center the natural-image point `p` in the container at `scale`
    pub fn zoom_to(&mut self, p: PixelPoint, scale: f64) {
        let scale = clamp_zoom(scale);
        let disp_x = self.margin_x + p.x * self.fit;
        let disp_y = self.margin_y + p.y * self.fit;

        self.zoom = scale;
        self.pan_x = self.container_w / 2.0 - disp_x * scale;
        self.pan_y = self.container_h / 2.0 - disp_y * scale;
    }

    /// Back to the fitted, unpanned view
    pub fn reset(&mut self) {
        self.zoom = MIN_ZOOM;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        MIN_ZOOM
    } else {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}
