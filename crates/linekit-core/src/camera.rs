//! Camera module for the zoom transform.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level that corresponds to "100%" in the UI.
pub const BASE_ZOOM: f64 = 1.0;

/// Camera manages the view transform for the canvas.
///
/// Zoom scales about the centre of the canvas. `origin` is the position of
/// the canvas element in the coordinate space pointer events arrive in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current zoom level (BASE_ZOOM = 100% in UI)
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
    /// Canvas size in pixels.
    pub viewport: Size,
    /// Offset of the canvas within the event coordinate space.
    pub origin: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: BASE_ZOOM,
            min_zoom: 0.1,
            max_zoom: 2.0,
            viewport: Size::new(800.0, 600.0),
            origin: Vec2::ZERO,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with the given zoom bounds.
    pub fn with_bounds(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            min_zoom,
            max_zoom,
            ..Self::default()
        }
    }

    fn center(&self) -> Vec2 {
        Vec2::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to canvas coordinates.
    pub fn transform(&self) -> Affine {
        let c = self.center();
        Affine::translate(c) * Affine::scale(self.zoom) * Affine::translate(-c)
    }

    /// Get the inverse transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        let c = self.center();
        Affine::translate(c) * Affine::scale(1.0 / self.zoom) * Affine::translate(-c)
    }

    /// Convert a pointer position to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * (screen_point - self.origin)
    }

    /// Convert a world point to pointer coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point + self.origin
    }

    /// Step the zoom by `delta`, rounded to one decimal place.
    ///
    /// The result never leaves the zoom bounds. A step that reaches a bound
    /// lands exactly on it, even when the bound is not a multiple of 0.1.
    /// Returns true if the zoom changed.
    pub fn adjust_zoom(&mut self, delta: f64) -> bool {
        let target = (self.zoom + delta).clamp(self.min_zoom, self.max_zoom);
        if target <= self.min_zoom || target >= self.max_zoom {
            return self.set_zoom(target);
        }
        let rounded = (target * 10.0).round() / 10.0;
        self.set_zoom(rounded.clamp(self.min_zoom, self.max_zoom))
    }

    /// Set the zoom from a percentage, clamped to the zoom bounds.
    pub fn set_zoom_percent(&mut self, percent: f64) -> bool {
        let clamped = percent.clamp(self.min_zoom * 100.0, self.max_zoom * 100.0);
        self.set_zoom(clamped / 100.0)
    }

    /// Set the zoom from free text such as `"150"` or `"150%"`.
    ///
    /// The leading number is used and anything after it is ignored, so
    /// `"150px"` means 150%. Text that does not start with a number leaves
    /// the zoom untouched.
    pub fn set_zoom_from_text(&mut self, text: &str) -> bool {
        match leading_number(text) {
            Some(percent) => self.set_zoom_percent(percent),
            None => false,
        }
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> f64 {
        (self.zoom * 100.0).round()
    }

    /// Reset camera to 100%.
    pub fn reset(&mut self) -> bool {
        self.set_zoom(BASE_ZOOM)
    }

    fn set_zoom(&mut self, zoom: f64) -> bool {
        if (zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }
        log::debug!("zoom {} -> {}", self.zoom, zoom);
        self.zoom = zoom;
        true
    }
}

/// Parse the number at the start of `text`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, or `Infinity`.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();
    let int_digits = digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    text[..end].parse().ok()
}
