//! Viewport module for pan/zoom transforms between screen and world space.

use crate::error::{GridError, GridResult};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default lower zoom bound.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;

/// Default upper zoom bound.
pub const DEFAULT_MAX_ZOOM: f64 = 10.0;

/// Exponent per unit of wheel delta used by [`Viewport::zoom_at`].
pub const ZOOM_SENSITIVITY: f64 = 0.001;

/// Viewport manages the view transform for the canvas.
///
/// The offset is expressed in world units: it is the world point that lands
/// on the screen origin. Zoom is the number of screen pixels per world unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewportState")]
pub struct Viewport {
    offset: Vec2,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

/// Unchecked serialized form; limits and zoom are validated on the way in.
#[derive(Deserialize)]
struct ViewportState {
    offset: Vec2,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl TryFrom<ViewportState> for Viewport {
    type Error = GridError;

    fn try_from(state: ViewportState) -> GridResult<Self> {
        let mut viewport = Viewport::with_zoom_limits(state.min_zoom, state.max_zoom)?;
        if !(state.zoom >= viewport.min_zoom && state.zoom <= viewport.max_zoom) {
            return Err(GridError::InvalidConfiguration(format!(
                "zoom {} outside [{}, {}]",
                state.zoom, viewport.min_zoom, viewport.max_zoom
            )));
        }
        if !(state.offset.x.is_finite() && state.offset.y.is_finite()) {
            return Err(GridError::InvalidConfiguration(format!(
                "offset must be finite, got {:?}",
                state.offset
            )));
        }
        viewport.offset = state.offset;
        viewport.zoom = state.zoom;
        Ok(viewport)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl Viewport {
    /// Create a new viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport with custom zoom limits.
    ///
    /// Limits must be finite, positive and ordered.
    pub fn with_zoom_limits(min_zoom: f64, max_zoom: f64) -> GridResult<Self> {
        let valid = min_zoom.is_finite() && max_zoom.is_finite() && min_zoom > 0.0 && min_zoom <= max_zoom;
        if !valid {
            return Err(GridError::InvalidConfiguration(format!(
                "zoom limits must satisfy 0 < min <= max, got [{}, {}]",
                min_zoom, max_zoom
            )));
        }
        Ok(Self {
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            ..Self::default()
        })
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current offset (world point at the screen origin).
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Lower zoom bound.
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    /// Upper zoom bound.
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(-self.offset)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(1.0 / self.zoom)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Point::new(
            screen_point.x / self.zoom + self.offset.x,
            screen_point.y / self.zoom + self.offset.y,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        Point::new(
            (world_point.x - self.offset.x) * self.zoom,
            (world_point.y - self.offset.y) * self.zoom,
        )
    }

    /// Pan the viewport by a delta in screen coordinates.
    ///
    /// The delta is divided by zoom so a drag moves the content exactly as far
    /// as the cursor at any zoom level.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta / self.zoom;
    }

    /// Set the offset directly.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Set the zoom factor, clamped to the viewport limits.
    ///
    /// NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            log::warn!("ignoring NaN zoom");
            return;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Zoom exponentially by a wheel delta, keeping the given world point fixed
    /// on screen.
    ///
    /// The offset correction uses the ratio of the clamped zoom to the old
    /// zoom, so at a zoom limit further input changes nothing.
    pub fn zoom_at(&mut self, world_point: Point, delta: f64) {
        if delta.is_nan() {
            return;
        }
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * (delta * ZOOM_SENSITIVITY).exp()).clamp(self.min_zoom, self.max_zoom);
        let ratio = new_zoom / old_zoom;

        self.zoom = new_zoom;
        self.offset = Vec2::new(
            world_point.x - (world_point.x - self.offset.x) / ratio,
            world_point.y - (world_point.y - self.offset.y) / ratio,
        );
    }

    /// World rectangle covered by a surface of the given logical size.
    pub fn visible_world_bounds(&self, size: Size) -> Rect {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(size.width, size.height));
        Rect::from_points(top_left, bottom_right)
    }

    /// Reset viewport to the origin at 100% zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
    }

    /// Fit the viewport to show the given world bounding box.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        if bounds.is_zero_area() {
            self.reset();
            return;
        }

        let padded_viewport = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );

        let scale_x = padded_viewport.width / bounds.width();
        let scale_y = padded_viewport.height / bounds.height();
        self.set_zoom(scale_x.min(scale_y));

        // Center the bounds in the viewport
        let bounds_center = bounds.center();
        self.offset = Vec2::new(
            bounds_center.x - viewport.width / (2.0 * self.zoom),
            bounds_center.y - viewport.height / (2.0 * self.zoom),
        );
    }
}
