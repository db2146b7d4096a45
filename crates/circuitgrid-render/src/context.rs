//! Host drawing abstractions.
//!
//! A [`Drawable`] is the element a surface lives on (a `<canvas>` in the
//! browser, a pixel buffer natively). A [`Canvas2d`] is its immediate-mode 2D
//! context. Both follow the HTML canvas model: a current transform, a
//! save/restore stack, and paths stroked with the current stroke style.

use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;

/// Immediate-mode 2D drawing context.
pub trait Canvas2d {
    /// Push the current drawing state.
    fn save(&mut self);

    /// Pop the drawing state pushed by the matching [`Canvas2d::save`].
    fn restore(&mut self);

    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);

    /// Post-multiply the current transform by a scale.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Erase a rectangle to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Fill a rectangle with the current fill style.
    fn fill_rect(&mut self, rect: Rect);

    fn set_fill_style(&mut self, color: Color);

    fn set_stroke_style(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);

    /// Start a new, empty path.
    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    /// Stroke the current path with the current stroke style and line width.
    fn stroke(&mut self);
}

/// Host element backing a drawing surface.
pub trait Drawable {
    /// Context type handed out by [`Drawable::context_2d`].
    type Context: Canvas2d;

    /// Acquire the 2D context, or `None` if the element cannot provide one.
    fn context_2d(&self) -> Option<Self::Context>;

    /// Current layout size in logical (CSS) pixels.
    fn logical_size(&self) -> Size;

    /// Physical pixels per logical pixel on the current display.
    fn device_pixel_ratio(&self) -> f64;

    /// Resize the backing pixel store. Existing content is discarded.
    fn set_backing_size(&mut self, width: u32, height: u32);

    /// Pin the element's displayed size so a larger backing store is shown
    /// downscaled instead of stretching the layout.
    fn set_display_size(&mut self, _size: Size) {}
}
