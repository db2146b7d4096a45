//! HiDPI-aware drawing surface.

use crate::context::{Canvas2d, Drawable};
use circuitgrid_core::{GridError, GridResult};
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;

/// A drawable element plus its 2D context, sized for the display's pixel ratio.
///
/// All geometry above this layer is in logical pixels; the context carries a
/// single `scale(ratio)` so logical coordinates land on the right physical
/// pixels.
pub struct Surface<E: Drawable> {
    element: E,
    context: E::Context,
    logical_size: Size,
    pixel_width: u32,
    pixel_height: u32,
    device_pixel_ratio: f64,
}

impl<E: Drawable> Surface<E> {
    /// Wrap an element, acquiring its 2D context and sizing it immediately.
    pub fn new(element: E) -> GridResult<Self> {
        let context = element
            .context_2d()
            .ok_or_else(|| GridError::Initialization("failed to get 2D context".to_string()))?;

        let mut surface = Self {
            element,
            context,
            logical_size: Size::ZERO,
            pixel_width: 0,
            pixel_height: 0,
            device_pixel_ratio: 1.0,
        };
        surface.resize();
        Ok(surface)
    }

    /// Re-read the element's size and pixel ratio and rebuild the backing store.
    ///
    /// The context transform is reset first, so repeated calls never compound
    /// the ratio scale.
    pub fn resize(&mut self) {
        let ratio = self.element.device_pixel_ratio();
        let ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
        let reported = self.element.logical_size();
        let logical = Size::new(reported.width.max(0.0), reported.height.max(0.0));

        self.context.set_transform(Affine::IDENTITY);

        // Float-to-int casts saturate, matching how a canvas truncates its size.
        let pixel_width = (logical.width * ratio) as u32;
        let pixel_height = (logical.height * ratio) as u32;
        self.element.set_backing_size(pixel_width, pixel_height);

        self.context.scale(ratio, ratio);
        self.element.set_display_size(logical);

        self.logical_size = logical;
        self.pixel_width = pixel_width;
        self.pixel_height = pixel_height;
        self.device_pixel_ratio = ratio;

        log::debug!(
            "surface resized: {}x{} logical @ {} -> {}x{} px",
            logical.width,
            logical.height,
            ratio,
            pixel_width,
            pixel_height
        );
    }

    /// Erase the whole logical area.
    pub fn clear(&mut self) {
        self.context.clear_rect(self.bounds());
    }

    /// Paint the whole logical area with one color.
    pub fn fill(&mut self, color: Color) {
        self.context.set_fill_style(color);
        self.context.fill_rect(self.bounds());
    }

    /// Logical width.
    pub fn width(&self) -> f64 {
        self.logical_size.width
    }

    /// Logical height.
    pub fn height(&self) -> f64 {
        self.logical_size.height
    }

    pub fn size(&self) -> Size {
        self.logical_size
    }

    /// Logical area as a rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.logical_size)
    }

    /// Backing store size in physical pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn context_mut(&mut self) -> &mut E::Context {
        &mut self.context
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// Give the element back for teardown.
    pub fn into_element(self) -> E {
        self.element
    }
}
