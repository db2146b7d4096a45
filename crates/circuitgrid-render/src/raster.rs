//! Software raster backend.
//!
//! `PixelCanvas` stands in for a browser canvas element and `PixelContext` for
//! its 2D context. Both share one `tiny_skia::Pixmap` the way an element and
//! its context share a backing store.

use crate::context::{Canvas2d, Drawable};
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;
use std::cell::RefCell;
use std::rc::Rc;
use tiny_skia::{BlendMode, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Shared backing store. `None` while the backing size is zero.
type Backing = Rc<RefCell<Option<Pixmap>>>;

fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.components;
    tiny_skia::Color::from_rgba(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0), a.clamp(0.0, 1.0))
        .unwrap_or(tiny_skia::Color::BLACK)
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    let rect = rect.abs();
    tiny_skia::Rect::from_ltrb(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32)
}

/// Headless stand-in for a canvas element.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    logical_size: Size,
    device_pixel_ratio: f64,
    display_size: Size,
    backing: Backing,
}

impl PixelCanvas {
    /// Create a canvas that reports the given layout size and pixel ratio.
    pub fn new(logical_size: Size, device_pixel_ratio: f64) -> Self {
        Self {
            logical_size,
            device_pixel_ratio,
            display_size: Size::ZERO,
            backing: Rc::default(),
        }
    }

    /// Simulate the host layout changing size or moving to another display.
    pub fn set_host_size(&mut self, logical_size: Size, device_pixel_ratio: f64) {
        self.logical_size = logical_size;
        self.device_pixel_ratio = device_pixel_ratio;
    }

    /// Size last pinned by the surface.
    pub fn display_size(&self) -> Size {
        self.display_size
    }

    /// Backing store size in device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.backing
            .borrow()
            .as_ref()
            .map_or((0, 0), |pixmap| (pixmap.width(), pixmap.height()))
    }

    /// Straight-alpha RGBA at a pixel, or `None` outside the backing store.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let backing = self.backing.borrow();
        let color = backing.as_ref()?.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Copy the backing store out as straight-alpha RGBA8, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let backing = self.backing.borrow();
        let Some(pixmap) = backing.as_ref() else {
            return Vec::new();
        };
        pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect()
    }
}

impl Drawable for PixelCanvas {
    type Context = PixelContext;

    fn context_2d(&self) -> Option<PixelContext> {
        Some(PixelContext::new(Rc::clone(&self.backing)))
    }

    fn logical_size(&self) -> Size {
        self.logical_size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        let pixmap = Pixmap::new(width, height);
        if pixmap.is_none() && width > 0 && height > 0 {
            log::warn!("could not allocate a {}x{} backing store", width, height);
        }
        *self.backing.borrow_mut() = pixmap;
    }

    fn set_display_size(&mut self, size: Size) {
        self.display_size = size;
    }
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Affine,
    fill: Color,
    stroke: Color,
    line_width: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
        }
    }
}

/// Path verbs recorded in device space.
#[derive(Debug, Clone, Copy)]
enum Segment {
    Move(Point),
    Line(Point),
}

/// 2D context over a [`PixelCanvas`] backing store.
#[derive(Debug)]
pub struct PixelContext {
    backing: Backing,
    state: DrawState,
    stack: Vec<DrawState>,
    path: Vec<Segment>,
}

impl PixelContext {
    fn new(backing: Backing) -> Self {
        Self {
            backing,
            state: DrawState::default(),
            stack: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Current transform, for inspection.
    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint {
            anti_alias: true,
            ..Paint::default()
        };
        paint.set_color(to_skia_color(color));
        paint
    }

    fn build_path(&self) -> Option<tiny_skia::Path> {
        let mut builder = PathBuilder::new();
        for segment in &self.path {
            match *segment {
                Segment::Move(p) => builder.move_to(p.x as f32, p.y as f32),
                Segment::Line(p) => builder.line_to(p.x as f32, p.y as f32),
            }
        }
        builder.finish()
    }
}

impl Canvas2d for PixelContext {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state.transform = transform;
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform = self.state.transform * Affine::scale_non_uniform(sx, sy);
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Some(rect) = to_skia_rect(rect) else {
            return;
        };
        let paint = Paint {
            blend_mode: BlendMode::Clear,
            anti_alias: false,
            ..Paint::default()
        };
        if let Some(pixmap) = self.backing.borrow_mut().as_mut() {
            pixmap.fill_rect(rect, &paint, to_skia_transform(self.state.transform), None);
        }
    }

    fn fill_rect(&mut self, rect: Rect) {
        let Some(rect) = to_skia_rect(rect) else {
            return;
        };
        let paint = Self::paint(self.state.fill);
        if let Some(pixmap) = self.backing.borrow_mut().as_mut() {
            pixmap.fill_rect(rect, &paint, to_skia_transform(self.state.transform), None);
        }
    }

    fn set_fill_style(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        // Canvas ignores non-positive and non-finite widths.
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Point) {
        self.path.push(Segment::Move(self.state.transform * point));
    }

    fn line_to(&mut self, point: Point) {
        let device = self.state.transform * point;
        // A line_to with no current point acts as move_to.
        if self.path.is_empty() {
            self.path.push(Segment::Move(device));
        } else {
            self.path.push(Segment::Line(device));
        }
    }

    fn stroke(&mut self) {
        let Some(path) = self.build_path() else {
            return;
        };
        // Points are already in device space, so only the width is scaled.
        let width = self.state.line_width * self.state.transform.determinant().abs().sqrt();
        let stroke = Stroke {
            width: width as f32,
            ..Stroke::default()
        };
        let paint = Self::paint(self.state.stroke);
        if let Some(pixmap) = self.backing.borrow_mut().as_mut() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn opaque_surface(width: f64, height: f64, ratio: f64) -> Surface<PixelCanvas> {
        let mut surface = Surface::new(PixelCanvas::new(Size::new(width, height), ratio)).unwrap();
        surface.fill(Color::WHITE);
        surface
    }

    fn assert_pixel(surface: &Surface<PixelCanvas>, x: u32, y: u32, expected: [u8; 4]) {
        let actual = surface.element().pixel(x, y).unwrap();
        for (a, e) in actual.iter().zip(expected) {
            assert!(a.abs_diff(e) <= 2, "pixel ({}, {}) is {:?}, expected {:?}", x, y, actual, expected);
        }
    }

    #[test]
    fn test_backing_store_follows_ratio() {
        let surface = opaque_surface(50.0, 20.0, 2.0);
        let canvas = surface.element();
        assert_eq!(canvas.pixel_size(), (100, 40));
        assert_eq!(canvas.pixel(99, 39), Some(WHITE));
        assert_eq!(canvas.pixel(100, 0), None);
        assert_eq!(canvas.to_rgba().len(), 100 * 40 * 4);
    }

    #[test]
    fn test_zero_backing_size_has_no_pixels() {
        let mut canvas = PixelCanvas::new(Size::new(10.0, 10.0), 1.0);
        canvas.set_backing_size(0, 10);
        assert_eq!(canvas.pixel_size(), (0, 0));
        assert!(canvas.to_rgba().is_empty());

        let mut ctx = canvas.context_2d().unwrap();
        ctx.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(canvas.pixel(0, 0), None);
    }

    #[test]
    fn test_clear_makes_transparent() {
        let mut surface = opaque_surface(10.0, 10.0, 1.0);
        surface.clear();
        assert_eq!(surface.element().pixel(5, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_pixel_aligned_vertical_stroke() {
        let mut surface = opaque_surface(20.0, 20.0, 1.0);
        let ctx = surface.context_mut();
        ctx.set_stroke_style(Color::from_rgba8(255, 0, 0, 255));
        ctx.begin_path();
        ctx.move_to(Point::new(5.5, 0.0));
        ctx.line_to(Point::new(5.5, 20.0));
        ctx.stroke();

        assert_pixel(&surface, 5, 10, RED);
        assert_pixel(&surface, 4, 10, WHITE);
        assert_pixel(&surface, 6, 10, WHITE);
    }

    #[test]
    fn test_stroke_straddling_pixels_is_antialiased() {
        let mut surface = opaque_surface(20.0, 20.0, 1.0);
        let ctx = surface.context_mut();
        ctx.set_stroke_style(Color::from_rgba8(0, 0, 0, 255));
        ctx.begin_path();
        ctx.move_to(Point::new(0.0, 10.0));
        ctx.line_to(Point::new(20.0, 10.0));
        ctx.stroke();

        let canvas = surface.element();
        let above = canvas.pixel(3, 9).unwrap();
        let below = canvas.pixel(3, 10).unwrap();
        assert!(above[0].abs_diff(below[0]) <= 2);
        assert!(above[0] > 100 && above[0] < 155);
    }

    #[test]
    fn test_ratio_scales_strokes() {
        let mut surface = opaque_surface(10.0, 10.0, 2.0);
        let ctx = surface.context_mut();
        ctx.set_stroke_style(Color::from_rgba8(255, 0, 0, 255));
        ctx.begin_path();
        ctx.move_to(Point::new(2.5, 0.0));
        ctx.line_to(Point::new(2.5, 10.0));
        ctx.stroke();

        // Logical x 2.5 with width 1 covers device pixels 4 and 5.
        assert_pixel(&surface, 4, 7, RED);
        assert_pixel(&surface, 5, 7, RED);
        assert_pixel(&surface, 3, 7, WHITE);
        assert_pixel(&surface, 6, 7, WHITE);
    }

    #[test]
    fn test_line_to_without_current_point_moves() {
        let mut surface = opaque_surface(10.0, 10.0, 1.0);
        let ctx = surface.context_mut();
        ctx.set_stroke_style(Color::from_rgba8(255, 0, 0, 255));
        ctx.begin_path();
        ctx.line_to(Point::new(5.5, 2.0));
        ctx.line_to(Point::new(5.5, 8.0));
        ctx.stroke();

        assert_pixel(&surface, 5, 5, RED);
        // Nothing is drawn from the origin.
        assert_pixel(&surface, 2, 1, WHITE);
    }

    #[test]
    fn test_save_restore_scopes_state() {
        let mut surface = opaque_surface(10.0, 10.0, 1.0);
        let ctx = surface.context_mut();
        let before = ctx.transform();
        ctx.save();
        ctx.scale(3.0, 3.0);
        ctx.set_line_width(7.0);
        ctx.restore();
        assert_eq!(ctx.transform(), before);
        assert!((ctx.state.line_width - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_repeated_resize_does_not_compound() {
        let mut surface = opaque_surface(10.0, 10.0, 2.0);
        surface.resize();
        surface.resize();
        assert_eq!(surface.context_mut().transform(), Affine::scale(2.0));
    }

    #[test]
    fn test_diagonal_stroke() {
        let mut surface = opaque_surface(10.0, 10.0, 1.0);
        let ctx = surface.context_mut();
        ctx.set_stroke_style(Color::from_rgba8(255, 0, 0, 255));
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(Point::new(1.5, 1.5));
        ctx.line_to(Point::new(8.5, 8.5));
        ctx.stroke();

        assert_pixel(&surface, 2, 2, RED);
        assert_pixel(&surface, 5, 5, RED);
        assert_pixel(&surface, 8, 1, WHITE);
    }
}
