//! Grid rendering pass.

use crate::context::{Canvas2d, Drawable};
use crate::style::GridRendererStyle;
use crate::surface::Surface;
use circuitgrid_core::{GridModel, GridResult, Viewport};
use kurbo::{Point, Size, Vec2};

/// Below this zoom the grid is too dense to be useful and is not drawn.
pub const MIN_RENDER_ZOOM: f64 = 0.1;

/// Half-length of each origin crosshair arm, in screen pixels.
pub const ORIGIN_MARKER_SIZE: f64 = 10.0;

/// Borrowed state for a single render frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub viewport: &'a Viewport,
    pub grid: &'a GridModel,
}

impl<'a> RenderContext<'a> {
    pub fn new(viewport: &'a Viewport, grid: &'a GridModel) -> Self {
        Self { viewport, grid }
    }
}

/// Draws minor lines, major lines and the origin marker in screen space.
#[derive(Debug, Clone, Default)]
pub struct GridRenderer {
    style: GridRendererStyle,
}

/// Line positions for one frame, split by class and already in screen space.
struct FrameLines {
    minor_x: Vec<f64>,
    minor_y: Vec<f64>,
    major_x: Vec<f64>,
    major_y: Vec<f64>,
}

impl GridRenderer {
    pub fn new(style: GridRendererStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &GridRendererStyle {
        &self.style
    }

    /// Replace the whole style. Fields left unset revert to defaults.
    pub fn set_style(&mut self, style: GridRendererStyle) {
        self.style = style;
    }

    /// Draw one frame of the grid onto `surface`.
    ///
    /// Configuration errors are reported before anything is drawn. Drawing
    /// state is saved and restored around the pass.
    pub fn render<E: Drawable>(&self, surface: &mut Surface<E>, ctx: &RenderContext<'_>) -> GridResult<()> {
        let zoom = ctx.viewport.zoom();
        if zoom < MIN_RENDER_ZOOM {
            log::trace!("grid skipped at zoom {}", zoom);
            return Ok(());
        }

        let size = surface.size();
        let lines = Self::frame_lines(ctx, size)?;
        let origin = ctx.viewport.world_to_screen(Point::ZERO);
        let canvas = surface.context_mut();

        canvas.save();

        canvas.set_stroke_style(self.style.minor_line_color());
        canvas.set_line_width(self.style.minor_line_width());
        stroke_lines(canvas, &lines.minor_x, &lines.minor_y, size);

        canvas.set_stroke_style(self.style.major_line_color());
        canvas.set_line_width(self.style.major_line_width());
        stroke_lines(canvas, &lines.major_x, &lines.major_y, size);

        self.stroke_origin(canvas, origin);

        canvas.restore();
        Ok(())
    }

    fn frame_lines(ctx: &RenderContext<'_>, size: Size) -> GridResult<FrameLines> {
        let bounds = ctx.viewport.visible_world_bounds(size);
        let world = ctx.grid.grid_lines_in_bounds(bounds)?;

        let mut lines = FrameLines {
            minor_x: Vec::new(),
            minor_y: Vec::new(),
            major_x: Vec::new(),
            major_y: Vec::new(),
        };
        for x in world.vertical {
            let screen_x = ctx.viewport.world_to_screen(Point::new(x, 0.0)).x;
            if ctx.grid.is_major(x)? {
                lines.major_x.push(screen_x);
            } else {
                lines.minor_x.push(screen_x);
            }
        }
        for y in world.horizontal {
            let screen_y = ctx.viewport.world_to_screen(Point::new(0.0, y)).y;
            if ctx.grid.is_major(y)? {
                lines.major_y.push(screen_y);
            } else {
                lines.minor_y.push(screen_y);
            }
        }
        Ok(lines)
    }

    fn stroke_origin<C: Canvas2d>(&self, canvas: &mut C, origin: Point) {
        let arm_x = Vec2::new(ORIGIN_MARKER_SIZE, 0.0);
        let arm_y = Vec2::new(0.0, ORIGIN_MARKER_SIZE);

        canvas.set_stroke_style(self.style.origin_color());
        canvas.set_line_width(self.style.origin_line_width());
        canvas.begin_path();
        canvas.move_to(origin - arm_x);
        canvas.line_to(origin + arm_x);
        canvas.move_to(origin - arm_y);
        canvas.line_to(origin + arm_y);
        canvas.stroke();
    }
}

/// Stroke full-height vertical and full-width horizontal lines, one path each.
fn stroke_lines<C: Canvas2d>(canvas: &mut C, xs: &[f64], ys: &[f64], size: Size) {
    for &x in xs {
        canvas.begin_path();
        canvas.move_to(Point::new(x, 0.0));
        canvas.line_to(Point::new(x, size.height));
        canvas.stroke();
    }
    for &y in ys {
        canvas.begin_path();
        canvas.move_to(Point::new(0.0, y));
        canvas.line_to(Point::new(size.width, y));
        canvas.stroke();
    }
}
