//! circuitgrid render library
//!
//! Canvas abstraction, HiDPI surface and the grid rendering pass.
//! `raster` provides a software backend used for headless output and tests.

pub mod context;
pub mod raster;
mod renderer;
mod style;
mod surface;

#[cfg(test)]
mod testing;

pub use context::{Canvas2d, Drawable};
pub use raster::{PixelCanvas, PixelContext};
pub use renderer::{GridRenderer, MIN_RENDER_ZOOM, ORIGIN_MARKER_SIZE, RenderContext};
pub use style::{
    DEFAULT_MAJOR_LINE_COLOR, DEFAULT_MAJOR_LINE_WIDTH, DEFAULT_MINOR_LINE_COLOR, DEFAULT_MINOR_LINE_WIDTH,
    DEFAULT_ORIGIN_COLOR, DEFAULT_ORIGIN_LINE_WIDTH, GridRendererStyle, RgbaColor,
};
pub use surface::Surface;
