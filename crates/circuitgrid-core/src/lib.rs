//! circuitgrid Core Library
//!
//! Platform-agnostic viewport math, grid model and circuit data for the
//! circuitgrid schematic canvas.

pub mod error;
pub mod grid;
pub mod interaction;
pub mod models;
pub mod viewport;

pub use error::{GridError, GridResult};
pub use grid::{
    DEFAULT_GRID_SPACING, DEFAULT_GRID_TOLERANCE, DEFAULT_MAJOR_INTERVAL, GridLines, GridModel, MAX_LINES_PER_AXIS,
    snap_to_grid,
};
pub use interaction::{InteractionOptions, InteractionState, PointerEvent};
pub use models::{Component, Net, Pin, PinOrientation, PinRef, PinType, Wire};
pub use viewport::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, Viewport, ZOOM_SENSITIVITY};
