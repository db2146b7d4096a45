//! circuitgrid application
//!
//! Session driver tying the surface, viewport, grid and input together,
//! with a browser host on wasm32 and a headless PNG export natively.

mod circuit;
mod config;
mod export;

pub use circuit::Circuit;
pub use config::{CanvasOptions, CircuitOptions, GridOptions, ViewportOptions};
pub use export::{Snapshot, encode_png, render_snapshot};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{CircuitHandle, WebCanvas, WebContext, create_circuit};
