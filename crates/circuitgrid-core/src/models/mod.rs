//! Circuit data models.
//!
//! These are plain data carried alongside the canvas. Nothing here draws or
//! edits; the grid subsystem only supplies snapping for them.

mod component;
mod net;
mod pin;
mod wire;

pub use component::Component;
pub use net::{Net, PinRef};
pub use pin::{Pin, PinOrientation, PinType};
pub use wire::Wire;

use uuid::Uuid;

/// Unique identifier for components.
pub type ComponentId = Uuid;

/// Unique identifier for pins (unique within their component).
pub type PinId = Uuid;

/// Unique identifier for nets.
pub type NetId = Uuid;

/// Unique identifier for wires.
pub type WireId = Uuid;
