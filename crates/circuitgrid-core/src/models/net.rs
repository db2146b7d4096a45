//! Nets: sets of wires and the pins they join.

use super::{ComponentId, NetId, PinId, Wire};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a pin on a specific component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRef {
    pub component_id: ComponentId,
    pub pin_id: PinId,
}

/// An electrically connected group of wires and pins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Net {
    pub id: NetId,
    pub name: String,
    pub wires: Vec<Wire>,
    pub connected_pins: Vec<PinRef>,
}

impl Net {
    /// Create an empty net.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            wires: Vec::new(),
            connected_pins: Vec::new(),
        }
    }

    /// Add a wire, tagging it with this net's ID.
    pub fn add_wire(&mut self, mut wire: Wire) {
        wire.net_id = Some(self.id);
        self.wires.push(wire);
    }

    /// Record a pin as part of this net. Duplicates are ignored.
    pub fn connect_pin(&mut self, pin: PinRef) {
        if !self.connected_pins.contains(&pin) {
            self.connected_pins.push(pin);
        }
    }

    pub fn is_connected(&self, pin: &PinRef) -> bool {
        self.connected_pins.contains(pin)
    }
}
