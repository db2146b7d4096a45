//! Placed circuit components.

use super::{ComponentId, Pin, PinId};
use crate::grid::GridModel;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A component placed on the schematic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: ComponentId,
    /// Component kind, e.g. "resistor".
    #[serde(rename = "type")]
    pub kind: String,
    /// Top-left corner in world coordinates.
    pub position: Point,
    pub pins: Vec<Pin>,
    pub bounds: Size,
}

impl Component {
    /// Create a new component with a fresh ID and no pins.
    pub fn new(kind: impl Into<String>, position: Point, bounds: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            position,
            pins: Vec::new(),
            bounds,
        }
    }

    /// Add a pin.
    pub fn with_pin(mut self, pin: Pin) -> Self {
        self.pins.push(pin);
        self
    }

    /// Bounding rectangle in world coordinates.
    pub fn world_bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.bounds)
    }

    /// Look up a pin by ID.
    pub fn pin(&self, id: PinId) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.id == id)
    }

    /// World position of a pin, if it belongs to this component.
    pub fn pin_position(&self, id: PinId) -> Option<Point> {
        self.pin(id).map(|pin| pin.absolute_position(self.position))
    }

    /// Move the component so its top-left corner sits on the nearest grid point.
    pub fn snap_to(&mut self, grid: &GridModel) {
        self.position = grid.snap(self.position);
    }
}
