//! Component pins.

use super::PinId;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signal direction of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinType {
    Input,
    Output,
}

/// Direction a pin points away from its component, in clockwise degrees
/// (screen y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum PinOrientation {
    #[default]
    Right,
    Down,
    Left,
    Up,
}

impl PinOrientation {
    /// Rotation in degrees: 0, 90, 180 or 270.
    pub fn degrees(self) -> u16 {
        match self {
            PinOrientation::Right => 0,
            PinOrientation::Down => 90,
            PinOrientation::Left => 180,
            PinOrientation::Up => 270,
        }
    }

    /// Parse a rotation in degrees. Only exact quarter turns are accepted.
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(PinOrientation::Right),
            90 => Some(PinOrientation::Down),
            180 => Some(PinOrientation::Left),
            270 => Some(PinOrientation::Up),
            _ => None,
        }
    }

    /// Unit vector the pin points along.
    pub fn direction(self) -> Vec2 {
        match self {
            PinOrientation::Right => Vec2::new(1.0, 0.0),
            PinOrientation::Down => Vec2::new(0.0, 1.0),
            PinOrientation::Left => Vec2::new(-1.0, 0.0),
            PinOrientation::Up => Vec2::new(0.0, -1.0),
        }
    }
}

impl From<PinOrientation> for u16 {
    fn from(orientation: PinOrientation) -> Self {
        orientation.degrees()
    }
}

impl TryFrom<u16> for PinOrientation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        PinOrientation::from_degrees(degrees).ok_or_else(|| format!("pin orientation must be 0, 90, 180 or 270, got {}", degrees))
    }
}

/// A connection point on a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    pub id: PinId,
    /// Display name, e.g. "VCC".
    pub name: String,
    /// Package pin number, kept as text ("1", "A3").
    pub number: String,
    #[serde(rename = "type")]
    pub pin_type: PinType,
    /// Position relative to the owning component's top-left corner.
    pub position: Point,
    pub orientation: PinOrientation,
}

impl Pin {
    /// Create a new pin with a fresh ID.
    pub fn new(name: impl Into<String>, number: impl Into<String>, pin_type: PinType, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            number: number.into(),
            pin_type,
            position,
            orientation: PinOrientation::default(),
        }
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: PinOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// World position of this pin given its component's top-left corner.
    pub fn absolute_position(&self, component_position: Point) -> Point {
        component_position + self.position.to_vec2()
    }
}
