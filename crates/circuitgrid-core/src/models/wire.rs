//! Wire segments.

use super::{NetId, WireId};
use crate::grid::GridModel;
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight wire segment between two world points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wire {
    pub id: WireId,
    pub start: Point,
    pub end: Point,
    /// Net this wire belongs to, if any.
    pub net_id: Option<NetId>,
}

impl Wire {
    /// Create an unattached wire.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            net_id: None,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn as_line(&self) -> Line {
        Line::new(self.start, self.end)
    }

    /// Copy of this wire with both end points snapped to the grid.
    pub fn snapped(&self, grid: &GridModel) -> Self {
        Self {
            start: grid.snap(self.start),
            end: grid.snap(self.end),
            ..self.clone()
        }
    }
}
