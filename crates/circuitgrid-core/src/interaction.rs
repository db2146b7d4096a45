//! Pointer and wheel handling that drives the viewport.

use crate::viewport::Viewport;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Which interactions are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionOptions {
    /// Drag to pan.
    pub pan: bool,
    /// Wheel to zoom.
    pub zoom: bool,
    /// Zoom in on wheel-down instead of wheel-up.
    pub invert_wheel: bool,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            pan: true,
            zoom: true,
            invert_wheel: false,
        }
    }
}

/// Pointer event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Button pressed. `position` may be in any space consistent with `Move`.
    Down { position: Point },
    /// Pointer moved.
    Move { position: Point },
    /// Button released, anywhere.
    Up,
    /// Wheel turned over the surface. `position` is surface-relative screen space.
    Wheel { position: Point, delta_y: f64 },
}

/// Drag state between pointer events.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    options: InteractionOptions,
    dragging: bool,
    last_position: Point,
}

impl InteractionState {
    pub fn new(options: InteractionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> InteractionOptions {
        self.options
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply an event to the viewport. Returns whether the viewport changed.
    pub fn handle_pointer_event(&mut self, event: PointerEvent, viewport: &mut Viewport) -> bool {
        match event {
            PointerEvent::Down { position } => {
                if self.options.pan {
                    self.dragging = true;
                    self.last_position = position;
                }
                false
            }
            PointerEvent::Move { position } => {
                if !self.options.pan || !self.dragging {
                    return false;
                }
                let delta = position - self.last_position;
                self.last_position = position;
                // Content follows the cursor, so the view moves the other way.
                viewport.pan(-delta);
                delta != Vec2::ZERO
            }
            PointerEvent::Up => {
                self.dragging = false;
                false
            }
            PointerEvent::Wheel { position, delta_y } => {
                if !self.options.zoom {
                    return false;
                }
                let world = viewport.screen_to_world(position);
                let delta = if self.options.invert_wheel { delta_y } else { -delta_y };
                viewport.zoom_at(world, delta);
                true
            }
        }
    }
}
