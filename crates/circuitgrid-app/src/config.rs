//! Session options, loadable from JSON.

use circuitgrid_core::{
    DEFAULT_GRID_SPACING, DEFAULT_MAJOR_INTERVAL, GridModel, GridResult, InteractionOptions,
};
use circuitgrid_render::{GridRendererStyle, RgbaColor};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Everything needed to start a [`crate::Circuit`]. Every field is optional in JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircuitOptions {
    pub canvas: CanvasOptions,
    pub grid: GridOptions,
    pub viewport: ViewportOptions,
    pub interaction: InteractionOptions,
}

impl CircuitOptions {
    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasOptions {
    /// CSS class added to the created `<canvas>`.
    pub class_name: Option<String>,
    /// Painted under the grid every frame.
    pub background_color: RgbaColor,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            class_name: None,
            background_color: RgbaColor::white(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptions {
    pub spacing: f64,
    pub major_interval: u32,
    pub style: GridRendererStyle,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_GRID_SPACING,
            major_interval: DEFAULT_MAJOR_INTERVAL,
            style: GridRendererStyle::default(),
        }
    }
}

impl GridOptions {
    /// Grid model described by these options. Not validated.
    pub fn model(&self) -> GridModel {
        GridModel::new(self.spacing, self.major_interval)
    }
}

/// Initial camera. Unset values keep the viewport defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportOptions {
    pub offset: Option<Vec2>,
    pub zoom: Option<f64>,
}
