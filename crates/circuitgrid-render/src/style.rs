//! Grid presentation style.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable straight-alpha color: 8-bit channels plus a fractional alpha,
/// matching CSS `rgba()` notation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl RgbaColor {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 1.0)
    }

    /// CSS color string, e.g. `rgba(200,200,200,0.3)`.
    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl From<RgbaColor> for Color {
    fn from(color: RgbaColor) -> Self {
        Color::new([
            f32::from(color.r) / 255.0,
            f32::from(color.g) / 255.0,
            f32::from(color.b) / 255.0,
            color.a.clamp(0.0, 1.0),
        ])
    }
}

impl From<Color> for RgbaColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: color.components[3],
        }
    }
}

pub const DEFAULT_MINOR_LINE_COLOR: RgbaColor = RgbaColor::new(200, 200, 200, 0.3);
pub const DEFAULT_MAJOR_LINE_COLOR: RgbaColor = RgbaColor::new(150, 150, 150, 0.5);
pub const DEFAULT_ORIGIN_COLOR: RgbaColor = RgbaColor::new(255, 0, 0, 0.5);
pub const DEFAULT_MINOR_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_MAJOR_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_ORIGIN_LINE_WIDTH: f64 = 2.0;

/// Grid renderer style. Unset fields fall back to the defaults when drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridRendererStyle {
    pub minor_line_color: Option<RgbaColor>,
    pub major_line_color: Option<RgbaColor>,
    pub origin_color: Option<RgbaColor>,
    pub minor_line_width: Option<f64>,
    pub major_line_width: Option<f64>,
    pub origin_line_width: Option<f64>,
}

impl GridRendererStyle {
    pub fn minor_line_color(&self) -> Color {
        self.minor_line_color.unwrap_or(DEFAULT_MINOR_LINE_COLOR).into()
    }

    pub fn major_line_color(&self) -> Color {
        self.major_line_color.unwrap_or(DEFAULT_MAJOR_LINE_COLOR).into()
    }

    pub fn origin_color(&self) -> Color {
        self.origin_color.unwrap_or(DEFAULT_ORIGIN_COLOR).into()
    }

    pub fn minor_line_width(&self) -> f64 {
        self.minor_line_width.unwrap_or(DEFAULT_MINOR_LINE_WIDTH)
    }

    pub fn major_line_width(&self) -> f64 {
        self.major_line_width.unwrap_or(DEFAULT_MAJOR_LINE_WIDTH)
    }

    pub fn origin_line_width(&self) -> f64 {
        self.origin_line_width.unwrap_or(DEFAULT_ORIGIN_LINE_WIDTH)
    }
}
