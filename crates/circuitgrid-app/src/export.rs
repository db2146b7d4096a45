//! Headless rendering to PNG.

use crate::circuit::Circuit;
use crate::config::CircuitOptions;
use circuitgrid_core::GridResult;
use circuitgrid_render::PixelCanvas;
use kurbo::Size;

/// One rendered frame as straight-alpha RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Render a single frame of a session at the given logical size and pixel ratio.
pub fn render_snapshot(options: &CircuitOptions, size: Size, device_pixel_ratio: f64) -> GridResult<Snapshot> {
    let mut circuit = Circuit::new(PixelCanvas::new(size, device_pixel_ratio), options)?;
    circuit.render_once()?;

    let canvas = circuit.into_element();
    let (width, height) = canvas.pixel_size();
    Ok(Snapshot {
        width,
        height,
        rgba: canvas.to_rgba(),
    })
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = match encoder.write_header() {
            Ok(w) => w,
            Err(e) => {
                log::error!("Failed to write PNG header: {:?}", e);
                return None;
            }
        };

        if let Err(e) = writer.write_image_data(rgba_data) {
            log::error!("Failed to write PNG data: {:?}", e);
            return None;
        }
    }

    Some(png_data)
}
