//! Native entry point: render one grid frame to a PNG file.
//!
//! ```text
//! circuitgrid [--options FILE] [--width W] [--height H] [--ratio R] OUTPUT.png
//! ```

#[cfg(feature = "native")]
use circuitgrid_app::{CircuitOptions, encode_png, render_snapshot};
#[cfg(feature = "native")]
use clap::Parser;
#[cfg(feature = "native")]
use std::path::PathBuf;

#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "circuitgrid", about = "Render a schematic grid frame to PNG")]
struct Args {
    /// JSON file with circuit options.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Logical width in CSS pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Logical height in CSS pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    ratio: f64,

    /// Output PNG path.
    output: PathBuf,
}

#[cfg(feature = "native")]
fn run(args: &Args) -> Result<(), String> {
    let options = match &args.options {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path.display(), e))?;
            CircuitOptions::from_json(&json).map_err(|e| e.to_string())?
        }
        None => CircuitOptions::default(),
    };

    let snapshot = render_snapshot(&options, kurbo::Size::new(args.width, args.height), args.ratio)
        .map_err(|e| e.to_string())?;
    let png = encode_png(&snapshot.rgba, snapshot.width, snapshot.height).ok_or("PNG encoding failed")?;
    std::fs::write(&args.output, &png).map_err(|e| format!("writing {}: {}", args.output.display(), e))?;

    log::info!(
        "wrote {} ({}x{} px, {} bytes)",
        args.output.display(),
        snapshot.width,
        snapshot.height,
        png.len()
    );
    Ok(())
}

#[cfg(feature = "native")]
fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("circuitgrid: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
