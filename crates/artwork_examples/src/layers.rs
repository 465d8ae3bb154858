use std::path::{Path, PathBuf};

use artwork::prelude::{Canvas, ImageCodec, RasterCodec};
use image::{ImageFormat, Rgba, RgbaImage};

/// Procedural shapes used to stand in for hand-drawn trait layers.
#[derive(Debug, Clone, Copy)]
pub enum LayerShape {
    Fill,
    Disc,
    Ring { thickness: u32 },
    Stripes { period: u32 },
}

impl LayerShape {
    fn covers(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        let r = cx.min(cy);
        let d = ((x as f32 + 0.5 - cx).powi(2) + (y as f32 + 0.5 - cy).powi(2)).sqrt();
        match *self {
            LayerShape::Fill => true,
            LayerShape::Disc => d <= r,
            LayerShape::Ring { thickness } => d <= r && d >= r - thickness as f32,
            LayerShape::Stripes { period } => (x / period.max(1)) % 2 == 0,
        }
    }
}

/// Renders `shape` in `color` on a transparent `width`x`height` image and writes it as
/// `<dir>/<name>.png`.
pub fn write_layer(
    dir: &Path,
    name: &str,
    (width, height): (u32, u32),
    shape: LayerShape,
    color: [u8; 4],
) -> anyhow::Result<PathBuf> {
    let pixels = RgbaImage::from_fn(width, height, |x, y| {
        if shape.covers(x, y, width, height) {
            Rgba(color)
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    let canvas = Canvas::from_image(pixels);

    let path = dir.join(format!("{name}.png"));
    std::fs::write(&path, ImageCodec.encode(&canvas, ImageFormat::Png)?)?;
    Ok(path)
}
