//! Codec boundary for turning encoded bytes into canvases and back.
//!
//! Implement [`RasterCodec`] to plug in another decoder; [`ImageCodec`] covers the
//! formats supported by the `image` crate.
use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::error::Result;
use crate::raster::Canvas;

/// Decodes and encodes raster surfaces. The format tag is [`image::ImageFormat`].
pub trait RasterCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<(Canvas, ImageFormat)>;

    fn encode(&self, canvas: &Canvas, format: ImageFormat) -> Result<Vec<u8>>;
}

/// [`RasterCodec`] backed by the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCodec;

impl RasterCodec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<(Canvas, ImageFormat)> {
        let format = image::guess_format(bytes)?;
        let decoded = image::load_from_memory_with_format(bytes, format)?;
        Ok((Canvas::from_image(decoded.to_rgba8()), format))
    }

    fn encode(&self, canvas: &Canvas, format: ImageFormat) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(canvas.pixels().clone()).write_to(&mut out, format)?;
        Ok(out.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;
    use image::Rgba;

    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn png_survives_codec() {
        let mut canvas = Canvas::new(Rect::from_size(3, 2));
        let dot = Canvas::filled(Rect::from_size(1, 1), Rgba([10, 20, 30, 255]));
        canvas.draw(&dot, IVec2::new(2, 1), crate::raster::BlendMode::Over);

        let codec = ImageCodec;
        let bytes = codec.encode(&canvas, ImageFormat::Png).expect("encode");
        let (decoded, format) = codec.decode(&bytes).expect("decode");

        assert_eq!(format, ImageFormat::Png);
        assert_eq!(decoded.bounds(), Rect::from_size(3, 2));
        assert_eq!(
            decoded.get_pixel(IVec2::new(2, 1)),
            Some(Rgba([10, 20, 30, 255]))
        );
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(ImageCodec.decode(b"definitely not an image").is_err());
    }
}
