//! Raster surfaces for compositing.
//!
//! A [`Canvas`] is an RGBA8 pixel grid anchored at an arbitrary integer origin, so its
//! [`Canvas::bounds`] may start anywhere in the plane. Canvases grow by union with
//! [`grow_image`]; they never shrink.
use glam::IVec2;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::geometry::Rect;

pub mod codec;

pub use codec::{ImageCodec, RasterCodec};

/// Compositing rule for [`Canvas::draw`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Source pixels are alpha-blended over the destination.
    #[default]
    Over,
    /// Source pixels overwrite the destination.
    Replace,
}

/// A 2D RGBA8 surface with integer-addressed pixels and a bounding rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    origin: IVec2,
    pixels: RgbaImage,
}

impl Canvas {
    /// Creates a transparent canvas covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        let bounds = bounds.canon();
        Self {
            origin: bounds.min,
            pixels: RgbaImage::new(bounds.width() as u32, bounds.height() as u32),
        }
    }

    /// Wraps decoded pixels, anchored at the origin.
    pub fn from_image(pixels: RgbaImage) -> Self {
        Self {
            origin: IVec2::ZERO,
            pixels,
        }
    }

    /// Wraps decoded pixels, anchored at `origin`.
    pub fn from_image_at(origin: IVec2, pixels: RgbaImage) -> Self {
        Self { origin, pixels }
    }

    /// Creates a canvas of `bounds` filled with a single color.
    pub fn filled(bounds: Rect, color: Rgba<u8>) -> Self {
        let bounds = bounds.canon();
        Self {
            origin: bounds.min,
            pixels: RgbaImage::from_pixel(bounds.width() as u32, bounds.height() as u32, color),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(
            self.origin,
            IVec2::new(self.pixels.width() as i32, self.pixels.height() as i32),
        )
    }

    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    pub fn is_empty(&self) -> bool {
        self.bounds().is_empty()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Pixel at an absolute point, or `None` outside [`Canvas::bounds`].
    pub fn get_pixel(&self, at: IVec2) -> Option<Rgba<u8>> {
        let local = at.as_i64vec2() - self.origin.as_i64vec2();
        let x = u32::try_from(local.x).ok()?;
        let y = u32::try_from(local.y).ok()?;
        self.pixels.get_pixel_checked(x, y).copied()
    }

    /// Draws `src` so that its top-left pixel lands at the absolute point `at`. Parts of
    /// `src` outside this canvas are clipped.
    pub fn draw(&mut self, src: &Canvas, at: IVec2, mode: BlendMode) {
        let local = at.as_i64vec2() - self.origin.as_i64vec2();
        match mode {
            BlendMode::Over => imageops::overlay(&mut self.pixels, &src.pixels, local.x, local.y),
            BlendMode::Replace => {
                imageops::replace(&mut self.pixels, &src.pixels, local.x, local.y)
            }
        }
    }

    /// Draws `src` at its own bounds' minimum corner.
    pub fn draw_in_place(&mut self, src: &Canvas, mode: BlendMode) {
        self.draw(src, src.origin, mode);
    }

    /// Resampled copy of this canvas with the given pixel size, keeping the origin.
    pub fn resized(&self, width: u32, height: u32, filter: FilterType) -> Canvas {
        if width == 0 || height == 0 || self.is_empty() {
            return Canvas::from_image_at(self.origin, RgbaImage::new(width, height));
        }
        Canvas::from_image_at(
            self.origin,
            imageops::resize(&self.pixels, width, height, filter),
        )
    }
}

/// Enlarges `original` so that it covers `target`.
///
/// When `target` is already contained in the canvas the original is returned as is.
/// Otherwise a new canvas spanning the union of both rectangles is allocated and the
/// original is drawn onto it at its previous position.
pub fn grow_image(original: Canvas, target: Rect) -> Canvas {
    let target = target.canon();
    let bounds = original.bounds();
    if target.contained_in(&bounds) {
        return original;
    }
    let union = bounds.union(&target);
    let mut grown = Canvas::new(union);
    grown.draw_in_place(&original, BlendMode::Over);
    grown
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    #[test]
    fn new_canvas_is_transparent_and_anchored() {
        let canvas = Canvas::new(Rect::new(IVec2::new(-2, 3), IVec2::new(2, 5)));
        assert_eq!(canvas.bounds().min, IVec2::new(-2, 3));
        assert_eq!(canvas.bounds().size(), IVec2::new(4, 2));
        assert_eq!(canvas.get_pixel(IVec2::new(-2, 3)), Some(CLEAR));
        assert_eq!(canvas.get_pixel(IVec2::new(2, 3)), None);
        assert_eq!(canvas.get_pixel(IVec2::new(-3, 3)), None);
    }

    #[test]
    fn far_coordinates_are_outside_without_overflow() {
        let mut canvas = Canvas::filled(Rect::new(IVec2::new(-4, -4), IVec2::ZERO), BLUE);
        assert_eq!(canvas.get_pixel(IVec2::new(i32::MAX, i32::MAX)), None);
        assert_eq!(canvas.get_pixel(IVec2::new(i32::MIN, -1)), None);

        let dot = Canvas::filled(Rect::from_size(1, 1), RED);
        canvas.draw(&dot, IVec2::new(i32::MAX, 0), BlendMode::Over);
        canvas.draw(&dot, IVec2::new(i32::MIN, -2), BlendMode::Replace);
        let pixels = canvas.into_image();
        assert_eq!(pixels.dimensions(), (4, 4));
        assert!(pixels.pixels().all(|p| *p == BLUE));
    }

    #[test]
    fn draw_uses_absolute_coordinates() {
        let mut canvas = Canvas::new(Rect::new(IVec2::new(-10, -10), IVec2::new(10, 10)));
        let dot = Canvas::filled(Rect::from_size(1, 1), RED);
        canvas.draw(&dot, IVec2::new(-10, 5), BlendMode::Over);
        assert_eq!(canvas.get_pixel(IVec2::new(-10, 5)), Some(RED));
        assert_eq!(canvas.get_pixel(IVec2::new(-9, 5)), Some(CLEAR));
    }

    #[test]
    fn over_keeps_destination_under_transparent_source() {
        let mut canvas = Canvas::filled(Rect::from_size(2, 2), BLUE);
        let clear = Canvas::new(Rect::from_size(2, 2));
        canvas.draw(&clear, IVec2::ZERO, BlendMode::Over);
        assert_eq!(canvas.get_pixel(IVec2::ZERO), Some(BLUE));

        canvas.draw(&clear, IVec2::ZERO, BlendMode::Replace);
        assert_eq!(canvas.get_pixel(IVec2::ZERO), Some(CLEAR));
    }

    #[test]
    fn grow_is_identity_when_contained() {
        let canvas = Canvas::filled(Rect::from_size(4, 4), RED);
        let same = grow_image(canvas.clone(), canvas.bounds());
        assert_eq!(same, canvas);
    }

    #[test]
    fn grow_preserves_existing_pixels() {
        let canvas = Canvas::filled(Rect::from_size(4, 4), RED);
        let grown = grow_image(
            canvas,
            Rect::new(IVec2::new(-4, 2), IVec2::new(2, 10)),
        );
        assert_eq!(
            grown.bounds(),
            Rect::new(IVec2::new(-4, 0), IVec2::new(4, 10))
        );
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(grown.get_pixel(IVec2::new(x, y)), Some(RED));
            }
        }
        assert_eq!(grown.get_pixel(IVec2::new(-4, 9)), Some(CLEAR));
    }

    #[test]
    fn resized_keeps_origin() {
        let canvas = Canvas::from_image_at(IVec2::new(3, 3), RgbaImage::from_pixel(4, 2, RED));
        let resized = canvas.resized(8, 4, FilterType::Triangle);
        assert_eq!(
            resized.bounds(),
            Rect::new(IVec2::new(3, 3), IVec2::new(11, 7))
        );
        assert_eq!(resized.get_pixel(IVec2::new(6, 5)), Some(RED));

        let collapsed = canvas.resized(0, 4, FilterType::Triangle);
        assert!(collapsed.is_empty());
    }
}
