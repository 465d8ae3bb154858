//! Recursive compositing of asset trees into flat canvases.
//!
//! Each asset is flattened bottom-up: its own image is drawn onto a fresh canvas
//! (scaled by the region that placed it), then every child region is flattened and
//! drawn on top in declared order, centered on the region's coordinates. Canvases
//! grow to fit children and never lose pixels.
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{checked_center_offset, try_scale_rectangle, Rect, Scale};
use crate::raster::{grow_image, BlendMode, Canvas};
use crate::tree::{Asset, Region};

pub mod config;
pub mod events;

pub use config::CompositeConfig;
pub use events::{CompositeEvent, CompositeEventKind, EventSink};

/// Flattens `asset` and its descendants without any scaling at the root.
///
/// Returns `Ok(None)` only for an absent asset.
pub fn composite_asset(
    asset: &Asset,
    config: &CompositeConfig,
    sink: &mut dyn EventSink,
) -> Result<Option<Canvas>> {
    config.validate()?;
    Compositor::new(config, sink).subtree(Some(asset), Scale::NONE, 0)
}

/// Flattens the asset placed by `region`, applying the region's scale.
///
/// An empty region yields `Ok(None)`: nothing to draw, not a failure.
pub fn composite_region(
    region: &Region,
    config: &CompositeConfig,
    sink: &mut dyn EventSink,
) -> Result<Option<Canvas>> {
    config.validate()?;
    Compositor::new(config, sink).region(region, 1)
}

pub(crate) struct Compositor<'a> {
    config: &'a CompositeConfig,
    sink: &'a mut dyn EventSink,
}

impl<'a> Compositor<'a> {
    pub(crate) fn new(config: &'a CompositeConfig, sink: &'a mut dyn EventSink) -> Self {
        Self { config, sink }
    }

    pub(crate) fn sink(&mut self) -> &mut dyn EventSink {
        &mut *self.sink
    }

    pub(crate) fn region(&mut self, region: &Region, depth: usize) -> Result<Option<Canvas>> {
        self.subtree(region.asset(), region.effective_scale(), depth)
    }

    fn subtree(
        &mut self,
        asset: Option<&Asset>,
        scale: Scale,
        depth: usize,
    ) -> Result<Option<Canvas>> {
        let Some(asset) = asset else {
            return Ok(None);
        };
        if depth > self.config.max_depth {
            return Err(Error::DepthExceeded {
                max_depth: self.config.max_depth,
            });
        }
        if !scale.is_valid() {
            return Err(Error::InvalidScale {
                x: scale.x,
                y: scale.y,
            });
        }
        let image = asset.image.as_ref().ok_or_else(|| {
            Error::missing(format!(
                "asset '{}' has no image loaded",
                asset.path.display()
            ))
        })?;

        let own = image.bounds().canon();
        let bounds = try_scale_rectangle(scale.x, scale.y, own)
            .ok_or(Error::InvalidScale {
                x: scale.x,
                y: scale.y,
            })?
            .canon();
        if bounds != own {
            self.check_extent(bounds)?;
        }

        // Fresh canvas per call; siblings must never share one.
        let mut canvas = Canvas::new(bounds);
        if bounds == own {
            canvas.draw_in_place(image, BlendMode::Over);
        } else if bounds.is_empty() {
            self.warn(asset, "scaled image has no pixels; drawing nothing");
        } else {
            let scaled = image.resized(
                bounds.width() as u32,
                bounds.height() as u32,
                self.config.resample,
            );
            canvas.draw_in_place(&scaled, BlendMode::Over);
        }

        for (index, region) in asset.regions.iter().enumerate() {
            let child = self
                .region(region, depth + 1)
                .map_err(|e| Error::composite(&asset.path, e))?;
            match child {
                Some(child) => {
                    let placed = self
                        .placement(canvas.bounds(), region, &child)
                        .map_err(|e| Error::composite(&asset.path, e))?;
                    canvas = self.draw_placed(canvas, placed, &child, depth);
                }
                None => {
                    if self.sink.wants(CompositeEventKind::RegionSkipped) {
                        self.sink
                            .send(CompositeEvent::RegionSkipped { depth, index });
                    }
                }
            }
        }

        if self.sink.wants(CompositeEventKind::SubtreeComposited) {
            self.sink.send(CompositeEvent::SubtreeComposited {
                depth,
                kind: asset.kind.clone(),
                path: asset.path.clone(),
                bounds: canvas.bounds(),
            });
        }
        Ok(Some(canvas))
    }

    /// Where `child` lands when centered on the region's coordinates.
    ///
    /// Fails when the placed rectangle leaves the `i32` range, or when growing a canvas
    /// with `bounds` to fit it would exceed the configured maximum extent.
    pub(crate) fn placement(
        &self,
        bounds: Rect,
        region: &Region,
        child: &Canvas,
    ) -> Result<Rect> {
        let child_bounds = child.bounds().canon();
        let coords = region.coordinates();
        let placed = checked_center_offset(coords, child_bounds)
            .and_then(|offset| Rect::checked_from_min_size(offset, child_bounds.size()))
            .ok_or(Error::PlacementOverflow { coords })?;
        if !placed.contained_in(&bounds) {
            self.check_extent(bounds.union(&placed))?;
        }
        Ok(placed)
    }

    /// Draws `child` at `placed`, growing the canvas first if it would not fit.
    pub(crate) fn draw_placed(
        &mut self,
        canvas: Canvas,
        placed: Rect,
        child: &Canvas,
        depth: usize,
    ) -> Canvas {
        let from = canvas.bounds();
        let mut canvas = grow_image(canvas, placed);
        if canvas.bounds() != from {
            debug!("Canvas grew from {:?} to {:?}.", from, canvas.bounds());
            if self.sink.wants(CompositeEventKind::CanvasGrown) {
                self.sink.send(CompositeEvent::CanvasGrown {
                    depth,
                    from,
                    to: canvas.bounds(),
                });
            }
        }
        canvas.draw(child, placed.min, BlendMode::Over);
        canvas
    }

    fn check_extent(&self, bounds: Rect) -> Result<()> {
        let extent = bounds.extent();
        let max_extent = self.config.max_canvas_extent;
        if extent.x > i64::from(max_extent) || extent.y > i64::from(max_extent) {
            return Err(Error::CanvasTooLarge {
                width: extent.x,
                height: extent.y,
                max_extent,
            });
        }
        Ok(())
    }

    fn warn(&mut self, asset: &Asset, message: &str) {
        debug!("'{}': {}.", asset.path.display(), message);
        if self.sink.wants(CompositeEventKind::Warning) {
            self.sink.send(CompositeEvent::Warning {
                context: asset.path.display().to_string(),
                message: message.to_string(),
            });
        }
    }
}
