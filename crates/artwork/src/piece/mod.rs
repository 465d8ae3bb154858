//! The root aggregate of one artwork: an identifier plus a trunk asset.
//!
//! The trunk's image is the base canvas and its regions are the top-level slots.
//! [`Piece::build`] assembles the tree from a [`Blueprint`] and a [`TraitCatalog`];
//! [`Piece::composite`] flattens it onto the trunk canvas.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::attribute::selection::pick_uniform;
use crate::attribute::{Attribute, KindId, TraitCatalog};
use crate::composite::{
    CompositeConfig, CompositeEvent, CompositeEventKind, Compositor, EventSink,
};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::mint::FinishedPiece;
use crate::raster::{Canvas, RasterCodec};
use crate::tree::{Asset, Region};

pub mod blueprint;

pub use blueprint::{Blueprint, SlotDef};

/// Trait chosen for one slot of a piece.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeRecord {
    pub kind: KindId,
    pub attribute: Attribute,
}

/// One artwork instance.
#[derive(Debug)]
pub struct Piece {
    id: u64,
    trunk: Asset,
    attributes: Vec<AttributeRecord>,
}

impl Piece {
    /// Creates a piece on `canvas`, or on a blank canvas of `bounds`, or on an empty
    /// placeholder when neither is given.
    pub fn new(id: u64, canvas: Option<Canvas>, bounds: Option<Rect>) -> Self {
        let canvas = canvas.unwrap_or_else(|| Canvas::new(bounds.unwrap_or(Rect::ZERO)));
        Self::from_trunk(id, Asset::from_canvas(canvas))
    }

    /// Creates a piece around an existing trunk asset.
    pub fn from_trunk(id: u64, trunk: Asset) -> Self {
        Self {
            id,
            trunk,
            attributes: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn trunk(&self) -> &Asset {
        &self.trunk
    }

    pub fn trunk_mut(&mut self) -> &mut Asset {
        &mut self.trunk
    }

    pub fn regions(&self) -> &[Region] {
        &self.trunk.regions
    }

    pub fn push_region(&mut self, region: Region) {
        self.trunk.regions.push(region);
    }

    /// The base canvas, which holds the artwork once [`Piece::composite`] succeeded.
    pub fn image(&self) -> Option<&Canvas> {
        self.trunk.image.as_ref()
    }

    /// Traits chosen by the last [`Piece::build`], in slot order.
    pub fn attributes(&self) -> &[AttributeRecord] {
        &self.attributes
    }

    /// Assembles the asset tree from `blueprint`, drawing one trait per slot from
    /// `catalog`, then loads every image through `codec`.
    ///
    /// Slots are visited depth-first in declared order. A slot accepting several kinds
    /// picks one uniformly. A slot whose draw resolves nothing stays empty, and so do
    /// its children. On failure the piece keeps its previous trunk and attributes.
    pub fn build(
        &mut self,
        blueprint: &Blueprint,
        catalog: &TraitCatalog,
        codec: &dyn RasterCodec,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        catalog.validate()?;
        catalog.validate_blueprint(blueprint)?;

        let mut trunk = Asset {
            kind: self.trunk.kind.clone(),
            path: self.trunk.path.clone(),
            image: None,
            regions: Vec::with_capacity(blueprint.slots.len()),
        };
        if let Some(background) = &blueprint.background {
            trunk.path = background.clone();
        } else if let Some((width, height)) = blueprint.size {
            trunk.image = Some(Canvas::new(Rect::from_size(width as i32, height as i32)));
        } else {
            trunk.image = self.trunk.image.clone();
        }

        let mut attributes = Vec::new();
        for slot in &blueprint.slots {
            trunk
                .regions
                .push(build_slot(slot, catalog, rng, &mut attributes)?);
        }
        let loaded = trunk.load_tree(codec)?;

        self.trunk = trunk;
        self.attributes = attributes;
        info!(
            "Piece {}: built {} assets, loaded {}, chose {} traits.",
            self.id,
            self.trunk.count(),
            loaded,
            self.attributes.len()
        );
        Ok(())
    }

    /// Composites every top-level region onto the trunk canvas.
    ///
    /// Fails when there is no canvas, no regions, or when no region produced anything
    /// to draw. Any failure in a subtree aborts the whole piece and leaves the canvas
    /// untouched.
    pub fn composite(&mut self, config: &CompositeConfig, sink: &mut dyn EventSink) -> Result<()> {
        config.validate()?;
        if self.trunk.image.is_none() {
            return Err(Error::missing("piece has no canvas on which to draw"));
        }
        if self.trunk.regions.is_empty() {
            return Err(Error::missing("piece has no regions to composite"));
        }

        let mut compositor = Compositor::new(config, sink);
        if compositor.sink().wants(CompositeEventKind::PieceStarted) {
            compositor.sink().send(CompositeEvent::PieceStarted {
                id: self.id,
                region_count: self.trunk.regions.len(),
            });
        }

        let id = self.id;
        let wrap = move |e: Error| Error::Piece {
            id,
            source: Box::new(e),
        };
        let mut composites = Vec::with_capacity(self.trunk.regions.len());
        for (index, region) in self.trunk.regions.iter().enumerate() {
            let composite = compositor.region(region, 1).map_err(wrap)?;
            match composite {
                Some(canvas) => composites.push((index, canvas)),
                None => {
                    if compositor.sink().wants(CompositeEventKind::RegionSkipped) {
                        compositor
                            .sink()
                            .send(CompositeEvent::RegionSkipped { depth: 0, index });
                    }
                }
            }
        }
        if composites.is_empty() {
            return Err(Error::missing(format!(
                "piece {} has no region with anything to draw",
                self.id
            )));
        }

        // Every placement is checked before the canvas is taken.
        let Some(mut bounds) = self.trunk.image.as_ref().map(Canvas::bounds) else {
            return Err(Error::missing("piece has no canvas on which to draw"));
        };
        let mut placements = Vec::with_capacity(composites.len());
        for (index, composite) in &composites {
            let placed = compositor
                .placement(bounds, &self.trunk.regions[*index], composite)
                .map_err(wrap)?;
            if !placed.contained_in(&bounds) {
                bounds = bounds.union(&placed);
            }
            placements.push(placed);
        }

        let Some(mut canvas) = self.trunk.image.take() else {
            return Err(Error::missing("piece has no canvas on which to draw"));
        };
        for ((_, composite), placed) in composites.iter().zip(placements) {
            canvas = compositor.draw_placed(canvas, placed, composite, 0);
        }

        let bounds = canvas.bounds();
        if compositor.sink().wants(CompositeEventKind::PieceFinished) {
            compositor.sink().send(CompositeEvent::PieceFinished {
                id: self.id,
                bounds,
                composited: composites.len(),
            });
        }
        self.trunk.image = Some(canvas);
        info!(
            "Piece {}: composited {} of {} regions into {}x{}.",
            self.id,
            composites.len(),
            self.trunk.regions.len(),
            bounds.width(),
            bounds.height()
        );
        Ok(())
    }

    /// Hands over the canvas and trait metadata for minting.
    pub fn finish(self) -> Result<FinishedPiece> {
        let image = self
            .trunk
            .image
            .ok_or_else(|| Error::missing("piece has no canvas to finish"))?;
        Ok(FinishedPiece {
            id: self.id,
            image,
            attributes: self.attributes,
        })
    }
}

fn build_slot(
    slot: &SlotDef,
    catalog: &TraitCatalog,
    rng: &mut dyn RngCore,
    attributes: &mut Vec<AttributeRecord>,
) -> Result<Region> {
    let mut region = Region::empty().with_kinds(slot.kinds.iter().cloned());
    region.coords = slot.coordinates;
    region.scale = slot.scale;

    let kind = match slot.kinds.as_slice() {
        [only] => only,
        kinds => pick_uniform(kinds, rng)
            .ok_or_else(|| Error::InvalidConfig("slot accepts no kinds".to_string()))?,
    };
    let Some(selection) = catalog.select(kind, rng)? else {
        warn!("Slot for kind '{}' left empty.", kind);
        return Ok(region);
    };

    attributes.push(AttributeRecord {
        kind: selection.kind.clone(),
        attribute: selection.attribute,
    });
    let mut asset = Asset::from_path(selection.kind, selection.path);
    for child in &slot.children {
        asset.push_region(build_slot(child, catalog, rng, attributes)?);
    }
    region.set_asset(asset);
    Ok(region)
}
