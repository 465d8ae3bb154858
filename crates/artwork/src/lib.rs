#![forbid(unsafe_code)]
//! artwork: Weighted trait selection and recursive layered image compositing.
//!
//! Modules:
//! - attribute: weight maps, cumulative interval tables, trait catalogs and random draws
//! - tree: assets and the regions that place child assets inside them
//! - composite: bottom-up flattening of asset trees, config, events
//! - piece: blueprints, building a piece from a catalog, compositing onto its canvas
//! - raster, geometry: canvases with an origin, rectangles, scale and centering helpers
//! - mint: output backend for finished pieces
//!
//! For examples and docs, see README and docs.rs.
pub mod attribute;
pub mod composite;
pub mod error;
pub mod geometry;
pub mod mint;
pub mod piece;
pub mod raster;
pub mod tree;

/// Convenient re-exports for common types. Import with `use artwork::prelude::*;`.
pub mod prelude {
    pub use crate::attribute::selection::pick_uniform;
    pub use crate::attribute::{
        rand01, Attribute, AttributeWeightInterval, AttributeWeightIntervals,
        AttributeWeightMap, KindId, Selection, TraitCatalog, TraitCategory,
    };
    pub use crate::composite::events::{
        AsEventSink, EventSink, FnSink, MultiSink, TracingSink, VecSink,
    };
    pub use crate::composite::{
        composite_asset, composite_region, CompositeConfig, CompositeEvent, CompositeEventKind,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{
        center_offset, checked_center_offset, scale_rectangle, try_scale_rectangle, Rect, Scale,
    };
    pub use crate::mint::{FinishedPiece, Minter};
    pub use crate::piece::{AttributeRecord, Blueprint, Piece, SlotDef};
    pub use crate::raster::{grow_image, BlendMode, Canvas, ImageCodec, RasterCodec};
    pub use crate::tree::{Asset, Region};
}
