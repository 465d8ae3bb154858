//! Composition tree: assets own ordered regions, each region owns one child asset.
//!
//! Ownership only points downward. A region's scale is read by the compositor while
//! it walks the tree and handed to the child asset as a parameter, so assets carry no
//! reference back to the region that placed them.
use std::cell::OnceCell;
use std::path::PathBuf;

use glam::IVec2;

use crate::attribute::KindId;
use crate::geometry::{Rect, Scale};
use crate::raster::Canvas;

pub mod load;

/// One visual layer plus the placement slots drawn on top of it.
#[derive(Clone, Debug, Default)]
pub struct Asset {
    /// Trait category this asset fulfills. The trunk of a piece has none.
    pub kind: Option<KindId>,
    /// Source locator for the raster content.
    pub path: PathBuf,
    /// Decoded pixels, absent until loaded.
    pub image: Option<Canvas>,
    /// Child slots in draw order; later regions draw over earlier ones.
    pub regions: Vec<Region>,
}

impl Asset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unloaded asset of `kind` pointing at `path`.
    pub fn from_path(kind: impl Into<KindId>, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: Some(kind.into()),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Creates an asset from an already decoded canvas.
    pub fn from_canvas(image: Canvas) -> Self {
        Self {
            image: Some(image),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<KindId>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    pub fn push_region(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Bounds of the loaded image, well-formed, or `None` before loading.
    pub fn bounds(&self) -> Option<Rect> {
        self.image.as_ref().map(|image| image.bounds().canon())
    }

    pub fn is_leaf(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of assets in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self
            .regions
            .iter()
            .filter_map(Region::asset)
            .map(Asset::count)
            .sum::<usize>()
    }

    /// Depth of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .regions
            .iter()
            .filter_map(Region::asset)
            .map(Asset::depth)
            .max()
            .unwrap_or(0)
    }
}

/// A placement slot inside a parent asset.
#[derive(Clone, Debug, Default)]
pub struct Region {
    asset: Option<Asset>,
    /// Explicit placement point in the parent's coordinate space.
    pub coords: Option<IVec2>,
    /// Trait categories this slot accepts.
    pub kinds: Vec<KindId>,
    /// Scale applied to the embedded asset before it is composited.
    pub scale: Option<Scale>,
    center: OnceCell<IVec2>,
}

impl Region {
    /// Creates a region placing `asset`.
    pub fn new(asset: Asset) -> Self {
        Self {
            asset: Some(asset),
            ..Self::default()
        }
    }

    /// Creates a slot with nothing in it. Such a region contributes nothing when
    /// composited.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_coords(mut self, coords: IVec2) -> Self {
        self.coords = Some(coords);
        self
    }

    pub fn with_kinds<K: Into<KindId>>(mut self, kinds: impl IntoIterator<Item = K>) -> Self {
        self.kinds = kinds.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn asset(&self) -> Option<&Asset> {
        self.asset.as_ref()
    }

    /// Mutable access to the embedded asset. Clears the cached default coordinates.
    pub fn asset_mut(&mut self) -> Option<&mut Asset> {
        self.center.take();
        self.asset.as_mut()
    }

    pub fn set_asset(&mut self, asset: Asset) {
        self.center.take();
        self.asset = Some(asset);
    }

    pub fn take_asset(&mut self) -> Option<Asset> {
        self.center.take();
        self.asset.take()
    }

    pub fn is_empty(&self) -> bool {
        self.asset.is_none()
    }

    /// Scale to hand to the embedded asset; `(0, 0)` when none was declared.
    pub fn effective_scale(&self) -> Scale {
        self.scale.unwrap_or(Scale::NONE)
    }

    /// Placement point for the embedded asset.
    ///
    /// Without explicit coordinates this is the center of the embedded asset's bounds,
    /// computed on first use after the asset is loaded and cached from then on. Before
    /// that it is the origin.
    pub fn coordinates(&self) -> IVec2 {
        if let Some(coords) = self.coords {
            return coords;
        }
        if let Some(center) = self.center.get() {
            return *center;
        }
        match self.asset.as_ref().and_then(Asset::bounds) {
            Some(bounds) => *self.center.get_or_init(|| bounds.center()),
            None => IVec2::ZERO,
        }
    }
}
