//! Blueprints describe the slot tree a [`crate::piece::Piece`] is built from.
use std::path::PathBuf;

use glam::IVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attribute::KindId;
use crate::geometry::Scale;

/// Shape of a piece: the base canvas and the top-level slots.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct Blueprint {
    /// Size of a blank base canvas, used when there is no background.
    pub size: Option<(u32, u32)>,
    /// Image to use as the base canvas.
    pub background: Option<PathBuf>,
    /// Top-level slots in draw order.
    pub slots: Vec<SlotDef>,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn with_background(mut self, path: impl Into<PathBuf>) -> Self {
        self.background = Some(path.into());
        self
    }

    pub fn with_slot(mut self, slot: SlotDef) -> Self {
        self.slots.push(slot);
        self
    }
}

/// One slot: the kinds it accepts, where it sits and how the chosen asset is scaled.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct SlotDef {
    pub kinds: Vec<KindId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub coordinates: Option<IVec2>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale: Option<Scale>,
    /// Slots placed inside the asset chosen for this slot.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<SlotDef>,
}

impl SlotDef {
    pub fn new<K: Into<KindId>>(kinds: impl IntoIterator<Item = K>) -> Self {
        Self {
            kinds: kinds.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.coordinates = Some(IVec2::new(x, y));
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_child(mut self, child: SlotDef) -> Self {
        self.children.push(child);
        self
    }
}
