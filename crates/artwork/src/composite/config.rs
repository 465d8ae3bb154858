//! Configuration for compositing runs.
use image::imageops::FilterType;

use crate::error::{Error, Result};

pub const DEFAULT_MAX_DEPTH: usize = 32;
pub const DEFAULT_MAX_CANVAS_EXTENT: u32 = 16_384;

/// Configuration for compositing an asset tree.
#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct CompositeConfig {
    /// Deepest asset level below the root that may be composited.
    pub max_depth: usize,
    /// Filter used when a region scales its asset.
    pub resample: FilterType,
    /// Widest or tallest canvas a scale or a grow step may produce, in pixels.
    pub max_canvas_extent: u32,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            resample: FilterType::Triangle,
            max_canvas_extent: DEFAULT_MAX_CANVAS_EXTENT,
        }
    }
}

impl CompositeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum tree depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the resampling filter for scaled assets.
    pub fn with_resample(mut self, resample: FilterType) -> Self {
        self.resample = resample;
        self
    }

    /// Sets the largest canvas side compositing may allocate.
    pub fn with_max_canvas_extent(mut self, max_canvas_extent: u32) -> Self {
        self.max_canvas_extent = max_canvas_extent;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig("max_depth must be > 0".into()));
        }
        if self.max_canvas_extent == 0 {
            return Err(Error::InvalidConfig("max_canvas_extent must be > 0".into()));
        }
        Ok(())
    }
}
