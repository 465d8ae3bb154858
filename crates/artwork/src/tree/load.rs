//! Loading asset images ahead of compositing.
use tracing::debug;

use crate::error::{Error, Result};
use crate::raster::RasterCodec;
use crate::tree::Asset;

impl Asset {
    /// Reads and decodes the image at [`Asset::path`].
    pub fn load(&mut self, codec: &dyn RasterCodec) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::missing("asset path is empty"));
        }
        let bytes = std::fs::read(&self.path).map_err(|source| Error::Read {
            path: self.path.clone(),
            source,
        })?;
        let (canvas, format) = codec.decode(&bytes).map_err(|source| Error::Decode {
            path: self.path.clone(),
            source: Box::new(source),
        })?;
        debug!(
            "Loaded '{}' as {:?} ({}x{}).",
            self.path.display(),
            format,
            canvas.bounds().width(),
            canvas.bounds().height()
        );
        self.image = Some(canvas);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Loads every asset in this subtree that has no image yet, depth-first. Returns
    /// the number of assets loaded.
    pub fn load_tree(&mut self, codec: &dyn RasterCodec) -> Result<usize> {
        let mut loaded = 0;
        if !self.is_loaded() {
            self.load(codec)?;
            loaded += 1;
        }
        for region in &mut self.regions {
            if let Some(asset) = region.asset_mut() {
                loaded += asset.load_tree(codec)?;
            }
        }
        Ok(loaded)
    }
}
