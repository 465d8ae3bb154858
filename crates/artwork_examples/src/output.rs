use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use artwork::prelude::*;
use image::ImageFormat;
use ron::ser::PrettyConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub fn parse_ron<T: DeserializeOwned>(text: &str) -> anyhow::Result<T> {
    ron::de::from_str(text).map_err(|e| anyhow::anyhow!(e))
}

pub fn load_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_ron(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Resolves every relative asset path in `catalog` against `base`.
pub fn rebase_catalog(catalog: TraitCatalog, base: &Path) -> TraitCatalog {
    let mut categories: BTreeMap<KindId, TraitCategory> = catalog.into();
    for category in categories.values_mut() {
        for path in category.paths.values_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
    categories.into()
}

pub fn save_canvas_png(canvas: &Canvas, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let bytes = ImageCodec.encode(canvas, ImageFormat::Png)?;
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Metadata written next to each minted image.
#[derive(Debug, Serialize)]
pub struct PieceMetadata<'a> {
    pub id: u64,
    pub width: i32,
    pub height: i32,
    pub attributes: &'a [AttributeRecord],
}

/// Writes `<id>.png` and `<id>.ron` for each piece into one directory.
#[derive(Debug, Clone)]
pub struct DirectoryMinter {
    dir: PathBuf,
    minted: usize,
}

impl DirectoryMinter {
    pub fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        Ok(Self { dir, minted: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn minted(&self) -> usize {
        self.minted
    }
}

impl Minter for DirectoryMinter {
    fn mint_one(&mut self, piece: &FinishedPiece) -> artwork::error::Result<()> {
        let bounds = piece.image.bounds();
        let png = ImageCodec.encode(&piece.image, ImageFormat::Png)?;
        fs::write(self.dir.join(format!("{}.png", piece.id)), png)?;

        let metadata = PieceMetadata {
            id: piece.id,
            width: bounds.width(),
            height: bounds.height(),
            attributes: &piece.attributes,
        };
        let text = ron::ser::to_string_pretty(&metadata, PrettyConfig::default())
            .map_err(|e| Error::Other(e.to_string()))?;
        fs::write(self.dir.join(format!("{}.ron", piece.id)), text)?;

        self.minted += 1;
        info!(
            "Minted piece {} ({} traits) into {}.",
            piece.id,
            piece.attributes.len(),
            self.dir.display()
        );
        Ok(())
    }
}
