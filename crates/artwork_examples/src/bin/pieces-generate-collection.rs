use std::path::Path;

use artwork::prelude::*;
use artwork_examples::{
    init_tracing, parse_ron, rebase_catalog, write_layer, DirectoryMinter, LayerShape,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const CATALOG: &str = r#"{
    "body": (
        weights: [("round", 0.6), ("square", 0.4)],
        paths: {"round": "body-round.png", "square": "body-square.png"},
    ),
    "eyes": (
        weights: [("dots", 0.7), ("rings", 0.3)],
        paths: {"dots": "eyes-dots.png", "rings": "eyes-rings.png"},
    ),
    "hat": (
        weights: [("cap", 0.5), ("crown", 0.2), ("stripes", 0.2)],
        paths: {"cap": "hat-cap.png", "crown": "hat-crown.png", "stripes": "hat-stripes.png"},
    ),
    "badge": (
        weights: [("star", 1.0)],
        paths: {"star": "badge-star.png"},
    ),
}"#;

// The hat weights sum to 0.9, so about one piece in ten goes without a hat.
const BLUEPRINT: &str = r#"(
    size: Some((256, 256)),
    slots: [
        (
            kinds: ["body"],
            coordinates: Some((128, 150)),
            children: [
                (kinds: ["eyes"], coordinates: Some((80, 60))),
                (kinds: ["hat"], coordinates: Some((80, 0)), scale: Some((x: 1.25, y: 1.0))),
            ],
        ),
        (kinds: ["hat", "badge"], coordinates: Some((220, 220)), scale: Some((x: 0.5, y: 0.5))),
    ],
)"#;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let out_dir = Path::new("target/artwork-demo");
    let layer_dir = out_dir.join("layers");
    std::fs::create_dir_all(&layer_dir)?;
    write_layers(&layer_dir)?;

    let catalog: TraitCatalog = parse_ron(CATALOG)?;
    let catalog = rebase_catalog(catalog, &layer_dir);
    let blueprint: Blueprint = parse_ron(BLUEPRINT)?;

    let config = CompositeConfig::default();
    let mut sink = TracingSink;
    let mut rng = StdRng::seed_from_u64(7);
    let mut finished = Vec::new();

    for id in 1..=8 {
        let mut piece = Piece::new(id, None, None);
        piece.build(&blueprint, &catalog, &ImageCodec, &mut rng)?;
        piece.composite(&config, &mut sink)?;
        finished.push(piece.finish()?);
    }

    let mut minter = DirectoryMinter::new(out_dir.join("pieces"))?;
    let minted = minter.mint_many(&finished)?;
    println!("minted {} pieces into {}", minted, minter.dir().display());
    Ok(())
}

fn write_layers(dir: &Path) -> anyhow::Result<()> {
    write_layer(dir, "body-round", (160, 160), LayerShape::Disc, [90, 160, 220, 255])?;
    write_layer(dir, "body-square", (150, 150), LayerShape::Fill, [220, 170, 90, 255])?;
    write_layer(
        dir,
        "eyes-dots",
        (60, 20),
        LayerShape::Stripes { period: 20 },
        [20, 20, 20, 255],
    )?;
    write_layer(
        dir,
        "eyes-rings",
        (40, 40),
        LayerShape::Ring { thickness: 6 },
        [250, 250, 250, 255],
    )?;
    write_layer(dir, "hat-cap", (100, 40), LayerShape::Fill, [200, 40, 40, 255])?;
    write_layer(
        dir,
        "hat-crown",
        (90, 50),
        LayerShape::Stripes { period: 15 },
        [240, 200, 30, 255],
    )?;
    write_layer(
        dir,
        "hat-stripes",
        (110, 36),
        LayerShape::Stripes { period: 6 },
        [60, 180, 90, 255],
    )?;
    write_layer(
        dir,
        "badge-star",
        (48, 48),
        LayerShape::Ring { thickness: 12 },
        [180, 60, 200, 255],
    )?;
    Ok(())
}
