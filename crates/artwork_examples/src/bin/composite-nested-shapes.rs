use artwork::prelude::*;
use artwork_examples::{init_tracing, save_canvas_png};
use glam::IVec2;
use image::Rgba;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let square = |size: i32, color: [u8; 4]| {
        Asset::from_canvas(Canvas::filled(Rect::from_size(size, size), Rgba(color)))
    };

    // Three levels deep; the last sibling overhangs the root and grows the canvas.
    let inner = square(40, [240, 200, 40, 255])
        .with_region(Region::new(square(10, [20, 20, 20, 255])));
    let middle = square(120, [200, 60, 60, 255])
        .with_region(Region::new(inner).with_coords(IVec2::new(30, 30)))
        .with_region(
            Region::new(square(40, [60, 60, 200, 255]))
                .with_coords(IVec2::new(90, 90))
                .with_scale(Scale::uniform(1.5)),
        );
    let root = square(200, [235, 235, 235, 255])
        .with_region(Region::new(middle).with_coords(IVec2::new(100, 100)))
        .with_region(Region::empty())
        .with_region(Region::new(square(60, [60, 180, 90, 200])).with_coords(IVec2::new(200, 20)));

    let mut grown = 0usize;
    let mut sink = FnSink::new(|event: CompositeEvent| {
        if event.kind() == CompositeEventKind::CanvasGrown {
            grown += 1;
        }
        TracingSink.send(event);
    });
    let canvas = composite_asset(&root, &CompositeConfig::default(), &mut sink)?
        .ok_or_else(|| anyhow::anyhow!("nothing was composited"))?;

    let bounds = canvas.bounds();
    println!(
        "composited {} assets into {:?} ({} canvas growths)",
        root.count(),
        bounds,
        grown
    );
    save_canvas_png(&canvas, "composite-nested-shapes.png")?;
    Ok(())
}
