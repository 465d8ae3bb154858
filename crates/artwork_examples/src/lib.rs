#![forbid(unsafe_code)]

mod layers;
mod output;

pub use layers::{write_layer, LayerShape};
pub use output::{
    init_tracing, load_ron, parse_ron, rebase_catalog, save_canvas_png, DirectoryMinter,
    PieceMetadata,
};
