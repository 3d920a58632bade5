//! Color mapping, rasterization and PNG export.

mod colormap;
mod export;
mod raster;
mod scale;

pub use colormap::{ColorStop, Colormap};
pub use export::save_png;
pub use raster::{
    color_scale, compose_horizontal, render_grid, with_color_scale, CellSize, Origin,
    RasterOptions,
};
pub use scale::{ClipRange, ScaleMode};
