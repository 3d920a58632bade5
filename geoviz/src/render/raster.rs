//! Grid-to-image rasterization, color scale strips and panel layout.

use image::{imageops, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::colormap::Colormap;
use super::scale::ClipRange;
use crate::error::{Error, Result};
use crate::grid::{CellValue, Grid2};

/// Which image edge grid row 0 is drawn at.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Origin {
    /// Row 0 at the bottom, as on a map with y increasing upwards.
    #[default]
    Lower,
    /// Row 0 at the top, as on a seismic section with time increasing downwards.
    Upper,
}

/// Pixel block drawn for each grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(px: u32) -> Self {
        Self::new(px, px)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "cell size must be at least 1x1 px, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::square(4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub cell: CellSize,
    pub origin: Origin,
    /// Color of undefined cells.
    pub no_data: Rgba<u8>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            cell: CellSize::default(),
            origin: Origin::Lower,
            no_data: Rgba([255, 255, 255, 0]),
        }
    }
}

impl RasterOptions {
    pub fn with_cell(mut self, cell: CellSize) -> Self {
        self.cell = cell;
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }
}

#[inline]
fn opaque(rgb: [u8; 3]) -> Rgba<u8> {
    Rgba([rgb[0], rgb[1], rgb[2], 255])
}

/// Draws every cell of `grid` as a colored block.
pub fn render_grid<T: CellValue>(
    grid: &Grid2<T>,
    colormap: Colormap,
    clip: ClipRange,
    options: &RasterOptions,
) -> RgbaImage {
    let CellSize { width: cw, height: ch } = options.cell;
    let rows = grid.rows() as u32;
    let mut img = RgbaImage::new(grid.cols() as u32 * cw, rows * ch);

    for row in 0..grid.rows() {
        let screen_row = match options.origin {
            Origin::Upper => row as u32,
            Origin::Lower => rows - 1 - row as u32,
        };
        for col in 0..grid.cols() {
            let color = match grid[(col, row)].value() {
                Some(v) => opaque(colormap.sample(clip.normalize(v))),
                None => options.no_data,
            };
            let x0 = col as u32 * cw;
            let y0 = screen_row * ch;
            for y in y0..y0 + ch {
                for x in x0..x0 + cw {
                    img.put_pixel(x, y, color);
                }
            }
        }
    }

    img
}

/// Vertical gradient strip, top pixel row at the high end.
pub fn color_scale(colormap: Colormap, width: u32, height: u32) -> RgbaImage {
    let last = height.saturating_sub(1).max(1) as f64;
    RgbaImage::from_fn(width, height, |_, y| {
        opaque(colormap.sample(1.0 - y as f64 / last))
    })
}

/// `panel` with a color scale strip `gap` pixels to its right.
pub fn with_color_scale(panel: &RgbaImage, colormap: Colormap, strip_width: u32, gap: u32) -> RgbaImage {
    let strip = color_scale(colormap, strip_width, panel.height());
    compose_horizontal(&[panel.clone(), strip], gap)
}

/// Places `panels` left to right, top-aligned, on a white background.
pub fn compose_horizontal(panels: &[RgbaImage], gap: u32) -> RgbaImage {
    let width = panels.iter().map(RgbaImage::width).sum::<u32>()
        + gap * panels.len().saturating_sub(1) as u32;
    let height = panels.iter().map(RgbaImage::height).max().unwrap_or(0);

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let mut x = 0i64;
    for panel in panels {
        imageops::overlay(&mut canvas, panel, x, 0);
        x += (panel.width() + gap) as i64;
    }
    canvas
}
