//! The two dashboards as plain functions of an immutable configuration.
//!
//! Each call loads or generates its data, runs the pipeline, renders the
//! figure and optionally exports it. Nothing survives between calls.

mod config;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use image::RgbaImage;

use crate::error::Result;
use crate::grid::{CellValue, Grid2};
use crate::observation::ObservationTable;
use crate::render::{
    compose_horizontal, render_grid, save_png, with_color_scale, CellSize, ClipRange, Colormap, Origin,
    RasterOptions, ScaleMode,
};
use crate::seismic::{generate_section, trace_window, TraceRange};
use crate::separation::{separate_in_range, Separation};

pub use config::{
    load_config, MagneticDashboardConfig, ScaleControl, ScaleKind, SeismicDashboardConfig,
    MAGNETIC_OUTPUT, SEISMIC_CLIP_FRACTION,
};

/// Width of the color scale strip next to each panel, in pixels.
const COLOR_SCALE_WIDTH: u32 = 16;
/// Spacing between a panel and its scale and between panels.
const PANEL_GAP: u32 = 8;

/// Everything the magnetic dashboard computed in one run.
#[derive(Debug, Clone)]
pub struct MagneticView {
    /// Observations left after the x filter.
    pub observations: usize,
    /// `(min, max)` of the value column over the whole table.
    pub value_range: Option<(f64, f64)>,
    pub separation: Separation,
    /// Clip applied to the observed, regional and residual panels.
    pub clips: [ClipRange; 3],
    pub image: RgbaImage,
    pub exported: Option<PathBuf>,
}

/// Everything the seismic dashboard computed in one run.
#[derive(Debug, Clone)]
pub struct SeismicView {
    /// `(samples, traces)` of the generated section.
    pub section_shape: (usize, usize),
    pub traces: TraceRange,
    pub abs_max: f64,
    pub clip: ClipRange,
    pub image: RgbaImage,
    pub exported: Option<PathBuf>,
}

fn panel<T: CellValue>(
    grid: &Grid2<T>,
    colormap: Colormap,
    scale: ScaleMode,
    options: &RasterOptions,
) -> (RgbaImage, ClipRange) {
    let clip = scale.resolve(grid);
    let image = render_grid(grid, colormap, clip, options);
    (
        with_color_scale(&image, colormap, COLOR_SCALE_WIDTH, PANEL_GAP),
        clip,
    )
}

fn export(image: &RgbaImage, enabled: bool, path: PathBuf) -> Result<Option<PathBuf>> {
    if !enabled {
        return Ok(None);
    }
    save_png(image, &path)?;
    Ok(Some(path))
}

/// Observed | regional | residual panels for a magnetic survey file.
pub fn render_magnetic(
    separation: &Separation,
    colormap: Colormap,
    scale: ScaleMode,
    cell: CellSize,
) -> (RgbaImage, [ClipRange; 3]) {
    let options = RasterOptions::default()
        .with_cell(cell)
        .with_origin(Origin::Lower);

    let (observed, c0) = panel(&separation.observed, colormap, scale, &options);
    let (regional, c1) = panel(&separation.regional, colormap, scale, &options);
    let (residual, c2) = panel(&separation.residual, colormap, scale, &options);

    (
        compose_horizontal(&[observed, regional, residual], PANEL_GAP * 2),
        [c0, c1, c2],
    )
}

pub fn run_magnetic(config: &MagneticDashboardConfig) -> Result<MagneticView> {
    config.validate()?;

    let table = ObservationTable::from_path(&config.input)?;
    let value_range = table.value_range(&config.value_column)?;
    let observations = table.observations(&config.value_column)?;

    let default_clip = value_range
        .map(|(lo, hi)| ClipRange::new(lo, hi))
        .unwrap_or(ClipRange::new(0.0, 0.0));
    let scale = config.scale.resolve(default_clip)?;

    let separation = separate_in_range(&observations, config.x_range, &config.separation)?;
    let kept = match config.x_range {
        Some(range) => observations.filter_x_range(range).len(),
        None => observations.len(),
    };

    if let Some(stats) = separation.residual_stats() {
        log::info!(
            "Residual over {} cells: min {:.3}, max {:.3}, mean {:.3}",
            stats.defined,
            stats.min,
            stats.max,
            stats.mean
        );
    }

    let (image, clips) = render_magnetic(&separation, config.colormap, scale, config.cell);
    let exported = export(&image, config.export, config.output_path())?;

    Ok(MagneticView {
        observations: kept,
        value_range,
        separation,
        clips,
        image,
        exported,
    })
}

pub fn run_seismic(config: &SeismicDashboardConfig) -> Result<SeismicView> {
    config.validate()?;

    let section = generate_section(&config.section)?;
    let abs_max = section.abs_max().unwrap_or(0.0);
    let scale = config
        .scale
        .resolve(ClipRange::symmetric(abs_max, SEISMIC_CLIP_FRACTION))?;

    let traces = config.traces();
    let window = trace_window(&section, traces)?;

    let origin = if config.flip_time {
        Origin::Lower
    } else {
        Origin::Upper
    };
    let options = RasterOptions::default()
        .with_cell(config.cell)
        .with_origin(origin);
    let (image, clip) = panel(&window, config.colormap, scale, &options);

    log::info!(
        "Seismic section traces {}..{}, clip {:.3}..{:.3}",
        traces.start,
        traces.end,
        clip.vmin,
        clip.vmax
    );

    let exported = export(&image, config.export, config.output_path())?;

    Ok(SeismicView {
        section_shape: section.shape(),
        traces,
        abs_max,
        clip,
        image,
        exported,
    })
}
