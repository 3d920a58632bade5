//! Regional trend estimation: gap fill followed by Gaussian low-pass.

use super::convolution::{gaussian_smooth, BoundaryMode};
use crate::error::{Error, Result};
use crate::grid::{CellValue, FieldGrid, Grid2};

/// Smoothed regional field and what the gap fill did.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalEstimate {
    pub grid: Grid2<f64>,
    /// Mean of the defined observed cells.
    pub fill_value: f64,
    /// Number of undefined cells replaced by `fill_value`.
    pub filled_cells: usize,
}

/// Replaces every undefined cell with the mean of the defined ones.
///
/// Returns the filled grid and the mean. Fails with `NoDefinedCells` when
/// there is nothing to average.
pub fn gap_fill(field: &FieldGrid) -> Result<(Grid2<f64>, f64)> {
    let stats = field.stats().ok_or(Error::NoDefinedCells)?;
    let filled = field.map(|cell| cell.value().unwrap_or(stats.mean));
    Ok((filled, stats.mean))
}

pub fn estimate_regional(
    field: &FieldGrid,
    sigma: f64,
    boundary: BoundaryMode,
) -> Result<RegionalEstimate> {
    let (filled, fill_value) = gap_fill(field)?;
    let filled_cells = field.len() - field.defined_count();
    if filled_cells > 0 {
        log::debug!("Gap-filled {filled_cells} undefined cells with mean {fill_value}");
    }

    let grid = gaussian_smooth(&filled, sigma, boundary);

    Ok(RegionalEstimate {
        grid,
        fill_value,
        filled_cells,
    })
}
