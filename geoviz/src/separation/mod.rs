//! Regional/residual separation of a potential field.
//!
//! ```text
//! observations ──► interpolate ──► observed ──► gap fill ──► smooth ──► regional
//!                                      │                                   │
//!                                      └──────────── minus ◄───────────────┘
//!                                                      │
//!                                                  residual
//! ```
//!
//! Every call recomputes all grids from scratch; nothing is cached between calls.

mod convolution;
mod regional;
mod residual;


use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{FieldGrid, Grid2, GridStats, Resolution, SampleGrid};
use crate::interpolation::interpolate_linear;
use crate::observation::{CoordRange, ObservationSet};

pub use convolution::{gaussian_kernel_1d, gaussian_smooth, BoundaryMode, KERNEL_TRUNCATE};
pub use regional::{estimate_regional, gap_fill, RegionalEstimate};
pub use residual::compute_residual;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparationConfig {
    /// Grid nodes per axis.
    pub resolution: Resolution,
    /// Gaussian scale in grid cells. Zero disables smoothing.
    pub sigma: f64,
    pub boundary: BoundaryMode,
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            sigma: 3.0,
            boundary: BoundaryMode::Reflect,
        }
    }
}

impl SeparationConfig {
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.resolution.validate()?;
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "sigma must be a finite non-negative number of grid cells, got {}",
                self.sigma
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Result
// ============================================================================

/// Observed, regional and residual grids on one sample grid.
#[derive(Debug, Clone)]
pub struct Separation {
    pub sample_grid: SampleGrid,
    pub observed: FieldGrid,
    pub regional: Grid2<f64>,
    pub residual: FieldGrid,
    /// Value substituted for undefined observed cells before smoothing.
    pub fill_value: f64,
    pub filled_cells: usize,
}

impl Separation {
    pub fn observed_stats(&self) -> Option<GridStats> {
        self.observed.stats()
    }

    pub fn regional_stats(&self) -> Option<GridStats> {
        self.regional.stats()
    }

    pub fn residual_stats(&self) -> Option<GridStats> {
        self.residual.stats()
    }

    /// Number of observed cells backed by data.
    pub fn defined_cells(&self) -> usize {
        self.observed.len() - self.filled_cells
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Grids `observations` and splits the field into regional and residual parts.
pub fn separate(observations: &ObservationSet, config: &SeparationConfig) -> Result<Separation> {
    config.validate()?;

    let interpolated = interpolate_linear(observations, config.resolution)?;
    let observed = interpolated.field;

    let regional = estimate_regional(&observed, config.sigma, config.boundary)?;
    let residual = compute_residual(&observed, &regional.grid);

    log::debug!(
        "Separated {}x{} grid with sigma {} ({} boundary)",
        observed.cols(),
        observed.rows(),
        config.sigma,
        config.boundary
    );

    Ok(Separation {
        sample_grid: interpolated.sample_grid,
        observed,
        regional: regional.grid,
        residual,
        fill_value: regional.fill_value,
        filled_cells: regional.filled_cells,
    })
}

/// [`separate`] restricted to observations with `x` inside `x_range`.
pub fn separate_in_range(
    observations: &ObservationSet,
    x_range: Option<CoordRange>,
    config: &SeparationConfig,
) -> Result<Separation> {
    match x_range {
        Some(range) => separate(&observations.filter_x_range(range), config),
        None => separate(observations, config),
    }
}
