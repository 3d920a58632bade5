//! Value-to-color scaling: automatic or user-clipped bounds.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{CellValue, Grid2};

/// Closed value interval mapped onto the colormap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRange {
    pub vmin: f64,
    pub vmax: f64,
}

impl ClipRange {
    pub const fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// `±fraction · abs_max`, the default manual clip for seismic amplitudes.
    pub fn symmetric(abs_max: f64, fraction: f64) -> Self {
        let half = abs_max.abs() * fraction;
        Self::new(-half, half)
    }

    /// Position of `v` in the range, clamped to `[0, 1]`.
    ///
    /// A zero-width range maps everything to the low end.
    #[inline]
    pub fn normalize(&self, v: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span > 0.0 {
            ((v - self.vmin) / span).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ScaleMode {
    /// Bounds follow the min and max of the defined cells.
    #[default]
    Auto,
    Manual { vmin: f64, vmax: f64 },
}

impl ScaleMode {
    pub fn validate(&self) -> Result<()> {
        if let ScaleMode::Manual { vmin, vmax } = *self {
            if !(vmin.is_finite() && vmax.is_finite()) || vmin >= vmax {
                return Err(Error::InvalidConfig(format!(
                    "manual scale needs finite vmin < vmax, got {vmin}..{vmax}"
                )));
            }
        }
        Ok(())
    }

    /// Concrete bounds for `grid`; an all-undefined grid resolves to `0..0`.
    pub fn resolve<T: CellValue>(&self, grid: &Grid2<T>) -> ClipRange {
        match *self {
            ScaleMode::Manual { vmin, vmax } => ClipRange::new(vmin, vmax),
            ScaleMode::Auto => grid
                .stats()
                .map(|s| ClipRange::new(s.min, s.max))
                .unwrap_or(ClipRange::new(0.0, 0.0)),
        }
    }
}
