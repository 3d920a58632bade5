//! Geophysical field visualization.
//!
//! Two pipelines share the grid, colormap and export machinery:
//!
//! - **Magnetic anomaly**: scattered `(x, y, value)` observations are gridded
//!   by linear interpolation over a Delaunay triangulation, a Gaussian
//!   low-pass of the gap-filled grid estimates the regional trend, and the
//!   residual is what remains. Cells outside the data hull stay undefined.
//! - **Seismic section**: sparse random reflectivity convolved with a Ricker
//!   wavelet, windowed by trace and clipped for display.

pub mod dashboard;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod observation;
pub mod render;
pub mod seismic;
pub mod separation;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
pub use grid::{CellValue, Extent, FieldGrid, Grid2, GridStats, Resolution, SampleGrid};
pub use observation::{CoordRange, Observation, ObservationSet, ObservationTable};
pub use separation::{separate, separate_in_range, Separation, SeparationConfig};
