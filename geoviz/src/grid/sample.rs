use std::cmp::Ordering;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::Grid2;
use crate::error::{Error, Result};

/// Number of grid nodes along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub cols: usize,
    pub rows: usize,
}

impl Default for Resolution {
    fn default() -> Self {
        Self::square(100)
    }
}

impl Resolution {
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    pub const fn square(n: usize) -> Self {
        Self { cols: n, rows: n }
    }

    /// Both axes need their two end nodes.
    pub fn validate(&self) -> Result<()> {
        if self.cols < 2 || self.rows < 2 {
            return Err(Error::InvalidConfig(format!(
                "resolution must be at least 2x2, got {}x{}",
                self.cols, self.rows
            )));
        }
        Ok(())
    }
}

/// Axis-aligned bounds of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extent {
    /// Returns `None` for an empty iterator.
    pub fn of_points(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut extent = Self {
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        for p in points {
            extent.x_min = extent.x_min.min(p.x);
            extent.x_max = extent.x_max.max(p.x);
            extent.y_min = extent.y_min.min(p.y);
            extent.y_max = extent.y_max.max(p.y);
        }
        Some(extent)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Evenly spaced nodes from `min` to `max`, both ends included.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    min: f64,
    max: f64,
    nodes: Vec<f64>,
}

impl Axis {
    pub fn new(name: &'static str, min: f64, max: f64, count: usize) -> Result<Self> {
        if max.partial_cmp(&min) != Some(Ordering::Greater) {
            return Err(Error::DegenerateExtent {
                axis: name,
                value: min,
            });
        }
        if count < 2 {
            return Err(Error::InvalidConfig(format!(
                "{name} axis needs at least 2 nodes, got {count}"
            )));
        }

        let span = max - min;
        let last = (count - 1) as f64;
        let mut nodes: Vec<f64> = (0..count)
            .map(|i| min + span * (i as f64 / last))
            .collect();
        nodes[count - 1] = max;

        Ok(Self { min, max, nodes })
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn step(&self) -> f64 {
        (self.max - self.min) / (self.nodes.len() - 1) as f64
    }

    #[inline]
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, i: usize) -> f64 {
        self.nodes[i]
    }

    /// Fractional node index of coordinate `v` (may fall outside `0..len`).
    #[inline]
    pub fn position(&self, v: f64) -> f64 {
        (v - self.min) / self.step()
    }
}

/// Regular mesh of query nodes covering an extent.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    x: Axis,
    y: Axis,
}

impl SampleGrid {
    pub fn from_extent(extent: &Extent, resolution: Resolution) -> Result<Self> {
        resolution.validate()?;
        Ok(Self {
            x: Axis::new("x", extent.x_min, extent.x_max, resolution.cols)?,
            y: Axis::new("y", extent.y_min, extent.y_max, resolution.rows)?,
        })
    }

    #[inline]
    pub fn x_axis(&self) -> &Axis {
        &self.x
    }

    #[inline]
    pub fn y_axis(&self) -> &Axis {
        &self.y
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.y.len()
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.cols(), self.rows())
    }

    pub fn extent(&self) -> Extent {
        Extent {
            x_min: self.x.min,
            x_max: self.x.max,
            y_min: self.y.min,
            y_max: self.y.max,
        }
    }

    #[inline]
    pub fn node(&self, col: usize, row: usize) -> DVec2 {
        DVec2::new(self.x.nodes[col], self.y.nodes[row])
    }

    /// The `grid_x`, `grid_y` coordinate meshes.
    pub fn mesh(&self) -> (Grid2<f64>, Grid2<f64>) {
        let grid_x = Grid2::from_fn(self.cols(), self.rows(), |col, _| self.x.nodes[col]);
        let grid_y = Grid2::from_fn(self.cols(), self.rows(), |_, row| self.y.nodes[row]);
        (grid_x, grid_y)
    }
}
