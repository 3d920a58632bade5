//! Separable Gaussian smoothing of dense grids.
//!
//! Rows are convolved first, then columns, each with the same normalized 1D
//! kernel. Samples beyond the grid edge are taken from inside the grid
//! according to [`BoundaryMode`].

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::grid::Grid2;

/// The kernel is truncated at this many standard deviations.
pub const KERNEL_TRUNCATE: f64 = 4.0;

/// How samples beyond the grid edge are synthesized.
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
pub enum BoundaryMode {
    /// Half-sample symmetric: `d c b a | a b c d | d c b a`.
    #[default]
    Reflect,
    /// Whole-sample symmetric: `d c b | a b c d | c b a`.
    Mirror,
    /// Edge replicate: `a a a | a b c d | d d d`.
    Nearest,
}

impl BoundaryMode {
    /// Maps a possibly out-of-range index into `0..len`.
    #[inline]
    pub fn resolve(self, index: isize, len: usize) -> usize {
        debug_assert!(len > 0);
        let n = len as isize;
        if (0..n).contains(&index) {
            return index as usize;
        }
        match self {
            BoundaryMode::Nearest => index.clamp(0, n - 1) as usize,
            BoundaryMode::Reflect => {
                let folded = index.rem_euclid(2 * n);
                if folded < n {
                    folded as usize
                } else {
                    (2 * n - 1 - folded) as usize
                }
            }
            BoundaryMode::Mirror => {
                if n == 1 {
                    return 0;
                }
                let period = 2 * n - 2;
                let folded = index.rem_euclid(period);
                if folded < n {
                    folded as usize
                } else {
                    (period - folded) as usize
                }
            }
        }
    }
}

/// Normalized 1D Gaussian kernel of length `2 * radius + 1`,
/// `radius = floor(KERNEL_TRUNCATE * sigma + 0.5)`.
pub fn gaussian_kernel_1d(sigma: f64) -> Vec<f64> {
    assert!(sigma > 0.0, "Sigma must be positive");

    let radius = (KERNEL_TRUNCATE * sigma + 0.5) as usize;
    let two_sigma_sq = 2.0 * sigma * sigma;

    let mut kernel: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let x = i as f64 - radius as f64;
            (-x * x / two_sigma_sq).exp()
        })
        .collect();

    let sum: f64 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

/// Gaussian-smoothed copy of `grid`; `sigma == 0` returns it unchanged.
pub fn gaussian_smooth(grid: &Grid2<f64>, sigma: f64, boundary: BoundaryMode) -> Grid2<f64> {
    if sigma == 0.0 || grid.is_empty() {
        return grid.clone();
    }

    let kernel = gaussian_kernel_1d(sigma);
    let cols = grid.cols();
    let rows = grid.rows();

    let mut temp = Grid2::new_filled(cols, rows, 0.0);
    for row in 0..rows {
        let input = grid.row(row);
        for col in 0..cols {
            temp[(col, row)] = convolve_at(&kernel, col, cols, boundary, |i| input[i]);
        }
    }

    let mut output = Grid2::new_filled(cols, rows, 0.0);
    for col in 0..cols {
        for row in 0..rows {
            output[(col, row)] = convolve_at(&kernel, row, rows, boundary, |i| temp[(col, i)]);
        }
    }

    output
}

#[inline]
fn convolve_at(
    kernel: &[f64],
    center: usize,
    len: usize,
    boundary: BoundaryMode,
    sample: impl Fn(usize) -> f64,
) -> f64 {
    let radius = (kernel.len() / 2) as isize;
    kernel
        .iter()
        .enumerate()
        .map(|(k, &w)| {
            let index = center as isize + k as isize - radius;
            w * sample(boundary.resolve(index, len))
        })
        .sum()
}
