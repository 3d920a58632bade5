//! Piecewise-linear gridding of scattered observations.
//!
//! The distinct observation points are triangulated (Delaunay) and every grid
//! node inside a triangle receives the barycentric blend of the three vertex
//! values. Nodes outside the convex hull stay undefined.

mod delaunay;


use glam::DVec2;

use crate::error::{Error, Result};
use crate::grid::{FieldGrid, Grid2, Resolution, SampleGrid};
use crate::observation::{Observation, ObservationSet};

pub use delaunay::{TriangleIndices, Triangulation};

/// Barycentric slack so nodes on shared edges and hull edges are kept.
const BARYCENTRIC_EPS: f64 = 1e-10;

/// Gridded observations.
#[derive(Debug, Clone)]
pub struct Interpolated {
    pub sample_grid: SampleGrid,
    pub field: FieldGrid,
    pub triangle_count: usize,
}

/// Grids `observations` onto `resolution` nodes spanning their bounding box.
///
/// Checks run in a fixed order: resolution, then fewer than three distinct
/// points, then zero-width extent, then collinear points.
pub fn interpolate_linear(
    observations: &ObservationSet,
    resolution: Resolution,
) -> Result<Interpolated> {
    resolution.validate()?;

    let positions: Vec<DVec2> = observations.iter().map(Observation::position).collect();
    let distinct = delaunay::distinct_indices(&positions).len();
    if distinct < 3 {
        return Err(Error::InsufficientData { count: distinct });
    }

    let extent = observations
        .extent()
        .ok_or(Error::InsufficientData { count: 0 })?;
    let sample_grid = SampleGrid::from_extent(&extent, resolution)?;

    let triangulation = Triangulation::new(&positions)?;
    let values: Vec<f64> = (0..triangulation.points().len())
        .map(|v| observations.records()[triangulation.source_index(v)].value)
        .collect();

    let field = rasterize(&triangulation, &values, &sample_grid);

    log::debug!(
        "Interpolated {} observations onto {}x{} grid: {} triangles, {} defined cells",
        observations.len(),
        sample_grid.cols(),
        sample_grid.rows(),
        triangulation.triangles().len(),
        field.defined_count()
    );

    Ok(Interpolated {
        sample_grid,
        field,
        triangle_count: triangulation.triangles().len(),
    })
}

fn rasterize(triangulation: &Triangulation, values: &[f64], grid: &SampleGrid) -> FieldGrid {
    let mut field: FieldGrid = Grid2::new_filled(grid.cols(), grid.rows(), None);
    let x_axis = grid.x_axis();
    let y_axis = grid.y_axis();

    for &tri in triangulation.triangles() {
        let [a, b, c] = triangulation.corners(tri);
        let [va, vb, vc] = tri.map(|i| values[i]);

        let v0 = b - a;
        let v1 = c - a;
        let denom = v0.perp_dot(v1);
        if denom == 0.0 {
            continue;
        }

        let lo = a.min(b).min(c);
        let hi = a.max(b).max(c);
        let (col_lo, col_hi) = node_span(x_axis.position(lo.x), x_axis.position(hi.x), grid.cols());
        let (row_lo, row_hi) = node_span(y_axis.position(lo.y), y_axis.position(hi.y), grid.rows());

        for row in row_lo..row_hi {
            for col in col_lo..col_hi {
                let cell = field.get_mut(col, row);
                if cell.is_some() {
                    continue;
                }

                let v2 = grid.node(col, row) - a;
                let s = v2.perp_dot(v1) / denom;
                let t = v0.perp_dot(v2) / denom;
                let r = 1.0 - s - t;
                if s >= -BARYCENTRIC_EPS && t >= -BARYCENTRIC_EPS && r >= -BARYCENTRIC_EPS {
                    *cell = Some(r * va + s * vb + t * vc);
                }
            }
        }
    }

    field
}

/// Half-open node index range covering fractional positions `[lo, hi]`.
fn node_span(lo: f64, hi: f64, count: usize) -> (usize, usize) {
    let first = (lo - 1e-9).ceil().max(0.0) as usize;
    let last = (hi + 1e-9).floor();
    if last < 0.0 {
        return (0, 0);
    }
    let end = (last as usize + 1).min(count);
    (first.min(end), end)
}
