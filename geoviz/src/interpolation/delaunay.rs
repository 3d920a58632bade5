//! Bowyer–Watson Delaunay triangulation of scattered points.
//!
//! Points are shifted and uniformly scaled into `[-1, 1]` before insertion;
//! uniform scaling keeps the Delaunay property, so the resulting connectivity
//! is valid for the original coordinates.

use std::collections::VecDeque;

use glam::DVec2;
use hashbrown::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::grid::Extent;

/// Half-size of the enclosing super-triangle in normalized coordinates.
const SUPER_RADIUS: f64 = 1.0e3;

/// Minimum distance from the fitted line (normalized units) for a point set
/// to count as non-collinear.
const COLLINEAR_EPS: f64 = 1e-10;

/// Slack for point-in-triangle tests on shared edges.
const CONTAINS_EPS: f64 = 1e-12;

/// Triangle vertex indices, counter-clockwise.
pub type TriangleIndices = [usize; 3];

#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<DVec2>,
    /// Index into the caller's slice for every vertex in `points`.
    source: Vec<usize>,
    triangles: Vec<TriangleIndices>,
}

impl Triangulation {
    /// Triangulates `points`; exact duplicates are collapsed (first one wins).
    ///
    /// Fails with `InsufficientData` for fewer than three distinct points and
    /// with `CollinearData` when they all lie on one line.
    pub fn new(points: &[DVec2]) -> Result<Self> {
        let source = distinct_indices(points);
        if source.len() < points.len() {
            log::warn!(
                "Dropped {} duplicate point(s) before triangulation",
                points.len() - source.len()
            );
        }
        if source.len() < 3 {
            return Err(Error::InsufficientData {
                count: source.len(),
            });
        }

        let points: Vec<DVec2> = source.iter().map(|&i| points[i]).collect();
        let normalized = normalize(&points);
        if is_collinear(&normalized) {
            return Err(Error::CollinearData {
                count: points.len(),
            });
        }

        let triangles = bowyer_watson(&normalized);
        log::debug!(
            "Triangulated {} points into {} triangles",
            points.len(),
            triangles.len()
        );

        Ok(Self {
            points,
            source,
            triangles,
        })
    }

    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    #[inline]
    pub fn triangles(&self) -> &[TriangleIndices] {
        &self.triangles
    }

    /// Index of vertex `vertex` in the slice passed to [`Triangulation::new`].
    #[inline]
    pub fn source_index(&self, vertex: usize) -> usize {
        self.source[vertex]
    }

    pub fn corners(&self, triangle: TriangleIndices) -> [DVec2; 3] {
        triangle.map(|i| self.points[i])
    }
}

/// Indices of the first occurrence of every distinct coordinate pair.
pub(crate) fn distinct_indices(points: &[DVec2]) -> Vec<usize> {
    // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
    let key = |p: DVec2| ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());

    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| seen.insert(key(**p)))
        .map(|(i, _)| i)
        .collect()
}

fn normalize(points: &[DVec2]) -> Vec<DVec2> {
    let Some(extent) = Extent::of_points(points.iter().copied()) else {
        return Vec::new();
    };
    let center = DVec2::new(
        0.5 * (extent.x_min + extent.x_max),
        0.5 * (extent.y_min + extent.y_max),
    );
    let half = 0.5 * extent.width().max(extent.height());
    let scale = if half > 0.0 { 1.0 / half } else { 1.0 };
    points.iter().map(|&p| (p - center) * scale).collect()
}

/// Twice the signed area of `abc`; positive when counter-clockwise.
#[inline]
pub(crate) fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

/// Positive when `d` is strictly inside the circumcircle of CCW triangle `abc`.
#[inline]
fn in_circle(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> f64 {
    let ad = a - d;
    let bd = b - d;
    let cd = c - d;
    ad.length_squared() * bd.perp_dot(cd)
        + bd.length_squared() * cd.perp_dot(ad)
        + cd.length_squared() * ad.perp_dot(bd)
}

fn is_collinear(points: &[DVec2]) -> bool {
    let origin = points[0];
    let far = points
        .iter()
        .copied()
        .max_by(|a, b| {
            a.distance_squared(origin)
                .total_cmp(&b.distance_squared(origin))
        })
        .unwrap_or(origin);
    let baseline = (far - origin).length();
    if baseline == 0.0 {
        return true;
    }
    points
        .iter()
        .all(|&p| orient(origin, far, p).abs() <= COLLINEAR_EPS * baseline)
}

fn contains(tri: [DVec2; 3], p: DVec2) -> bool {
    orient(tri[0], tri[1], p) >= -CONTAINS_EPS
        && orient(tri[1], tri[2], p) >= -CONTAINS_EPS
        && orient(tri[2], tri[0], p) >= -CONTAINS_EPS
}

#[inline]
fn edges(t: TriangleIndices) -> [(usize, usize); 3] {
    [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])]
}

fn bowyer_watson(points: &[DVec2]) -> Vec<TriangleIndices> {
    let n = points.len();
    let r = SUPER_RADIUS;
    let mut vertices = points.to_vec();
    vertices.push(DVec2::new(-r * 3f64.sqrt(), -r));
    vertices.push(DVec2::new(r * 3f64.sqrt(), -r));
    vertices.push(DVec2::new(0.0, 2.0 * r));

    let mut triangles: Vec<TriangleIndices> = vec![[n, n + 1, n + 2]];
    let corners = |t: &TriangleIndices, v: &[DVec2]| [v[t[0]], v[t[1]], v[t[2]]];

    for (pi, &p) in points.iter().enumerate() {
        let bad: Vec<usize> = (0..triangles.len())
            .filter(|&ti| {
                let [a, b, c] = corners(&triangles[ti], &vertices);
                in_circle(a, b, c, p) > 0.0
            })
            .collect();

        let Some(seed) = bad
            .iter()
            .copied()
            .find(|&ti| contains(corners(&triangles[ti], &vertices), p))
        else {
            log::warn!("Point {pi} could not be located in the triangulation; skipped");
            continue;
        };

        let owner: HashMap<(usize, usize), usize> = bad
            .iter()
            .flat_map(|&ti| edges(triangles[ti]).map(|e| (e, ti)))
            .collect();

        // Cavity: bad triangles reachable from the one holding `p`.
        let mut cavity = HashSet::new();
        let mut queue = VecDeque::from([seed]);
        cavity.insert(seed);
        while let Some(ti) = queue.pop_front() {
            for (a, b) in edges(triangles[ti]) {
                if let Some(&next) = owner.get(&(b, a)) {
                    if cavity.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        let boundary: Vec<(usize, usize)> = cavity
            .iter()
            .flat_map(|&ti| edges(triangles[ti]))
            .filter(|&(a, b)| {
                owner
                    .get(&(b, a))
                    .is_none_or(|neighbor| !cavity.contains(neighbor))
            })
            .collect();

        let mut index = 0;
        triangles.retain(|_| {
            let keep = !cavity.contains(&index);
            index += 1;
            keep
        });
        triangles.extend(boundary.into_iter().map(|(a, b)| [a, b, pi]));
    }

    triangles.retain(|t| t.iter().all(|&v| v < n));
    triangles
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn area(tri: [DVec2; 3]) -> f64 {
        0.5 * orient(tri[0], tri[1], tri[2])
    }

    #[test]
    fn square_splits_into_two_triangles() {
        let pts = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
        ];
        let tri = Triangulation::new(&pts).unwrap();
        assert_eq!(tri.triangles().len(), 2);
        let total: f64 = tri.triangles().iter().map(|&t| area(tri.corners(t))).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn lattice_covers_its_hull() {
        let pts: Vec<DVec2> = (0..3)
            .flat_map(|y| (0..3).map(move |x| DVec2::new(x as f64, y as f64)))
            .collect();
        let tri = Triangulation::new(&pts).unwrap();
        assert_eq!(tri.triangles().len(), 8);
        let total: f64 = tri.triangles().iter().map(|&t| area(tri.corners(t))).sum();
        assert!((total - 4.0).abs() < 1e-12);
    }

    #[test]
    fn triangles_are_ccw_and_delaunay() {
        let mut rng = StdRng::seed_from_u64(7);
        let pts: Vec<DVec2> = (0..40)
            .map(|_| DVec2::new(rng.random_range(0.0..100.0), rng.random_range(0.0..50.0)))
            .collect();
        let tri = Triangulation::new(&pts).unwrap();
        assert!(!tri.triangles().is_empty());

        for &t in tri.triangles() {
            let [a, b, c] = tri.corners(t);
            assert!(orient(a, b, c) > 0.0);
            for (i, &p) in tri.points().iter().enumerate() {
                if t.contains(&i) {
                    continue;
                }
                // Relative tolerance: in_circle scales with the fourth power of length.
                assert!(in_circle(a, b, c, p) <= 1e-6, "point {i} inside circumcircle");
            }
        }
    }

    #[test]
    fn duplicates_are_collapsed_first_wins() {
        let pts = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(-0.0, 0.0),
            DVec2::new(0.0, 1.0),
        ];
        assert_eq!(distinct_indices(&pts), vec![0, 1, 3]);
        let tri = Triangulation::new(&pts).unwrap();
        assert_eq!(tri.points().len(), 3);
        assert_eq!(tri.source_index(2), 3);
        assert_eq!(tri.triangles().len(), 1);
    }

    #[test]
    fn too_few_distinct_points() {
        let pts = [DVec2::new(1.0, 1.0), DVec2::new(1.0, 1.0), DVec2::new(2.0, 0.0)];
        assert!(matches!(
            Triangulation::new(&pts),
            Err(Error::InsufficientData { count: 2 })
        ));
        assert!(matches!(
            Triangulation::new(&[]),
            Err(Error::InsufficientData { count: 0 })
        ));
    }

    #[test]
    fn collinear_points_are_rejected() {
        let pts: Vec<DVec2> = (0..5)
            .map(|i| DVec2::new(i as f64 * 0.1, i as f64 * 0.3))
            .collect();
        assert!(matches!(
            Triangulation::new(&pts),
            Err(Error::CollinearData { count: 5 })
        ));
    }
}
