//! Scattered field observations and the coordinate range filter.

mod loader;

#[cfg(test)]
mod tests;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::Extent;

pub use loader::{Delimiter, ObservationTable, DEFAULT_VALUE_COLUMN};

/// One measurement of a geophysical field at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl Observation {
    pub const fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Inclusive numeric range; `min > max` selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordRange {
    pub min: f64,
    pub max: f64,
}

impl CoordRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }
}

/// Ordered observations with finite coordinates and values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSet {
    records: Vec<Observation>,
}

impl ObservationSet {
    pub fn new(records: Vec<Observation>) -> Result<Self> {
        for (i, obs) in records.iter().enumerate() {
            for (field, value) in [("x", obs.x), ("y", obs.y), ("value", obs.value)] {
                if !value.is_finite() {
                    return Err(Error::NonFinite {
                        location: format!("Record {}, field '{}'", i + 1, field),
                        value,
                    });
                }
            }
        }
        Ok(Self { records })
    }

    pub fn from_triplets(triplets: &[(f64, f64, f64)]) -> Result<Self> {
        Self::new(
            triplets
                .iter()
                .map(|&(x, y, value)| Observation::new(x, y, value))
                .collect(),
        )
    }

    /// Records already known to be finite.
    pub(crate) fn from_validated(records: Vec<Observation>) -> Self {
        debug_assert!(records
            .iter()
            .all(|o| o.x.is_finite() && o.y.is_finite() && o.value.is_finite()));
        Self { records }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn records(&self) -> &[Observation] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.records.iter()
    }

    /// Records whose `x` lies in `range`, in their original order.
    ///
    /// An empty result is returned as-is; gridding rejects it.
    pub fn filter_x_range(&self, range: CoordRange) -> ObservationSet {
        let records: Vec<Observation> = self
            .records
            .iter()
            .filter(|o| range.contains(o.x))
            .copied()
            .collect();

        log::debug!(
            "x range [{}, {}] kept {} of {} observations",
            range.min,
            range.max,
            records.len(),
            self.records.len()
        );

        ObservationSet { records }
    }

    pub fn extent(&self) -> Option<Extent> {
        Extent::of_points(self.records.iter().map(Observation::position))
    }

    /// `(min, max)` of the observed values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self.records.iter().map(|o| o.value);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
