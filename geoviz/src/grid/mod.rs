//! Row-major 2-D grids used by every stage of the pipeline.
//!
//! Cells are addressed as `(col, row)`: columns run along x (or trace number),
//! rows along y (or time sample). Row 0 is the first row in memory; whether it
//! is drawn at the top or the bottom is a rendering decision.

mod sample;


use std::ops::{Index, IndexMut};
use std::slice;

pub use sample::{Axis, Extent, Resolution, SampleGrid};

/// Grid whose cells may be undefined (outside the data's convex hull).
pub type FieldGrid = Grid2<Option<f64>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Grid2<T> {
    cells: Vec<T>,
    cols: usize,
    rows: usize,
}

impl<T> Grid2<T> {
    pub fn new(cols: usize, rows: usize, cells: Vec<T>) -> Self {
        assert_eq!(
            cells.len(),
            cols * rows,
            "cells length must equal cols * rows"
        );
        Self { cells, cols, rows }
    }

    /// Builds a grid by evaluating `f(col, row)` for every cell.
    pub fn from_fn(cols: usize, rows: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(col, row));
            }
        }
        Self { cells, cols, rows }
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> &T {
        debug_assert!(col < self.cols && row < self.rows);
        &self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn get_mut(&mut self, col: usize, row: usize) -> &mut T {
        debug_assert!(col < self.cols && row < self.rows);
        &mut self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// `(rows, cols)`, the same order numpy reports.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.cells.iter()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }

    pub fn same_shape<U>(&self, other: &Grid2<U>) -> bool {
        self.cols == other.cols && self.rows == other.rows
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid2<U> {
        Grid2 {
            cells: self.cells.iter().map(f).collect(),
            cols: self.cols,
            rows: self.rows,
        }
    }

    /// Combines two grids of identical shape cell by cell.
    pub fn zip_map<U, V>(&self, other: &Grid2<U>, mut f: impl FnMut(&T, &U) -> V) -> Grid2<V> {
        assert!(self.same_shape(other), "grid shape mismatch");
        Grid2 {
            cells: self
                .cells
                .iter()
                .zip(other.cells.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
            cols: self.cols,
            rows: self.rows,
        }
    }

    /// Copies the column range `cols` of every row into a new grid.
    pub fn column_window(&self, cols: std::ops::Range<usize>) -> Grid2<T>
    where
        T: Clone,
    {
        assert!(
            cols.start <= cols.end && cols.end <= self.cols,
            "column window out of bounds"
        );
        let width = cols.end - cols.start;
        let mut cells = Vec::with_capacity(width * self.rows);
        for row in 0..self.rows {
            cells.extend_from_slice(&self.row(row)[cols.clone()]);
        }
        Grid2 {
            cells,
            cols: width,
            rows: self.rows,
        }
    }
}

impl<T: Clone> Grid2<T> {
    pub fn new_filled(cols: usize, rows: usize, value: T) -> Self {
        Self {
            cells: vec![value; cols * rows],
            cols,
            rows,
        }
    }
}

impl<T> Index<(usize, usize)> for Grid2<T> {
    type Output = T;

    #[inline]
    fn index(&self, (col, row): (usize, usize)) -> &Self::Output {
        &self.cells[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid2<T> {
    #[inline]
    fn index_mut(&mut self, (col, row): (usize, usize)) -> &mut Self::Output {
        &mut self.cells[row * self.cols + col]
    }
}

impl<'a, T> IntoIterator for &'a Grid2<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// A cell that may or may not carry a usable number.
pub trait CellValue: Copy {
    fn value(self) -> Option<f64>;
}

impl CellValue for f64 {
    #[inline]
    fn value(self) -> Option<f64> {
        self.is_finite().then_some(self)
    }
}

impl CellValue for Option<f64> {
    #[inline]
    fn value(self) -> Option<f64> {
        self.filter(|v| v.is_finite())
    }
}

/// Summary statistics over the defined cells of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    pub defined: usize,
}

impl<T: CellValue> Grid2<T> {
    pub fn defined_count(&self) -> usize {
        self.cells.iter().filter(|c| c.value().is_some()).count()
    }

    /// Returns `None` when no cell is defined.
    pub fn stats(&self) -> Option<GridStats> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut defined = 0usize;
        for v in self.cells.iter().filter_map(|c| c.value()) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            defined += 1;
        }
        if defined == 0 {
            return None;
        }

        let mean = sum / defined as f64;
        let variance = self
            .cells
            .iter()
            .filter_map(|c| c.value())
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / defined as f64;

        Some(GridStats {
            min,
            max,
            mean,
            variance,
            defined,
        })
    }

    /// Largest absolute defined value.
    pub fn abs_max(&self) -> Option<f64> {
        self.cells
            .iter()
            .filter_map(|c| c.value())
            .map(f64::abs)
            .reduce(f64::max)
    }
}
