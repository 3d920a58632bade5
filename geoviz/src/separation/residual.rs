use crate::grid::{CellValue, FieldGrid, Grid2};

/// `observed - regional` wherever `observed` is defined; undefined elsewhere.
pub fn compute_residual(observed: &FieldGrid, regional: &Grid2<f64>) -> FieldGrid {
    observed.zip_map(regional, |obs, &reg| obs.value().map(|v| v - reg))
}
