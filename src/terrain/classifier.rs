//! Height classification: normalized noise value -> terrain band.

use rayon::prelude::*;

use super::thresholds::ThresholdTable;
use crate::models::{Grid, TerrainBand};

/// Lowest band whose threshold strictly exceeds `value`; mountains when the
/// value reaches every threshold.
///
/// Pure: the table is only read. Because thresholds never decrease, the
/// result is monotone in `value`.
pub fn classify(value: f64, table: &ThresholdTable) -> TerrainBand {
    table
        .thresholds()
        .iter()
        .position(|&threshold| value < threshold)
        .and_then(|band| TerrainBand::from_id(band as u8))
        .unwrap_or(TerrainBand::Mountains)
}

/// Classify every cell of a normalized noise field, one row per task.
pub fn classify_grid(field: &Grid<f64>, table: &ThresholdTable) -> Grid<TerrainBand> {
    let mut bands = field.map(|_| TerrainBand::Water);
    bands.par_rows_mut().for_each(|(y, row)| {
        for (x, band) in row.iter_mut().enumerate() {
            *band = classify(field[(x, y)], table);
        }
    });
    bands
}
