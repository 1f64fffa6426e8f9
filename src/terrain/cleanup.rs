//! Shoreline cleanup - neighbor rules applied after classification
//!
//! Enforces that water is ringed by shore, that shore borders only water,
//! shore or lowland, and that every shore tile lies near water.
//!
//! Every pass reads a snapshot of the grid and writes afterwards: edits are
//! computed from the grid as the previous pass left it, then applied in one
//! go. Visitation order within a pass therefore never changes the result.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Grid, TerrainBand};

/// Default Chebyshev radius within which a shore tile must see water.
pub const SHORE_WATER_RADIUS: usize = 4;

/// Cleanup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Run the cleanup passes at all
    pub enabled: bool,
    /// Radius of the water search for shore tiles
    pub shore_radius: usize,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            shore_radius: SHORE_WATER_RADIUS,
        }
    }
}

/// One full-grid rewrite step.
pub trait CleanupPass: Send + Sync {
    /// Pass name, for logging
    fn name(&self) -> &'static str;

    /// Rewrite the grid, returning the number of cells that changed.
    fn apply(&self, bands: &mut Grid<TerrainBand>) -> usize;
}

/// Compute `rule` for every cell against an unchanged grid, then apply the
/// results that differ from the current band.
fn rewrite<F>(bands: &mut Grid<TerrainBand>, rule: F) -> usize
where
    F: Fn(&Grid<TerrainBand>, usize, usize, TerrainBand) -> Option<TerrainBand> + Sync,
{
    let snapshot = &*bands;
    let rule = &rule;
    let edits: Vec<((usize, usize), TerrainBand)> = snapshot
        .par_rows()
        .flat_map_iter(|(y, row)| {
            row.iter().enumerate().filter_map(move |(x, &band)| {
                rule(snapshot, x, y, band)
                    .filter(|&new| new != band)
                    .map(|new| ((x, y), new))
            })
        })
        .collect();

    for &(pos, band) in &edits {
        bands[pos] = band;
    }
    edits.len()
}

fn has_neighbor(bands: &Grid<TerrainBand>, x: usize, y: usize, band: TerrainBand) -> bool {
    bands.moore_neighbors(x, y).any(|pos| bands[pos] == band)
}

/// Any land touching water becomes shore.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaterShorePass;

impl CleanupPass for WaterShorePass {
    fn name(&self) -> &'static str {
        "water-shore"
    }

    fn apply(&self, bands: &mut Grid<TerrainBand>) -> usize {
        rewrite(bands, |grid, x, y, band| {
            (!band.is_coastal() && has_neighbor(grid, x, y, TerrainBand::Water))
                .then_some(TerrainBand::Shore)
        })
    }
}

/// Any land touching shore becomes lowland.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShoreBorderPass;

impl CleanupPass for ShoreBorderPass {
    fn name(&self) -> &'static str {
        "shore-border"
    }

    fn apply(&self, bands: &mut Grid<TerrainBand>) -> usize {
        rewrite(bands, |grid, x, y, band| {
            (!band.is_coastal() && has_neighbor(grid, x, y, TerrainBand::Shore))
                .then_some(TerrainBand::Lowland)
        })
    }
}

/// Shore with no water within `radius` (Chebyshev) regresses to lowland.
#[derive(Debug, Clone, Copy)]
pub struct ShoreProximityPass {
    pub radius: usize,
}

impl Default for ShoreProximityPass {
    fn default() -> Self {
        Self {
            radius: SHORE_WATER_RADIUS,
        }
    }
}

impl CleanupPass for ShoreProximityPass {
    fn name(&self) -> &'static str {
        "shore-proximity"
    }

    fn apply(&self, bands: &mut Grid<TerrainBand>) -> usize {
        let radius = self.radius;
        rewrite(bands, |grid, x, y, band| {
            let stranded = band == TerrainBand::Shore
                && !grid.window(x, y, radius).any(|&b| b == TerrainBand::Water);
            stranded.then_some(TerrainBand::Lowland)
        })
    }
}

/// Edit counts per pass, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub passes: Vec<(&'static str, usize)>,
}

impl CleanupReport {
    pub fn total(&self) -> usize {
        self.passes.iter().map(|(_, n)| n).sum()
    }
}

/// Runs cleanup passes strictly in order; each pass sees the whole grid as
/// the previous pass left it.
pub struct ShorelineCleanup {
    passes: Vec<Box<dyn CleanupPass>>,
}

impl ShorelineCleanup {
    /// Cleanup with no passes
    pub fn empty() -> Self {
        Self { passes: Vec::new() }
    }

    /// The standard three passes; no passes when disabled.
    pub fn from_config(config: &CleanupConfig) -> Self {
        if !config.enabled {
            return Self::empty();
        }
        Self::empty()
            .with_pass(WaterShorePass)
            .with_pass(ShoreBorderPass)
            .with_pass(ShoreProximityPass {
                radius: config.shore_radius,
            })
    }

    pub fn with_pass<P: CleanupPass + 'static>(mut self, pass: P) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn run(&self, bands: &mut Grid<TerrainBand>) -> CleanupReport {
        let mut report = CleanupReport::default();
        for pass in &self.passes {
            let changed = pass.apply(bands);
            log::trace!("cleanup pass {}: {} cells changed", pass.name(), changed);
            report.passes.push((pass.name(), changed));
        }
        report
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }
}

impl Default for ShorelineCleanup {
    fn default() -> Self {
        Self::from_config(&CleanupConfig::default())
    }
}
