use rayon::prelude::*;

use super::classifier::classify_grid;
use super::cleanup::ShorelineCleanup;
use super::noise::NoiseSampler;
use super::thresholds::ThresholdTable;
use crate::config::{GeneratorConfig, MapSize};
use crate::error::{Result, TerrainError};
use crate::models::{Grid, TerrainBand};
use crate::seed::{MapSeed, SeedOffset, SeedSource};

/// Size and optional seed of a map to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    pub width: usize,
    pub height: usize,
    pub seed: Option<MapSeed>,
}

impl GenerationRequest {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            seed: None,
        }
    }

    pub fn square(size: MapSize) -> Self {
        Self::new(size.side(), size.side())
    }

    pub fn with_seed(mut self, seed: impl Into<MapSeed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Seed typed as text. Blank means unseeded; anything but decimal
    /// digits is rejected.
    pub fn with_seed_str(mut self, input: &str) -> Result<Self> {
        self.seed = MapSeed::parse_optional(input)?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(TerrainError::InvalidDimension { width, height });
        }
        Ok(())
    }
}

/// A finished band grid plus what produced it
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMap {
    pub seed: MapSeed,
    pub offset: SeedOffset,
    pub bands: Grid<TerrainBand>,
}

impl GeneratedMap {
    pub fn width(&self) -> usize {
        self.bands.width()
    }

    pub fn height(&self) -> usize {
        self.bands.height()
    }

    pub fn get(&self, x: usize, y: usize) -> Result<TerrainBand> {
        self.bands.get(x, y).copied()
    }

    /// Number of cells per band, indexed by band id
    pub fn band_counts(&self) -> [usize; TerrainBand::COUNT] {
        let mut counts = [0; TerrainBand::COUNT];
        for &band in self.bands.as_slice() {
            counts[band.id() as usize] += 1;
        }
        counts
    }

    pub fn into_grid(self) -> Grid<TerrainBand> {
        self.bands
    }
}

/// Generates terrain band grids from noise
pub struct TerrainGenerator {
    config: GeneratorConfig,
    sampler: NoiseSampler,
    cleanup: ShorelineCleanup,
}

impl TerrainGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let sampler = NoiseSampler::new(&config.noise);
        let cleanup = ShorelineCleanup::from_config(&config.cleanup);
        Self {
            config,
            sampler,
            cleanup,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a map for `request`, drawing a seed from `seeds` when the
    /// request has none. The request is validated before anything is drawn
    /// or allocated.
    pub fn generate(
        &self,
        request: &GenerationRequest,
        table: &ThresholdTable,
        seeds: &mut SeedSource,
    ) -> Result<GeneratedMap> {
        request.validate()?;
        let seed = seeds.resolve(request.seed);
        self.generate_seeded(request.width, request.height, seed, table)
    }

    /// Same seed, size, table and configuration always give a bit-identical
    /// grid.
    pub fn generate_seeded(
        &self,
        width: usize,
        height: usize,
        seed: MapSeed,
        table: &ThresholdTable,
    ) -> Result<GeneratedMap> {
        GenerationRequest::new(width, height).validate()?;

        let offset = SeedOffset::from_seed(seed, self.config.noise.offset_range);
        log::debug!(
            "Generating {}x{} map with seed {} (offset {}, {})",
            width,
            height,
            seed,
            offset.dx,
            offset.dy
        );

        let field = self.sample_field(width, height, offset)?;
        let mut bands = classify_grid(&field, table);
        let report = self.cleanup.run(&mut bands);
        log::debug!("Map generated, cleanup changed {} cells", report.total());

        Ok(GeneratedMap {
            seed,
            offset,
            bands,
        })
    }

    /// Normalized noise for every cell, in [0, 1]. Rows are sampled in
    /// parallel; cells do not depend on each other.
    pub fn sample_field(&self, width: usize, height: usize, offset: SeedOffset) -> Result<Grid<f64>> {
        let mut field = Grid::new(width, height, 0.0)?;
        field.par_rows_mut().for_each(|(y, row)| {
            for (x, value) in row.iter_mut().enumerate() {
                *value = self.sampler.sample_cell(x, y, offset);
            }
        });
        Ok(field)
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
