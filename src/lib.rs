#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod terrain;

pub use config::{GeneratorConfig, MapSize};
pub use error::{Result, TerrainError};
pub use models::{Grid, GridWindow, TerrainBand};
pub use seed::{MapSeed, SeedOffset, SeedSource};
pub use terrain::{
    classify, GeneratedMap, GenerationRequest, HeightAdjustments, TerrainGenerator, ThresholdTable,
};
