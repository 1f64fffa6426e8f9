// 地形生成模块

pub mod classifier;
pub mod cleanup;
pub mod height_generator;
pub mod noise;
pub mod thresholds;

pub use classifier::{classify, classify_grid};
pub use cleanup::{CleanupConfig, CleanupPass, CleanupReport, ShorelineCleanup};
pub use height_generator::{GeneratedMap, GenerationRequest, TerrainGenerator};
pub use noise::{NoiseConfig, NoiseSampler};
pub use thresholds::{AdjustTier, HeightAdjustments, ThresholdTable, DEFAULT_THRESHOLDS};
