pub mod band;
pub mod grid;

pub use band::TerrainBand;
pub use grid::{Grid, GridWindow};
