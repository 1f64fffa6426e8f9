use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::terrain::cleanup::CleanupConfig;
use crate::terrain::noise::NoiseConfig;
use crate::terrain::thresholds::{HeightAdjustments, ThresholdTable};

/// Everything that shapes a generated map apart from its size and seed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub noise: NoiseConfig,
    pub cleanup: CleanupConfig,
    pub adjustments: HeightAdjustments,
}

impl GeneratorConfig {
    /// Threshold table described by the configured slider levels.
    pub fn threshold_table(&self) -> ThresholdTable {
        self.adjustments.to_table()
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Side length of a square preview map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MapSize {
    #[default]
    Small,
    Medium,
    Large,
    Custom(usize),
}

impl MapSize {
    /// The choices offered in the map size menu.
    pub const PRESETS: [MapSize; 3] = [MapSize::Small, MapSize::Medium, MapSize::Large];

    pub fn side(self) -> usize {
        match self {
            MapSize::Small => 64,
            MapSize::Medium => 128,
            MapSize::Large => 256,
            MapSize::Custom(side) => side,
        }
    }

    /// Any positive side; preset sizes map to their named variant.
    pub fn from_side(side: usize) -> Result<Self> {
        match side {
            0 => Err(TerrainError::InvalidDimension { width: 0, height: 0 }),
            64 => Ok(MapSize::Small),
            128 => Ok(MapSize::Medium),
            256 => Ok(MapSize::Large),
            side => Ok(MapSize::Custom(side)),
        }
    }
}

impl fmt::Display for MapSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.side())
    }
}

impl FromStr for MapSize {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self> {
        let side = s
            .trim()
            .parse::<usize>()
            .map_err(|_| TerrainError::InvalidMapSize(s.to_string()))?;
        Self::from_side(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_size_parsing() {
        assert_eq!("64".parse::<MapSize>(), Ok(MapSize::Small));
        assert_eq!("128".parse::<MapSize>(), Ok(MapSize::Medium));
        assert_eq!(" 256 ".parse::<MapSize>(), Ok(MapSize::Large));
        assert_eq!("100".parse::<MapSize>(), Ok(MapSize::Custom(100)));
        assert_eq!(
            "big".parse::<MapSize>(),
            Err(TerrainError::InvalidMapSize("big".to_string()))
        );
        assert!(matches!(
            "0".parse::<MapSize>(),
            Err(TerrainError::InvalidDimension { .. })
        ));
        assert!("-64".parse::<MapSize>().is_err());
    }

    #[test]
    fn test_presets_round_trip_through_display() {
        for size in MapSize::PRESETS {
            assert_eq!(size.to_string().parse::<MapSize>(), Ok(size));
        }
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GeneratorConfig::from_toml(
            r#"
            [noise]
            scale = 0.2

            [adjustments]
            water = 90.0
            "#,
        )
        .unwrap();

        assert_eq!(config.noise.scale, 0.2);
        assert_eq!(config.noise.octaves, NoiseConfig::default().octaves);
        assert!(config.cleanup.enabled);
        assert_eq!(config.adjustments.grass, 50.0);
        assert!(config.threshold_table().thresholds()[0] > 0.48);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(GeneratorConfig::from_toml("").unwrap(), GeneratorConfig::default());
        assert!(GeneratorConfig::default().threshold_table().is_default());
    }
}
