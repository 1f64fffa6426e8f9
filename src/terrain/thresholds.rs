//! Threshold table mapping normalized noise to terrain bands, and the
//! slider-driven adjustments applied to it.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::models::TerrainBand;

/// Number of explicit thresholds; the last band (mountains) is unbounded above.
pub const THRESHOLD_COUNT: usize = TerrainBand::COUNT - 1;

/// Immutable default table: upper bounds for water .. hills.
pub const DEFAULT_THRESHOLDS: [f64; THRESHOLD_COUNT] = [0.48, 0.49, 0.50, 0.55, 0.57, 0.60];

/// Full tables for each water tier, driest first.
const WATER_TIERS: [[f64; THRESHOLD_COUNT]; 5] = [
    [0.40, 0.41, 0.43, 0.50, 0.53, 0.57],
    [0.44, 0.45, 0.465, 0.525, 0.55, 0.585],
    DEFAULT_THRESHOLDS,
    [0.52, 0.53, 0.54, 0.58, 0.60, 0.62],
    [0.56, 0.57, 0.58, 0.61, 0.63, 0.65],
];

/// Upper bounds of midland, highland and hills, measured above the lowland
/// bound, for each grass tier.
const GRASS_TIERS: [[f64; 3]; 5] = [
    [0.02, 0.035, 0.06],
    [0.035, 0.05, 0.08],
    [0.05, 0.07, 0.10],
    [0.065, 0.09, 0.12],
    [0.08, 0.11, 0.14],
];

/// Five-step scale that 0-100 slider levels are folded onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdjustTier {
    Lowest = 0,
    Low = 1,
    Baseline = 2,
    High = 3,
    Highest = 4,
}

impl AdjustTier {
    /// Breakpoints at 20/40/60/80. Levels are clamped to [0, 100]; NaN is
    /// treated as the baseline.
    pub fn from_level(level: f64) -> Self {
        if level.is_nan() {
            return AdjustTier::Baseline;
        }
        let level = level.clamp(0.0, 100.0);
        if level < 20.0 {
            AdjustTier::Lowest
        } else if level < 40.0 {
            AdjustTier::Low
        } else if level < 60.0 {
            AdjustTier::Baseline
        } else if level < 80.0 {
            AdjustTier::High
        } else {
            AdjustTier::Highest
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Ordered upper-bound thresholds for bands 0..=5.
///
/// Thresholds are finite, lie in [0, 1] and never decrease in band order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 6]", into = "[f64; 6]")]
pub struct ThresholdTable {
    thresholds: [f64; THRESHOLD_COUNT],
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS,
        }
    }
}

impl ThresholdTable {
    pub fn new(thresholds: [f64; THRESHOLD_COUNT]) -> Result<Self> {
        for (band, &t) in thresholds.iter().enumerate() {
            if !t.is_finite() || !(0.0..=1.0).contains(&t) {
                return Err(TerrainError::InvalidThresholds(format!(
                    "threshold {} for band {} is outside [0, 1]",
                    t, band
                )));
            }
        }
        if let Some(band) = thresholds.windows(2).position(|w| w[1] < w[0]) {
            return Err(TerrainError::InvalidThresholds(format!(
                "threshold for band {} ({}) is below band {} ({})",
                band + 1,
                thresholds[band + 1],
                band,
                thresholds[band]
            )));
        }
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &[f64; THRESHOLD_COUNT] {
        &self.thresholds
    }

    /// Upper bound of `band`; `None` for mountains.
    pub fn threshold(&self, band: TerrainBand) -> Option<f64> {
        self.thresholds.get(band.id() as usize).copied()
    }

    pub fn is_default(&self) -> bool {
        self.thresholds == DEFAULT_THRESHOLDS
    }

    /// Restore the immutable default table.
    pub fn reset_height_map(&mut self) {
        self.thresholds = DEFAULT_THRESHOLDS;
    }

    /// Rewrites every threshold from the fixed tier table. Higher levels
    /// raise the thresholds, so more of the map falls into water.
    pub fn set_water_level(&mut self, level: f64) {
        let tier = AdjustTier::from_level(level);
        if tier == AdjustTier::Baseline {
            return;
        }
        log::debug!("water level {} -> {:?}", level, tier);
        self.thresholds = WATER_TIERS[tier.index()];
    }

    /// Rewrites midland, highland and hills bounds relative to the current
    /// lowland bound. Water, shore and lowland are left untouched.
    pub fn set_grass_level(&mut self, level: f64) {
        let tier = AdjustTier::from_level(level);
        if tier == AdjustTier::Baseline {
            return;
        }
        log::debug!("grass level {} -> {:?}", level, tier);
        let lowland = self.thresholds[TerrainBand::Lowland as usize];
        for (i, rise) in GRASS_TIERS[tier.index()].iter().enumerate() {
            self.thresholds[TerrainBand::Midland as usize + i] = (lowland + rise).min(1.0);
        }
    }

    /// Placeholder: no tier changes the mountain boundary yet.
    // TODO: pick hills/mountains cutoffs per tier once the intended mountain
    // coverage for each slider step is decided.
    pub fn set_mountain_level(&mut self, level: f64) {
        let tier = AdjustTier::from_level(level);
        if tier != AdjustTier::Baseline {
            log::warn!("mountain level {:?} is not supported yet, table left unchanged", tier);
        }
    }

    /// Apply all three slider levels in the order water, grass, mountain.
    pub fn apply_adjustments(&mut self, adjustments: &HeightAdjustments) {
        self.set_water_level(adjustments.water);
        self.set_grass_level(adjustments.grass);
        self.set_mountain_level(adjustments.mountain);
    }
}

impl TryFrom<[f64; THRESHOLD_COUNT]> for ThresholdTable {
    type Error = TerrainError;

    fn try_from(thresholds: [f64; THRESHOLD_COUNT]) -> Result<Self> {
        Self::new(thresholds)
    }
}

impl From<ThresholdTable> for [f64; THRESHOLD_COUNT] {
    fn from(table: ThresholdTable) -> Self {
        table.thresholds
    }
}

/// Slider positions, each in [0, 100] with 50 as the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightAdjustments {
    pub water: f64,
    pub grass: f64,
    pub mountain: f64,
}

impl Default for HeightAdjustments {
    fn default() -> Self {
        Self {
            water: 50.0,
            grass: 50.0,
            mountain: 50.0,
        }
    }
}

impl HeightAdjustments {
    /// Fresh table: the default with these adjustments applied.
    pub fn to_table(&self) -> ThresholdTable {
        let mut table = ThresholdTable::default();
        table.apply_adjustments(self);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_breakpoints() {
        assert_eq!(AdjustTier::from_level(-5.0), AdjustTier::Lowest);
        assert_eq!(AdjustTier::from_level(0.0), AdjustTier::Lowest);
        assert_eq!(AdjustTier::from_level(19.9), AdjustTier::Lowest);
        assert_eq!(AdjustTier::from_level(20.0), AdjustTier::Low);
        assert_eq!(AdjustTier::from_level(40.0), AdjustTier::Baseline);
        assert_eq!(AdjustTier::from_level(59.9), AdjustTier::Baseline);
        assert_eq!(AdjustTier::from_level(60.0), AdjustTier::High);
        assert_eq!(AdjustTier::from_level(80.0), AdjustTier::Highest);
        assert_eq!(AdjustTier::from_level(250.0), AdjustTier::Highest);
        assert_eq!(AdjustTier::from_level(f64::NAN), AdjustTier::Baseline);
    }

    #[test]
    fn test_tier_tables_are_valid() {
        for tier in WATER_TIERS {
            assert!(ThresholdTable::new(tier).is_ok(), "{:?}", tier);
        }
        for water in [0.0, 30.0, 50.0, 70.0, 90.0] {
            for grass in [0.0, 30.0, 50.0, 70.0, 90.0] {
                let table = HeightAdjustments { water, grass, mountain: 50.0 }.to_table();
                assert!(ThresholdTable::new(table.thresholds).is_ok(), "{:?}", table);
            }
        }
    }

    #[test]
    fn test_validation() {
        assert!(ThresholdTable::new([0.5, 0.4, 0.6, 0.7, 0.8, 0.9]).is_err());
        assert!(ThresholdTable::new([0.1, 0.2, 0.3, 0.4, 0.5, 1.5]).is_err());
        assert!(ThresholdTable::new([f64::NAN, 0.2, 0.3, 0.4, 0.5, 0.6]).is_err());
        assert!(ThresholdTable::new([0.5; THRESHOLD_COUNT]).is_ok());
    }

    #[test]
    fn test_baseline_is_noop() {
        let mut table = ThresholdTable::default();
        table.set_water_level(50.0);
        table.set_grass_level(45.0);
        table.set_mountain_level(55.0);
        assert!(table.is_default());
    }

    #[test]
    fn test_water_level_direction() {
        let mut dry = ThresholdTable::default();
        dry.set_water_level(0.0);
        let mut wet = ThresholdTable::default();
        wet.set_water_level(100.0);

        let water = |t: &ThresholdTable| t.threshold(TerrainBand::Water).unwrap();
        assert!(water(&dry) < DEFAULT_THRESHOLDS[0]);
        assert!(water(&wet) > DEFAULT_THRESHOLDS[0]);
        for (d, w) in dry.thresholds().iter().zip(wet.thresholds()) {
            assert!(d < w);
        }
    }

    #[test]
    fn test_adjustments_are_idempotent() {
        let mut once = ThresholdTable::default();
        once.set_water_level(10.0);
        once.set_grass_level(85.0);

        let mut twice = once;
        twice.set_water_level(10.0);
        twice.set_grass_level(85.0);
        twice.set_grass_level(85.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_grass_only_touches_upper_bands() {
        let mut table = ThresholdTable::default();
        table.set_water_level(70.0);
        let before = *table.thresholds();
        table.set_grass_level(5.0);

        assert_eq!(table.thresholds()[..3], before[..3]);
        assert_ne!(table.thresholds()[3..], before[3..]);
        let lowland = before[2];
        assert!((table.thresholds()[3] - (lowland + 0.02)).abs() < 1e-12);
    }

    #[test]
    fn test_mountain_placeholder_leaves_table() {
        let mut table = ThresholdTable::default();
        table.set_water_level(25.0);
        let before = table;
        for level in [0.0, 25.0, 75.0, 100.0] {
            table.set_mountain_level(level);
        }
        assert_eq!(table, before);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut table = ThresholdTable::default();
        table.set_water_level(95.0);
        table.set_grass_level(0.0);
        table.set_mountain_level(100.0);
        assert!(!table.is_default());

        table.reset_height_map();
        assert_eq!(table.thresholds(), &[0.48, 0.49, 0.50, 0.55, 0.57, 0.60]);
    }

    #[test]
    fn test_serde_validates() {
        let table: ThresholdTable = toml::from_str::<Wrapper>("t = [0.4, 0.45, 0.5, 0.6, 0.7, 0.8]")
            .unwrap()
            .t;
        assert_eq!(table.thresholds()[3], 0.6);
        assert!(toml::from_str::<Wrapper>("t = [0.9, 0.45, 0.5, 0.6, 0.7, 0.8]").is_err());

        #[derive(Deserialize)]
        struct Wrapper {
            t: ThresholdTable,
        }
    }
}
