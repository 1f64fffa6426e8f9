//! Map seeds and the random sources that produce them.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// Longest digit string that always fits in a `u64`.
pub const MAX_SEED_DIGITS: usize = 19;

/// Length of seeds produced for the "random seed" action.
pub const DEFAULT_SEED_DIGITS: usize = 10;

/// Value that deterministically fixes a generated map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapSeed(pub u64);

impl MapSeed {
    /// Parse a seed typed by the user. A blank entry means "no seed".
    pub fn parse_optional(input: &str) -> Result<Option<Self>> {
        if input.trim().is_empty() {
            Ok(None)
        } else {
            input.parse().map(Some)
        }
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for MapSeed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for MapSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MapSeed {
    type Err = TerrainError;

    /// Only plain decimal digits are accepted; signs, separators and other
    /// text are rejected rather than hashed into a number.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s.trim();
        let invalid = |reason: &'static str| TerrainError::InvalidSeedFormat {
            input: s.to_string(),
            reason,
        };
        if digits.is_empty() {
            return Err(invalid("seed is empty"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("seed must contain only decimal digits"));
        }
        digits
            .parse::<u64>()
            .map(MapSeed)
            .map_err(|_| invalid("seed does not fit in 64 bits"))
    }
}

/// Per-axis translation applied to noise coordinates.
///
/// Different seeds sample different windows of the same noise field
/// instead of reseeding the noise function itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SeedOffset {
    pub dx: i32,
    pub dy: i32,
}

impl SeedOffset {
    /// Draw `dx` then `dy`, each uniformly in `[-range, range]`.
    pub fn from_seed(seed: MapSeed, range: u32) -> Self {
        let range = range.min(i32::MAX as u32) as i32;
        let mut rng = ChaCha8Rng::seed_from_u64(seed.0);
        let dx = rng.random_range(-range..=range);
        let dy = rng.random_range(-range..=range);
        Self { dx, dy }
    }
}

/// Caller-owned random source used when a request carries no seed.
///
/// Callers that need reproducibility should pass an explicit seed instead of
/// sharing one source between concurrent generations.
#[derive(Debug, Clone)]
pub struct SeedSource {
    rng: ChaCha8Rng,
}

impl SeedSource {
    /// Source seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic source, mostly useful in tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn next_seed(&mut self) -> MapSeed {
        MapSeed(self.rng.random())
    }

    /// Use the given seed, or draw a fresh one.
    pub fn resolve(&mut self, seed: Option<MapSeed>) -> MapSeed {
        seed.unwrap_or_else(|| self.next_seed())
    }

    /// Random digit string suitable for a seed text field.
    pub fn seed_string(&mut self, len: usize) -> String {
        (0..len.min(MAX_SEED_DIGITS))
            .map(|_| char::from(b'0' + self.rng.random_range(0..10u8)))
            .collect()
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
