use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::seed::SeedOffset;

/// Configuration for the coherent noise sampled over the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// World-to-noise coordinate factor applied after the seed offset
    /// Typical range: 0.08 - 0.2
    pub scale: f64,

    /// Number of noise layers to combine
    pub octaves: usize,

    /// How much each octave contributes relative to the previous one
    pub persistence: f64,

    /// Frequency multiplier between octaves
    pub lacunarity: f64,

    /// Tiling period along x, in noise units (0 disables tiling)
    pub repeat_x: f64,

    /// Tiling period along y, in noise units (0 disables tiling)
    pub repeat_y: f64,

    /// Permutation seed of the noise function itself; map seeds only move
    /// the sampled window
    pub base: u32,

    /// Seed offsets are drawn from `[-offset_range, offset_range]` per axis
    pub offset_range: u32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            scale: 0.08,
            octaves: 6,
            persistence: 1.2,
            lacunarity: 0.7,
            repeat_x: 32.0,
            repeat_y: 32.0,
            base: 1,
            offset_range: 1024,
        }
    }
}

impl NoiseConfig {
    /// Coarser, higher-frequency parameter set used by the first map builder
    pub fn classic() -> Self {
        Self {
            scale: 0.2,
            octaves: 8,
            persistence: 1.0,
            lacunarity: 0.5,
            repeat_x: 1024.0,
            repeat_y: 1024.0,
            ..Default::default()
        }
    }
}

/// Tileable fractal Perlin sampler.
///
/// Holds no mutable state: identical inputs always give identical outputs,
/// and a single sampler can be shared across threads.
pub struct NoiseSampler {
    fbm: Fbm<Perlin>,
    scale: f64,
    repeat_x: f64,
    repeat_y: f64,
}

impl NoiseSampler {
    pub fn new(config: &NoiseConfig) -> Self {
        let fbm = Fbm::<Perlin>::new(config.base)
            .set_octaves(config.octaves.max(1))
            .set_frequency(1.0)
            .set_persistence(config.persistence)
            .set_lacunarity(config.lacunarity);

        Self {
            fbm,
            scale: config.scale,
            repeat_x: config.repeat_x,
            repeat_y: config.repeat_y,
        }
    }

    /// Sample at pre-scaled noise coordinates.
    /// Returns value in range [-1.0, 1.0]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let (x, tx) = wrap(x, self.repeat_x);
        let (y, ty) = wrap(y, self.repeat_y);

        // Blend each point with its copy one period back so that the field
        // matches itself across the wrap.
        let row = |y: f64| {
            let here = self.fbm.get([x, y]);
            if tx > 0.0 {
                lerp(here, self.fbm.get([x - self.repeat_x, y]), tx)
            } else {
                here
            }
        };
        let value = if ty > 0.0 {
            lerp(row(y), row(y - self.repeat_y), ty)
        } else {
            row(y)
        };

        value.clamp(-1.0, 1.0)
    }

    /// Sample at pre-scaled noise coordinates.
    /// Returns value in range [0.0, 1.0]
    pub fn sample_normalized(&self, x: f64, y: f64) -> f64 {
        normalize(self.sample(x, y))
    }

    /// Normalized sample for grid cell `(x, y)` translated by `offset`.
    pub fn sample_cell(&self, x: usize, y: usize, offset: SeedOffset) -> f64 {
        let nx = (x as i64 + offset.dx as i64) as f64 * self.scale;
        let ny = (y as i64 + offset.dy as i64) as f64 * self.scale;
        self.sample_normalized(nx, ny)
    }
}

/// Map raw noise in [-1, 1] to [0, 1].
pub fn normalize(value: f64) -> f64 {
    (value + 1.0) * 0.5
}

fn wrap(v: f64, period: f64) -> (f64, f64) {
    if period > 0.0 && period.is_finite() {
        let w = v.rem_euclid(period);
        (w, w / period)
    } else {
        (v, 0.0)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
