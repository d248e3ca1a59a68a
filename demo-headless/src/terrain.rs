//! Gradient-noise seeding of the initial tree-age field.
//!
//! Samples multi-octave gradient noise at `((i - n/2) / scale, (j - n/2) / scale)`
//! and rescales the field linearly so its minimum becomes age 1 and its maximum
//! becomes `tree_life`.

use forest_fire_core::{FireSpreadError, GridState};

/// Permutation table size (must be power of 2).
const PERM_SIZE: usize = 256;

/// Fractal gradient noise with per-octave frequency and amplitude scaling.
#[derive(Clone, Debug)]
pub struct TerrainNoise {
    /// Number of octaves summed per sample.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f32,
    perm: Vec<u8>,
}

impl TerrainNoise {
    /// Three octaves, persistence 500 and lacunarity 0.7.
    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, 3, 500.0, 0.7)
    }

    pub fn with_params(seed: u64, octaves: u32, persistence: f32, lacunarity: f32) -> Self {
        Self {
            octaves,
            persistence,
            lacunarity,
            perm: generate_permutation(seed),
        }
    }

    /// Sample noise at a position, returns value in range [-1, 1].
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let mut total = 0.0_f32;
        let mut amplitude = 1.0_f32;
        let mut frequency = 1.0_f32;
        let mut amplitude_sum = 0.0_f32;

        for _ in 0..self.octaves {
            total += self.gradient_noise_2d(x * frequency, y * frequency) * amplitude;
            amplitude_sum += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        if amplitude_sum > 0.0 {
            (total / amplitude_sum).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    fn gradient_noise_2d(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let fx = x - x.floor();
        let fy = y - y.floor();

        let sx = smoothstep(fx);
        let sy = smoothstep(fy);

        let n00 = self.gradient_dot(x0, y0, fx, fy);
        let n10 = self.gradient_dot(x0 + 1, y0, fx - 1.0, fy);
        let n01 = self.gradient_dot(x0, y0 + 1, fx, fy - 1.0);
        let n11 = self.gradient_dot(x0 + 1, y0 + 1, fx - 1.0, fy - 1.0);

        lerp(lerp(n00, n10, sx), lerp(n01, n11, sx), sy)
    }

    fn gradient_dot(&self, ix: i32, iy: i32, dx: f32, dy: f32) -> f32 {
        use std::f32::consts::FRAC_1_SQRT_2;
        const GRADIENTS: [(f32, f32); 8] = [
            (1.0, 0.0),
            (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            (0.0, 1.0),
            (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            (-1.0, 0.0),
            (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
            (0.0, -1.0),
            (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
        ];

        let px = (ix & 0xFF) as usize;
        let py = (iy & 0xFF) as usize;
        let idx = usize::from(self.perm[usize::from(self.perm[px]) + py]) & 0x07;
        let (gx, gy) = GRADIENTS[idx];
        gx * dx + gy * dy
    }
}

/// Shuffled 0..=255, doubled so lookups never wrap.
fn generate_permutation(seed: u64) -> Vec<u8> {
    let mut perm: Vec<u8> = (0..=255).collect();

    // Fisher-Yates with a MINSTD generator; a zero state would stay zero
    let mut rng_state = seed.max(1);
    for i in (1..PERM_SIZE).rev() {
        rng_state = rng_state.wrapping_mul(48_271) % 2_147_483_647;
        let j = (rng_state as usize) % (i + 1);
        perm.swap(i, j);
    }

    let mut doubled = perm.clone();
    doubled.extend_from_slice(&perm);
    doubled
}

#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Fill every cell of `grid` with a tree age in `[1, tree_life]`.
///
/// A perfectly flat noise field leaves every tree at `tree_life`.
///
/// # Errors
///
/// Returns `InvalidConfig` if `scale` is not a positive finite number.
pub fn seed_forest(
    grid: &mut GridState,
    noise: &TerrainNoise,
    scale: f32,
) -> Result<(), FireSpreadError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(FireSpreadError::invalid_config(
            "scale",
            format!("must be finite and positive, got {scale}"),
        ));
    }

    let size = grid.size();
    let half = size as f32 / 2.0;
    let field: Vec<f32> = (0..grid.cells().len())
        .map(|idx| {
            let i = (idx / size) as f32;
            let j = (idx % size) as f32;
            noise.sample((i - half) / scale, (j - half) / scale)
        })
        .collect();

    let (min, max) = field
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = max - min;
    let top = grid.tree_life() as f32;

    for (idx, &value) in field.iter().enumerate() {
        let age = if span > f32::EPSILON {
            1.0 + (top - 1.0) * (value - min) / span
        } else {
            top
        };
        grid.set_clamped(idx / size, idx % size, age.round() as i32)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_stays_in_range() {
        let noise = TerrainNoise::new(12345);
        for i in 0..1000 {
            let x = (i as f32) * 0.173;
            let y = (i as f32) * -0.291;
            let value = noise.sample(x, y);
            assert!(
                (-1.0..=1.0).contains(&value),
                "Noise value {value} at ({x}, {y}) is outside [-1, 1] range"
            );
        }
    }

    #[test]
    fn noise_is_deterministic_per_seed() {
        let a = TerrainNoise::new(99);
        let b = TerrainNoise::new(99);
        let c = TerrainNoise::new(100);

        let mut differs = false;
        for i in 0..100 {
            let (x, y) = (i as f32 * 0.37, i as f32 * 0.53);
            assert!((a.sample(x, y) - b.sample(x, y)).abs() < f32::EPSILON);
            if (a.sample(x, y) - c.sample(x, y)).abs() > f32::EPSILON {
                differs = true;
            }
        }
        assert!(differs, "Different seeds should produce different noise");
    }

    #[test]
    fn zero_octaves_is_flat() {
        let noise = TerrainNoise::with_params(5, 0, 0.5, 2.0);
        assert!(noise.sample(3.2, 4.7).abs() < f32::EPSILON);
    }

    #[test]
    fn seeded_forest_spans_full_age_range() {
        let mut grid = GridState::new(40, 50, 10).unwrap();
        seed_forest(&mut grid, &TerrainNoise::new(7), 8.0).unwrap();

        let min = grid.cells().iter().copied().min().unwrap();
        let max = grid.cells().iter().copied().max().unwrap();
        assert_eq!(min, 1);
        assert_eq!(max, 50);
    }

    #[test]
    fn flat_field_maps_to_tree_life() {
        let mut grid = GridState::new(4, 9, 3).unwrap();
        seed_forest(&mut grid, &TerrainNoise::with_params(1, 0, 0.5, 2.0), 1.0).unwrap();
        assert!(grid.cells().iter().all(|&v| v == 9));
    }

    #[test]
    fn rejects_bad_scale() {
        let mut grid = GridState::new(4, 9, 3).unwrap();
        assert!(seed_forest(&mut grid, &TerrainNoise::new(1), 0.0).is_err());
        assert!(seed_forest(&mut grid, &TerrainNoise::new(1), f32::NAN).is_err());
    }
}
