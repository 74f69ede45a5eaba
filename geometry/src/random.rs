//! Random sampling helpers for scene setup
//!
//! All helpers take the generator explicitly. Use [`seeded_rng`] for
//! reproducible output.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic generator for a given seed
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Uniform sample in `[min, max)` (returns `min` when the range is empty)
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Sample in `[min, max)` biased towards `min`
///
/// A uniform sample is raised to `pow` before being mapped onto the range, so
/// higher exponents produce more small values. `pow` of 0 or 1 is uniform.
pub fn random_pow<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32, pow: u32) -> f32 {
    let n = rng.random::<f32>().powi(pow.max(1) as i32);
    min + n * (max - min)
}

/// Uniformly distributed point on the surface of a sphere
pub fn random_spherical<R: Rng + ?Sized>(rng: &mut R, radius: f32, center: Vec3) -> Vec3 {
    // Uniform in cos(theta) avoids clustering at the poles
    let cos_theta = random_range(rng, -1.0, 1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = random_range(rng, 0.0, TAU);

    center + radius * Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = seeded_rng(42);
        let mut b = seeded_rng(42);

        for _ in 0..16 {
            assert_eq!(random_range(&mut a, 0.0, 1.0), random_range(&mut b, 0.0, 1.0));
        }
    }

    #[test]
    fn test_random_range_bounds() {
        let mut rng = seeded_rng(1);
        for _ in 0..1000 {
            let v = random_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&v));
        }
        assert_eq!(random_range(&mut rng, 5.0, 5.0), 5.0);
    }

    #[test]
    fn test_random_pow_is_biased_low() {
        let mut rng = seeded_rng(7);
        let samples: Vec<f32> = (0..2000).map(|_| random_pow(&mut rng, 0.0, 1.0, 3)).collect();

        assert!(samples.iter().all(|v| (0.0..1.0).contains(v)));
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        // E[u^3] = 1/4
        assert!((mean - 0.25).abs() < 0.05, "mean {}", mean);
    }

    #[test]
    fn test_random_spherical_on_surface() {
        let mut rng = seeded_rng(3);
        let center = Vec3::new(1.0, -2.0, 0.5);

        for _ in 0..500 {
            let p = random_spherical(&mut rng, 0.9, center);
            assert!(((p - center).length() - 0.9).abs() < 1e-5);
        }
    }
}
