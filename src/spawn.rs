//! Randomness for spawning atoms and for recovering from degenerate vectors.
//!
//! Wraps a small, fast RNG behind a few geometric helpers so the rest of the
//! crate never touches `rand` directly:
//!
//! ```ignore
//! let mut rng = SpawnRng::seeded(42);
//! let trajectory = rng.random_direction();
//! let rotation = rng.random_orientation();
//! let position = rng.random_in_box(&Aabb::cube(10.0));
//! ```

use crate::geometry::{euler, Aabb};
use glam::{Quat, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Random source owned by a [`ParticleGroup`](crate::ParticleGroup).
#[derive(Clone, Debug)]
pub struct SpawnRng {
    rng: SmallRng,
}

impl SpawnRng {
    /// Deterministic generator for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the clock, different each program execution.
    pub fn from_time() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_time(),
        }
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random unit vector, uniformly distributed on the unit sphere.
    pub fn random_direction(&mut self) -> Vec3 {
        let z = self.rng.gen_range(-1.0f32..1.0);
        let theta = self.rng.gen_range(0.0..TAU);
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * theta.cos(), r * theta.sin(), z)
            .try_normalize()
            .unwrap_or(Vec3::X)
    }

    /// Rotation from XYZ Euler angles each drawn from a full turn either way.
    pub fn random_orientation(&mut self) -> Quat {
        let mut angle = || self.rng.gen_range(-2.0 * PI..2.0 * PI);
        euler(Vec3::new(angle(), angle(), angle()))
    }

    /// Uniform point inside `bounds`.
    pub fn random_in_box(&mut self, bounds: &Aabb) -> Vec3 {
        Vec3::new(
            self.random_range(bounds.min.x, bounds.max.x),
            self.random_range(bounds.min.y, bounds.max.y),
            self.random_range(bounds.min.z, bounds.max.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_direction_is_unit() {
        let mut rng = SpawnRng::seeded(1);
        for _ in 0..500 {
            assert!((rng.random_direction().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_random_in_box_bounds() {
        let mut rng = SpawnRng::seeded(2);
        let bounds = Aabb::new(Vec3::new(-1.0, 10.0, 0.0), Vec3::new(1.0, 20.0, 0.5));
        for _ in 0..500 {
            assert!(bounds.contains_point(rng.random_in_box(&bounds)));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SpawnRng::seeded(99);
        let mut b = SpawnRng::seeded(99);
        for _ in 0..10 {
            assert_eq!(a.random_direction(), b.random_direction());
            assert_eq!(a.random_orientation(), b.random_orientation());
        }
    }

    #[test]
    fn test_random_orientation_is_normalized() {
        let mut rng = SpawnRng::seeded(3);
        for _ in 0..100 {
            assert!(rng.random_orientation().is_normalized());
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut rng = SpawnRng::seeded(4);
        assert_eq!(rng.random_range(3.0, 3.0), 3.0);
    }
}
