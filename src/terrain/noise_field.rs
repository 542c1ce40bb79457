//! Seeded 3D coherent noise
//!
//! One [`NoiseField`] instance is shared by terrain and cloud synthesis so
//! the two systems stay visually correlated: they read different frequency
//! bands of the same field instead of two unrelated random fields.

use noise::{NoiseFn, Simplex};

use crate::core::types::DVec3;
use crate::math::Direction;

/// Fixed terrain seed. One seed per process keeps every regeneration of the
/// same planet consistent; it is deliberately not part of the public
/// configuration surface.
pub const TERRAIN_SEED: u32 = 12345;

/// Deterministic 3D simplex noise field
pub struct NoiseField {
    seed: u32,
    simplex: Simplex,
}

impl NoiseField {
    /// Create a noise field with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            simplex: Simplex::new(seed),
        }
    }

    /// The seed this field was built with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample the field at a 3D point. Returns a value in `[-1, 1]`,
    /// deterministic for a given seed and total over finite inputs.
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.simplex.get([x, y, z]).clamp(-1.0, 1.0)
    }

    /// Sample along a unit direction scaled by `frequency`
    pub fn sample_direction(&self, direction: Direction, frequency: f64) -> f64 {
        let d = DVec3::new(
            direction.as_vec3().x as f64,
            direction.as_vec3().y as f64,
            direction.as_vec3().z as f64,
        ) * frequency;
        self.sample3(d.x, d.y, d.z)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(TERRAIN_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;

    #[test]
    fn test_deterministic() {
        let field = NoiseField::new(TERRAIN_SEED);
        let a = field.sample3(0.3, -0.7, 0.2);
        let b = field.sample3(0.3, -0.7, 0.2);
        assert_eq!(a, b);

        let other = NoiseField::new(TERRAIN_SEED);
        assert_eq!(a, other.sample3(0.3, -0.7, 0.2));
    }

    #[test]
    fn test_seeds_diverge() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        assert_ne!(a.sample3(0.5, 0.5, 0.5), b.sample3(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_range() {
        let field = NoiseField::default();
        for i in 0..500 {
            let t = i as f64 * 0.137;
            let v = field.sample3(t.sin() * 3.0, t.cos() * 3.0, t * 0.1);
            assert!((-1.0..=1.0).contains(&v), "sample {v} out of range");
        }
    }

    #[test]
    fn test_continuity() {
        let field = NoiseField::default();
        let base = field.sample3(0.4, 0.4, 0.4);
        let nearby = field.sample3(0.4001, 0.4, 0.4);
        assert!((base - nearby).abs() < 0.01);
    }

    #[test]
    fn test_sample_direction_matches_scaled_point() {
        let field = NoiseField::default();
        let dir = Direction::from_position(Vec3::new(1.0, 2.0, -0.5));
        let v = dir.as_vec3();

        let by_direction = field.sample_direction(dir, 0.8);
        let by_point = field.sample3(
            v.x as f64 * 0.8,
            v.y as f64 * 0.8,
            v.z as f64 * 0.8,
        );
        assert_eq!(by_direction, by_point);
    }
}
