//! Layered-noise terrain synthesis
//!
//! Evaluates elevation and biome color for any direction on the sphere by
//! combining five frequency bands of the shared noise field. The evaluation
//! is a pure function of (direction, config, seed): the reference cache and
//! the LOD resampler both depend on it being bit-for-bit reproducible.

use std::sync::Arc;

use crate::core::types::{DVec3, Rgb};
use crate::math::Direction;
use crate::terrain::biome::Biome;
use crate::terrain::config::PlanetConfig;
use crate::terrain::noise_field::NoiseField;

/// Frequency of the continent band. Fixed: continents should not shrink when
/// the user cranks the noise-scale slider, only the features on top of them.
const CONTINENT_FREQUENCY: f64 = 0.4;

/// Band weights; they sum to 1.0 so the combined noise keeps the `[-1, 1]`
/// envelope (before mountain sharpening) across configurations.
const CONTINENT_WEIGHT: f64 = 0.35;
const MEDIUM_WEIGHT: f64 = 0.2;
const MOUNTAIN_WEIGHT: f64 = 0.3;
const DETAIL_WEIGHT: f64 = 0.15;

/// Damping applied to the combined height variation
const HEIGHT_DAMPING: f32 = 0.25;

/// Frequency and amplitude of the per-channel color perturbation
const COLOR_NOISE_FREQUENCY: f64 = 20.0;
const COLOR_NOISE_AMPLITUDE: f64 = 0.05;

/// Result of evaluating terrain at a direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSample {
    /// Signed offset from the base radius, in world units
    pub elevation: f32,
    /// Vertex color after biome selection and perturbation
    pub color: Rgb,
    /// The biome the color was drawn from
    pub biome: Biome,
}

/// Converts sphere directions into displaced elevations and biome colors
pub struct TerrainSynthesizer {
    noise: Arc<NoiseField>,
}

impl TerrainSynthesizer {
    /// Create a synthesizer over a shared noise field
    pub fn new(noise: Arc<NoiseField>) -> Self {
        Self { noise }
    }

    /// The shared noise field
    pub fn noise(&self) -> &Arc<NoiseField> {
        &self.noise
    }

    /// Evaluate terrain at a direction
    pub fn evaluate(&self, direction: Direction, config: &PlanetConfig) -> TerrainSample {
        self.evaluate_scaled(direction, config, 1.0)
    }

    /// Evaluate with all four configurable frequency bands multiplied by
    /// `amplitude`. Used by the direct-synthesis LOD fallback so lower
    /// detail reads as intentionally smoother terrain, not just fewer
    /// polygons.
    pub fn evaluate_scaled(
        &self,
        direction: Direction,
        config: &PlanetConfig,
        amplitude: f32,
    ) -> TerrainSample {
        let v = direction.as_vec3();
        let d = DVec3::new(v.x as f64, v.y as f64, v.z as f64);
        let scale = amplitude as f64;

        let continent = self.sample(d, CONTINENT_FREQUENCY);
        let medium = self.sample(d, config.base_noise_scale as f64 * 2.0 * scale);
        let mountain = self.sample(d, config.mountain_noise_scale as f64 * 2.0 * scale);
        let detail = self.sample(d, config.detail_noise_scale as f64 * 2.0 * scale);
        let biome_noise = self.sample(d, config.biome_noise_scale as f64 * scale) * 0.4;

        // Sharpen the mountain band: flatter valleys, steeper peaks
        let ridges = mountain.abs().powf(0.8) * config.mountain_scale as f64 * mountain.signum();

        let combined = continent * CONTINENT_WEIGHT
            + medium * MEDIUM_WEIGHT
            + ridges * MOUNTAIN_WEIGHT
            + detail * DETAIL_WEIGHT;

        let temperature =
            ((1.0 - direction.latitude() as f64).powf(1.2) + biome_noise * 0.4) as f32;

        let height_variation = combined as f32 * config.height_scale;
        let elevation = config.radius * height_variation * HEIGHT_DAMPING;

        let biome = Biome::classify(elevation, config.water_level, temperature);
        let base = biome.surface_color(elevation, config.water_level);

        let variation =
            (self.sample(d, COLOR_NOISE_FREQUENCY) * COLOR_NOISE_AMPLITUDE) as f32;
        let color = [
            (base[0] + variation).clamp(0.0, 1.0),
            (base[1] + variation).clamp(0.0, 1.0),
            (base[2] + variation).clamp(0.0, 1.0),
        ];

        TerrainSample { elevation, color, biome }
    }

    fn sample(&self, d: DVec3, frequency: f64) -> f64 {
        let p = d * frequency;
        self.noise.sample3(p.x, p.y, p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::terrain::noise_field::TERRAIN_SEED;

    fn synthesizer() -> TerrainSynthesizer {
        TerrainSynthesizer::new(Arc::new(NoiseField::new(TERRAIN_SEED)))
    }

    fn probe_directions(count: usize) -> Vec<Direction> {
        // Deterministic spiral over the sphere
        (0..count)
            .map(|i| {
                let t = i as f32 / count as f32;
                let y = 1.0 - 2.0 * t;
                let r = (1.0 - y * y).max(0.0).sqrt();
                let a = i as f32 * 2.399_963; // golden angle
                Direction::from_position(Vec3::new(r * a.cos(), y, r * a.sin()))
            })
            .collect()
    }

    #[test]
    fn test_deterministic() {
        let synth = synthesizer();
        let config = PlanetConfig::default();
        let dir = Direction::from_position(Vec3::new(0.3, 0.8, -0.5));

        let a = synth.evaluate(dir, &config);
        let b = synth.evaluate(dir, &config);
        assert_eq!(a.elevation, b.elevation);
        assert_eq!(a.color, b.color);
        assert_eq!(a.biome, b.biome);

        // A fresh synthesizer over the same seed agrees bit for bit
        let c = synthesizer().evaluate(dir, &config);
        assert_eq!(a.elevation, c.elevation);
        assert_eq!(a.color, c.color);
    }

    #[test]
    fn test_color_channels_in_unit_range() {
        let synth = synthesizer();
        let config = PlanetConfig::default();

        for dir in probe_directions(10_000) {
            let sample = synth.evaluate(dir, &config);
            for (i, c) in sample.color.iter().enumerate() {
                assert!(
                    (0.0..=1.0).contains(c),
                    "channel {i} = {c} out of range at {:?}",
                    dir.as_vec3()
                );
            }
        }
    }

    #[test]
    fn test_elevation_bounded_by_height_scale() {
        let synth = synthesizer();
        let config = PlanetConfig::default();

        // |combined| can exceed 1 only through mountain sharpening, which is
        // bounded by mountain_scale; this envelope holds for any seed.
        let envelope = config.radius
            * config.height_scale
            * 0.25
            * (0.7 + 0.3 * config.mountain_scale);

        for dir in probe_directions(2_000) {
            let sample = synth.evaluate(dir, &config);
            assert!(
                sample.elevation.abs() <= envelope,
                "elevation {} beyond envelope {envelope}",
                sample.elevation
            );
        }
    }

    #[test]
    fn test_biome_consistent_with_waterline() {
        let synth = synthesizer();
        let config = PlanetConfig::default();

        for dir in probe_directions(2_000) {
            let sample = synth.evaluate(dir, &config);
            assert_eq!(
                sample.biome.is_water(),
                sample.elevation < config.water_level,
                "biome {:?} disagrees with elevation {} vs waterline {}",
                sample.biome,
                sample.elevation,
                config.water_level
            );
        }
    }

    #[test]
    fn test_polar_biomes_never_warm() {
        // At latitude >= 0.8 the temperature proxy is at most
        // (1 - 0.8)^1.2 + 0.16 < 0.4, below every warm branch threshold:
        // polar samples must come from the water, beach, or cold palettes.
        let synth = synthesizer();
        let config = PlanetConfig::default();

        let mut polar = 0;
        for dir in probe_directions(8_000) {
            if dir.latitude() < 0.8 {
                continue;
            }
            polar += 1;
            let sample = synth.evaluate(dir, &config);
            assert!(
                sample.biome.is_water() || sample.biome == Biome::Beach || sample.biome.is_cold(),
                "warm biome {:?} at latitude {}",
                sample.biome,
                dir.latitude()
            );
            if sample.elevation >= config.water_level + 0.1 {
                assert!(sample.biome.is_cold());
            }
        }
        assert!(polar > 100, "expected a dense polar sample, got {polar}");
    }

    #[test]
    fn test_scaled_amplitude_changes_detail_bands_only() {
        let synth = synthesizer();
        let config = PlanetConfig::default();
        let dir = Direction::from_position(Vec3::new(0.6, 0.2, 0.77));

        let full = synth.evaluate_scaled(dir, &config, 1.0);
        let damped = synth.evaluate_scaled(dir, &config, 0.25);
        assert_ne!(full.elevation, damped.elevation);

        // Scaling by 1.0 is the plain evaluation
        let plain = synth.evaluate(dir, &config);
        assert_eq!(full.elevation, plain.elevation);
    }
}
