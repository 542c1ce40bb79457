//! Planet terrain configuration

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Parameters controlling planet terrain generation.
///
/// Immutable per generation pass: LOD changes reuse the same config, and a
/// user-driven regenerate replaces it wholesale.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanetConfig {
    /// Base sphere radius in world units
    pub radius: f32,
    /// Tessellation segments of the visible mesh at full detail
    pub detail: u32,
    /// Vertical terrain exaggeration
    pub height_scale: f32,
    /// Frequency of the medium terrain band
    pub base_noise_scale: f32,
    /// Frequency of the mountain band
    pub mountain_noise_scale: f32,
    /// Frequency of the fine-detail band
    pub detail_noise_scale: f32,
    /// Frequency of the biome variation band
    pub biome_noise_scale: f32,
    /// Sea level as an offset from the base radius
    pub water_level: f32,
    /// Mountain sharpening strength
    pub mountain_scale: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            detail: 256,
            height_scale: 2.5,
            base_noise_scale: 0.4,
            mountain_noise_scale: 0.8,
            detail_noise_scale: 3.0,
            biome_noise_scale: 0.6,
            water_level: 0.1,
            mountain_scale: 2.0,
        }
    }
}

impl PlanetConfig {
    /// Validate the configuration. Called at construction of every component
    /// that holds one, so malformed values fail loudly instead of producing
    /// NaN geometry three calls later.
    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::Config(format!("radius must be positive, got {}", self.radius)));
        }
        if self.detail < 2 || self.detail > 1024 {
            return Err(Error::Config(format!(
                "detail must be in [2, 1024], got {}",
                self.detail
            )));
        }
        if !(self.height_scale.is_finite() && self.height_scale >= 0.0) {
            return Err(Error::Config(format!(
                "height_scale must be non-negative, got {}",
                self.height_scale
            )));
        }
        for (name, scale) in [
            ("base_noise_scale", self.base_noise_scale),
            ("mountain_noise_scale", self.mountain_noise_scale),
            ("detail_noise_scale", self.detail_noise_scale),
            ("biome_noise_scale", self.biome_noise_scale),
        ] {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(Error::Config(format!("{name} must be positive, got {scale}")));
            }
        }
        if !self.water_level.is_finite() || self.water_level.abs() > self.radius {
            return Err(Error::Config(format!(
                "water_level must stay within the planet radius, got {}",
                self.water_level
            )));
        }
        if !(self.mountain_scale.is_finite() && self.mountain_scale >= 0.0) {
            return Err(Error::Config(format!(
                "mountain_scale must be non-negative, got {}",
                self.mountain_scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PlanetConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_radius() {
        let config = PlanetConfig { radius: 0.0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = PlanetConfig { radius: f32::NAN, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_scales() {
        let config = PlanetConfig { detail_noise_scale: -1.0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = PlanetConfig { height_scale: f32::INFINITY, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_water_beyond_radius() {
        let config = PlanetConfig { water_level: 10.0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_roundtrips_through_json() {
        let config = PlanetConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PlanetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.radius, config.radius);
        assert_eq!(back.water_level, config.water_level);
    }
}
