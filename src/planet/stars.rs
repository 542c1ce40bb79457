//! The starfield background entity

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::mesh::PointCloud;
use crate::scene::{MeshHandle, SceneHost};

/// Starfield configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StarConfig {
    /// Number of stars
    pub count: u32,
    /// Inner radius of the star shell
    pub radius: f32,
    /// Random extra distance added per star
    pub radius_variance: f32,
    /// Point sprite size
    pub size: f32,
    /// RNG seed; fixed so a reloaded scene shows the same sky
    pub seed: u64,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            radius: 80.0,
            radius_variance: 50.0,
            size: 0.15,
            seed: 12345,
        }
    }
}

impl StarConfig {
    fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::Config(format!("star radius must be positive, got {}", self.radius)));
        }
        if !(self.radius_variance.is_finite() && self.radius_variance >= 0.0) {
            return Err(Error::Config("star radius_variance must be non-negative".into()));
        }
        Ok(())
    }
}

/// One-shot starfield: a random point cloud well outside the planet,
/// generated once and never regenerated by LOD changes.
pub struct Stars {
    config: StarConfig,
    points: Option<MeshHandle>,
}

impl Stars {
    /// Generate the starfield and attach it to the scene
    pub fn new(host: &mut dyn SceneHost, config: StarConfig) -> Result<Self> {
        config.validate()?;
        let cloud = Self::generate(&config);
        let points = host.add_points(cloud)?;
        Ok(Self {
            config,
            points: Some(points),
        })
    }

    fn generate(config: &StarConfig) -> PointCloud {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut positions = Vec::with_capacity(config.count as usize);
        let mut colors = Vec::with_capacity(config.count as usize);

        for _ in 0..config.count {
            // Uniform direction over the sphere
            let azimuth = rng.random::<f32>() * TAU;
            let polar = (rng.random::<f32>() * 2.0 - 1.0).clamp(-1.0, 1.0).acos();
            let radius = config.radius + rng.random::<f32>() * config.radius_variance;

            positions.push(Vec3::new(
                radius * polar.sin() * azimuth.cos(),
                radius * polar.sin() * azimuth.sin(),
                radius * polar.cos(),
            ));

            // Mostly white, with a sprinkle of blue-ish and yellow-ish stars
            let choice = rng.random::<f32>();
            colors.push(if choice > 0.9 {
                [0.9, 0.9, 1.0]
            } else if choice > 0.8 {
                [1.0, 0.9, 0.8]
            } else {
                [1.0, 1.0, 1.0]
            });
        }

        PointCloud {
            positions,
            colors,
            point_size: config.size,
        }
    }

    /// Configuration the field was generated with
    pub fn config(&self) -> &StarConfig {
        &self.config
    }

    /// Handle of the attached point cloud
    pub fn handle(&self) -> Option<MeshHandle> {
        self.points
    }

    /// Detach the starfield from the scene
    pub fn dispose(&mut self, host: &mut dyn SceneHost) {
        if let Some(handle) = self.points.take() {
            host.remove_mesh(handle);
        }
    }
}
