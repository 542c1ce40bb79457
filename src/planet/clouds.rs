//! The cloud layer entity

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Result, Rgb, Vec3};
use crate::lod::{
    exceeds_tolerance, resolution_for, OVERLAY_MAX_RESOLUTION, OVERLAY_MIN_RESOLUTION,
};
use crate::math::SphereTessellation;
use crate::mesh::Mesh;
use crate::scene::{MeshHandle, SceneHost};
use crate::terrain::NoiseField;

const DETAIL_DEADBAND: f32 = 0.1;

/// Cloud layer configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Height of the cloud shell above the planet surface
    pub cloud_height: f32,
    /// Cloud color
    pub color: Rgb,
    /// Base noise frequency
    pub scale: f32,
    /// Noise value below which a vertex is clear sky
    pub threshold: f32,
    /// Shell rotation in radians per second
    pub rotation_speed: f32,
    /// Shell tessellation resolution
    pub resolution: u32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            cloud_height: 0.6,
            color: [1.0, 1.0, 1.0],
            scale: 1.0,
            threshold: 0.1,
            rotation_speed: 0.02,
            resolution: 256,
        }
    }
}

impl CloudConfig {
    fn validate(&self) -> Result<()> {
        if !(self.cloud_height.is_finite() && self.cloud_height > 0.0) {
            return Err(Error::Config(format!(
                "cloud_height must be positive, got {}",
                self.cloud_height
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::Config(format!("cloud scale must be positive, got {}", self.scale)));
        }
        if self.resolution < 2 {
            return Err(Error::Config("cloud resolution must be at least 2".into()));
        }
        Ok(())
    }
}

/// The cloud shell: a sphere whose vertices carry noise-driven opacity.
///
/// Reads the same noise field as the terrain (different frequency band) so
/// cloud banks loosely track the landmass scale instead of looking like an
/// unrelated texture.
pub struct Clouds {
    config: CloudConfig,
    planet_radius: f32,
    noise: Arc<NoiseField>,
    mesh: Option<MeshHandle>,
    current_detail_factor: f32,
    time: f32,
    rotation: f32,
    sun_direction: Vec3,
}

impl Clouds {
    /// Build the cloud shell and attach it to the scene
    pub fn new(
        host: &mut dyn SceneHost,
        planet_radius: f32,
        noise: Arc<NoiseField>,
        config: CloudConfig,
    ) -> Result<Self> {
        config.validate()?;
        let mut clouds = Self {
            config,
            planet_radius,
            noise,
            mesh: None,
            current_detail_factor: 1.0,
            time: 0.0,
            rotation: 0.0,
            sun_direction: Vec3::new(1.0, 0.5, 1.0).normalize(),
        };
        clouds.rebuild(host)?;
        Ok(clouds)
    }

    /// Advance the cloud clock and drift rotation
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.rotation += dt * self.config.rotation_speed;
    }

    /// Accumulated shell rotation around Y, applied by the host
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Reset the drift rotation
    pub fn reset_rotation(&mut self) {
        self.rotation = 0.0;
    }

    /// Shader clock for the host
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Re-tessellate the shell for a new detail factor
    pub fn update_resolution(&mut self, host: &mut dyn SceneHost, detail_factor: f32) -> Result<()> {
        if (detail_factor - self.current_detail_factor).abs() < DETAIL_DEADBAND {
            return Ok(());
        }
        self.current_detail_factor = detail_factor;

        let resolution =
            resolution_for(detail_factor, OVERLAY_MIN_RESOLUTION, OVERLAY_MAX_RESOLUTION);
        if !exceeds_tolerance(self.config.resolution, resolution) {
            return Ok(());
        }
        self.config.resolution = resolution;
        log::debug!("cloud resolution -> {resolution}x{resolution}");
        self.rebuild(host)
    }

    /// Rebuild with a new configuration
    pub fn regenerate(&mut self, host: &mut dyn SceneHost, config: CloudConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.rebuild(host)
    }

    /// Flip the sun direction for day or night
    pub fn set_day_night(&mut self, daytime: bool) {
        let direction = if daytime {
            Vec3::new(1.0, 0.5, 1.0)
        } else {
            Vec3::new(-1.0, -0.5, -1.0)
        };
        self.sun_direction = direction.normalize();
    }

    /// Sun direction the host shades the clouds with
    pub fn sun_direction(&self) -> Vec3 {
        self.sun_direction
    }

    /// Current configuration
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Handle of the attached shell mesh
    pub fn mesh_handle(&self) -> Option<MeshHandle> {
        self.mesh
    }

    /// Detach the shell from the scene
    pub fn dispose(&mut self, host: &mut dyn SceneHost) {
        if let Some(handle) = self.mesh.take() {
            host.remove_mesh(handle);
        }
    }

    fn rebuild(&mut self, host: &mut dyn SceneHost) -> Result<()> {
        let radius = self.planet_radius + self.config.cloud_height;
        let tess = SphereTessellation::new(radius, self.config.resolution);
        let scale = self.config.scale as f64;

        let mut positions = Vec::with_capacity(tess.vertex_count());
        let mut opacity = Vec::with_capacity(tess.vertex_count());

        for (position, direction) in tess.positions.iter().zip(&tess.directions) {
            let base = self.noise.sample_direction(*direction, scale);
            let detail = self.noise.sample_direction(*direction, scale * 6.0) * 0.3;
            let pattern = (base + detail) as f32;

            // Thicker banks bulge slightly outward
            positions.push(*position + direction.as_vec3() * pattern * 0.05);

            // Clouds favor the equator and thin toward the poles
            let latitude_influence = 1.0 - direction.latitude().powf(1.5) * 0.8;
            let alpha = if pattern > self.config.threshold {
                ((pattern - self.config.threshold) * 2.5).min(1.0) * latitude_influence
            } else {
                0.0
            };
            opacity.push(alpha);
        }

        let count = tess.vertex_count();
        let mut mesh = Mesh {
            resolution: tess.resolution,
            positions,
            normals: Vec::new(),
            colors: vec![self.config.color; count],
            opacity: Some(opacity),
            indices: tess.indices,
        };
        mesh.compute_normals();

        if let Some(old) = self.mesh.take() {
            host.remove_mesh(old);
        }
        self.mesh = Some(host.add_mesh(mesh)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RecordingHost;
    use crate::terrain::TERRAIN_SEED;

    fn small_clouds(host: &mut RecordingHost) -> Clouds {
        let config = CloudConfig { resolution: 16, ..Default::default() };
        Clouds::new(host, 5.0, Arc::new(NoiseField::new(TERRAIN_SEED)), config).unwrap()
    }

    #[test]
    fn test_opacity_in_range_and_varied() {
        let mut host = RecordingHost::new();
        let clouds = small_clouds(&mut host);

        let mesh = host.mesh(clouds.mesh_handle().unwrap()).unwrap();
        let opacity = mesh.opacity.as_ref().unwrap();
        assert_eq!(opacity.len(), mesh.vertex_count());

        let mut clear = 0;
        let mut covered = 0;
        for &a in opacity {
            assert!((0.0..=1.0).contains(&a));
            if a == 0.0 {
                clear += 1;
            } else {
                covered += 1;
            }
        }
        assert!(clear > 0, "expected some clear sky");
        assert!(covered > 0, "expected some cloud cover");
    }

    #[test]
    fn test_poles_thinner_than_raw_pattern() {
        let mut host = RecordingHost::new();
        let clouds = small_clouds(&mut host);
        let mesh = host.mesh(clouds.mesh_handle().unwrap()).unwrap();

        // Pole vertices get at most 20% of the ramp
        let polar_alpha = mesh.opacity.as_ref().unwrap()[0];
        assert!(polar_alpha <= 0.2 + 1e-5);
    }

    #[test]
    fn test_drift_rotation() {
        let mut host = RecordingHost::new();
        let mut clouds = small_clouds(&mut host);

        clouds.update(2.0);
        assert!((clouds.rotation() - 0.04).abs() < 1e-6);
        assert_eq!(clouds.time(), 2.0);

        clouds.reset_rotation();
        assert_eq!(clouds.rotation(), 0.0);
    }

    #[test]
    fn test_shell_radius() {
        let mut host = RecordingHost::new();
        let clouds = small_clouds(&mut host);
        let mesh = host.mesh(clouds.mesh_handle().unwrap()).unwrap();

        // Displacement is at most pattern * 0.05 around radius + height
        for p in &mesh.positions {
            assert!((p.length() - 5.6).abs() < 0.07);
        }
    }

    #[test]
    fn test_regenerate_swaps_mesh() {
        let mut host = RecordingHost::new();
        let mut clouds = small_clouds(&mut host);
        let first = clouds.mesh_handle().unwrap();

        let config = CloudConfig { threshold: 0.5, resolution: 16, ..Default::default() };
        clouds.regenerate(&mut host, config).unwrap();

        assert_ne!(clouds.mesh_handle().unwrap(), first);
        assert_eq!(host.live_count(), 1);

        let bad = CloudConfig { scale: 0.0, ..Default::default() };
        assert!(clouds.regenerate(&mut host, bad).is_err());
    }
}
