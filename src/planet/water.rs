//! The water shell entity

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Result, Rgb, Vec3};
use crate::lod::{
    exceeds_tolerance, resolution_for, OVERLAY_MAX_RESOLUTION, OVERLAY_MIN_RESOLUTION,
};
use crate::math::SphereTessellation;
use crate::mesh::Mesh;
use crate::scene::{MeshHandle, SceneHost};
use crate::terrain::biome;

/// Detail-factor deadband below which the shell is not re-tessellated
const DETAIL_DEADBAND: f32 = 0.1;

/// Water surface configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaterConfig {
    /// Sea level as an offset from the planet radius
    pub water_level: f32,
    /// Surface color
    pub color: Rgb,
    /// Color of deep water, for the host's depth shading
    pub deep_color: Rgb,
    /// Surface opacity
    pub opacity: f32,
    /// Shell tessellation resolution
    pub resolution: u32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            water_level: 0.1,
            color: biome::SHALLOW_WATER_LIGHT,
            deep_color: biome::DEEP_OCEAN,
            opacity: 0.7,
            resolution: 256,
        }
    }
}

impl WaterConfig {
    fn validate(&self) -> Result<()> {
        if !self.water_level.is_finite() {
            return Err(Error::Config("water_level must be finite".into()));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(Error::Config(format!(
                "water opacity must be in [0, 1], got {}",
                self.opacity
            )));
        }
        if self.resolution < 2 {
            return Err(Error::Config("water resolution must be at least 2".into()));
        }
        Ok(())
    }
}

/// The translucent water shell.
///
/// A plain sphere sitting just below the waterline; waves live in the host's
/// shader, driven by the time value advanced here.
pub struct Water {
    config: WaterConfig,
    planet_radius: f32,
    mesh: Option<MeshHandle>,
    current_detail_factor: f32,
    time: f32,
    sun_direction: Vec3,
}

impl Water {
    /// Build the water shell and attach it to the scene
    pub fn new(host: &mut dyn SceneHost, planet_radius: f32, config: WaterConfig) -> Result<Self> {
        config.validate()?;
        let mut water = Self {
            config,
            planet_radius,
            mesh: None,
            current_detail_factor: 1.0,
            time: 0.0,
            sun_direction: Vec3::new(1.0, 0.5, 1.0).normalize(),
        };
        water.rebuild(host)?;
        Ok(water)
    }

    /// Advance the wave clock
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
    }

    /// Wave time for the host's water shader
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Re-tessellate the shell for a new detail factor. Ignores factor
    /// changes inside the deadband and resolution changes inside the
    /// hysteresis tolerance.
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
        log::debug!("water resolution -> {resolution}x{resolution}");
        self.rebuild(host)
    }

    /// Move the waterline and rebuild the shell
    pub fn set_water_level(&mut self, host: &mut dyn SceneHost, water_level: f32) -> Result<()> {
        if !water_level.is_finite() {
            return Err(Error::Config("water_level must be finite".into()));
        }
        self.config.water_level = water_level;
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

    /// Sun direction the host shades the water with
    pub fn sun_direction(&self) -> Vec3 {
        self.sun_direction
    }

    /// Current configuration
    pub fn config(&self) -> &WaterConfig {
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
        // Slightly below the waterline so beaches peek through
        let radius = self.planet_radius + self.config.water_level - 0.05;
        let tess = SphereTessellation::new(radius, self.config.resolution);

        let count = tess.vertex_count();
        let normals = tess.directions.iter().map(|d| d.as_vec3()).collect();
        let mesh = Mesh {
            resolution: tess.resolution,
            positions: tess.positions,
            normals,
            colors: vec![self.config.color; count],
            opacity: Some(vec![self.config.opacity; count]),
            indices: tess.indices,
        };

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

    fn small_water(host: &mut RecordingHost) -> Water {
        let config = WaterConfig { resolution: 8, ..Default::default() };
        Water::new(host, 5.0, config).unwrap()
    }

    #[test]
    fn test_shell_sits_below_waterline() {
        let mut host = RecordingHost::new();
        let water = small_water(&mut host);

        let mesh = host.mesh(water.mesh_handle().unwrap()).unwrap();
        let expected = 5.0 + 0.1 - 0.05;
        for p in &mesh.positions {
            assert!((p.length() - expected).abs() < 1e-4);
        }
        assert_eq!(mesh.opacity.as_ref().unwrap()[0], 0.7);
    }

    #[test]
    fn test_deadband_skips_small_changes() {
        let mut host = RecordingHost::new();
        let mut water = small_water(&mut host);
        let handle = water.mesh_handle().unwrap();

        water.update_resolution(&mut host, 0.95).unwrap();
        assert_eq!(water.mesh_handle().unwrap(), handle);
        assert_eq!(host.added, 1);
    }

    #[test]
    fn test_resolution_change_rebuilds_and_disposes() {
        let mut host = RecordingHost::new();
        let mut water = small_water(&mut host);
        let first = water.mesh_handle().unwrap();

        water.update_resolution(&mut host, 0.0).unwrap();
        let second = water.mesh_handle().unwrap();

        assert_ne!(first, second);
        assert_eq!(water.config().resolution, OVERLAY_MIN_RESOLUTION);
        assert_eq!(host.live_count(), 1);
        assert_eq!(host.removed, 1);
    }

    #[test]
    fn test_set_water_level_moves_shell() {
        let mut host = RecordingHost::new();
        let mut water = small_water(&mut host);

        water.set_water_level(&mut host, 0.3).unwrap();
        let mesh = host.mesh(water.mesh_handle().unwrap()).unwrap();
        let expected = 5.0 + 0.3 - 0.05;
        assert!((mesh.positions[0].length() - expected).abs() < 1e-4);

        assert!(water.set_water_level(&mut host, f32::NAN).is_err());
    }

    #[test]
    fn test_day_night_flips_sun() {
        let mut host = RecordingHost::new();
        let mut water = small_water(&mut host);

        let day = water.sun_direction();
        water.set_day_night(false);
        assert!((water.sun_direction() + day).length() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_opacity() {
        let mut host = RecordingHost::new();
        let config = WaterConfig { opacity: 1.5, ..Default::default() };
        assert!(Water::new(&mut host, 5.0, config).is_err());
    }
}
