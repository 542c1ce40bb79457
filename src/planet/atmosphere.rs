//! The atmosphere shell entity

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Result, Rgb, Vec3};
use crate::lod::{
    exceeds_tolerance, resolution_for, OVERLAY_MAX_RESOLUTION, OVERLAY_MIN_RESOLUTION,
};
use crate::math::SphereTessellation;
use crate::mesh::Mesh;
use crate::scene::{MeshHandle, SceneHost};

const DETAIL_DEADBAND: f32 = 0.1;

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

/// Atmosphere configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AtmosphereConfig {
    /// Shell height above the planet surface
    pub shell_height: f32,
    /// Scatter color on the day side
    pub day_color: Rgb,
    /// Scatter color on the night side
    pub night_color: Rgb,
    /// Shell tessellation resolution
    pub resolution: u32,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            shell_height: 1.2,
            day_color: rgb(0x3b, 0x95, 0xd3),
            night_color: rgb(0x0c, 0x14, 0x45),
            resolution: 256,
        }
    }
}

impl AtmosphereConfig {
    fn validate(&self) -> Result<()> {
        if !(self.shell_height.is_finite() && self.shell_height > 0.0) {
            return Err(Error::Config(format!(
                "shell_height must be positive, got {}",
                self.shell_height
            )));
        }
        if self.resolution < 2 {
            return Err(Error::Config("atmosphere resolution must be at least 2".into()));
        }
        Ok(())
    }
}

/// The glowing atmosphere shell. Purely a smooth sphere; the scattering
/// gradient between day and night color is the host's shader, fed by the
/// state kept here.
pub struct Atmosphere {
    config: AtmosphereConfig,
    planet_radius: f32,
    mesh: Option<MeshHandle>,
    current_detail_factor: f32,
    sun_position: Vec3,
    daytime: bool,
}

impl Atmosphere {
    /// Build the shell and attach it to the scene
    pub fn new(
        host: &mut dyn SceneHost,
        planet_radius: f32,
        config: AtmosphereConfig,
    ) -> Result<Self> {
        config.validate()?;
        let mut atmosphere = Self {
            config,
            planet_radius,
            mesh: None,
            current_detail_factor: 1.0,
            sun_position: Vec3::new(50.0, 20.0, 50.0).normalize(),
            daytime: true,
        };
        atmosphere.rebuild(host)?;
        Ok(atmosphere)
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
        log::debug!("atmosphere resolution -> {resolution}x{resolution}");
        self.rebuild(host)
    }

    /// Flip the sun position for day or night
    pub fn set_day_night(&mut self, daytime: bool) {
        self.daytime = daytime;
        let position = if daytime {
            Vec3::new(50.0, 20.0, 50.0)
        } else {
            Vec3::new(-50.0, -20.0, -50.0)
        };
        self.sun_position = position.normalize();
    }

    /// Sun position the host shades the scatter with
    pub fn sun_position(&self) -> Vec3 {
        self.sun_position
    }

    /// Scatter color for the current time of day
    pub fn current_color(&self) -> Rgb {
        if self.daytime {
            self.config.day_color
        } else {
            self.config.night_color
        }
    }

    /// Current configuration
    pub fn config(&self) -> &AtmosphereConfig {
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
        let radius = self.planet_radius + self.config.shell_height;
        let tess = SphereTessellation::new(radius, self.config.resolution);

        let count = tess.vertex_count();
        let normals = tess.directions.iter().map(|d| d.as_vec3()).collect();
        let mesh = Mesh {
            resolution: tess.resolution,
            positions: tess.positions,
            normals,
            colors: vec![self.config.day_color; count],
            opacity: None,
            indices: tess.indices,
        };

        if let Some(old) = self.mesh.take() {
            host.remove_mesh(old);
        }
        self.mesh = Some(host.add_mesh(mesh)?);
        Ok(())
    }
}
