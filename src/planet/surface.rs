//! The terrain surface entity

use std::sync::Arc;

use crate::core::types::Result;
use crate::lod::{exceeds_tolerance, resolution_for, TERRAIN_MAX_RESOLUTION, TERRAIN_MIN_RESOLUTION};
use crate::mesh::resampler;
use crate::scene::{MeshHandle, SceneHost};
use crate::terrain::{NoiseField, PlanetConfig, ReferenceTerrainCache, TerrainSynthesizer};

/// The planet's terrain surface.
///
/// Owns the terrain configuration, the synthesizer, the reference capture,
/// and the currently attached mesh. LOD changes resample the capture; only a
/// full parameter regeneration rebuilds it.
pub struct Planet {
    config: PlanetConfig,
    synthesizer: TerrainSynthesizer,
    reference: Option<ReferenceTerrainCache>,
    mesh: Option<MeshHandle>,
    current_detail_factor: f32,
    last_resolution: u32,
}

impl Planet {
    /// Build the planet at full detail and capture the reference terrain.
    ///
    /// The visible mesh goes up first so a host that renders during startup
    /// shows terrain while the (heavier) reference capture finishes.
    pub fn new(
        host: &mut dyn SceneHost,
        noise: Arc<NoiseField>,
        config: PlanetConfig,
    ) -> Result<Self> {
        config.validate()?;
        let synthesizer = TerrainSynthesizer::new(noise);

        let mut planet = Self {
            last_resolution: config.detail,
            config,
            synthesizer,
            reference: None,
            mesh: None,
            current_detail_factor: 1.0,
        };
        planet.rebuild_visible(host)?;

        log::info!("capturing reference terrain for consistent LOD");
        planet.reference = Some(ReferenceTerrainCache::build(
            &planet.synthesizer,
            &planet.config,
        ));
        Ok(planet)
    }

    /// Re-tessellate the surface for a new detail factor.
    ///
    /// Resolves the factor to a power-of-two resolution and skips the
    /// rebuild entirely when it lands within the hysteresis tolerance of the
    /// mesh already on screen. With a reference capture available the new
    /// mesh is a resample of it; otherwise terrain is synthesized directly
    /// with the noise amplitude damped at low detail.
    pub fn regenerate_with_detail(
        &mut self,
        host: &mut dyn SceneHost,
        detail_factor: f32,
    ) -> Result<()> {
        self.current_detail_factor = detail_factor;

        let resolution =
            resolution_for(detail_factor, TERRAIN_MIN_RESOLUTION, TERRAIN_MAX_RESOLUTION);
        if !exceeds_tolerance(self.last_resolution, resolution) {
            log::debug!("keeping terrain resolution {}x{0}", self.last_resolution);
            return Ok(());
        }
        self.last_resolution = resolution;
        log::info!("terrain resolution -> {resolution}x{resolution}");

        let mesh = match &self.reference {
            Some(cache) => resampler::resample(resolution, cache, &self.config),
            None => {
                resampler::synthesize(&self.synthesizer, resolution, &self.config, detail_factor)
            }
        };
        self.replace_mesh(host, mesh)
    }

    /// Full parameter regeneration: swap the configuration, rebuild the
    /// visible mesh, and re-capture the reference terrain.
    pub fn regenerate(&mut self, host: &mut dyn SceneHost, config: PlanetConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.reference = None;
        self.last_resolution = self.config.detail;

        self.rebuild_visible(host)?;
        self.reference = Some(ReferenceTerrainCache::build(&self.synthesizer, &self.config));
        Ok(())
    }

    /// Current terrain configuration
    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    /// Handle of the attached terrain mesh
    pub fn mesh_handle(&self) -> Option<MeshHandle> {
        self.mesh
    }

    /// Resolution of the mesh currently on screen
    pub fn last_resolution(&self) -> u32 {
        self.last_resolution
    }

    /// Detail factor of the last regeneration request
    pub fn current_detail_factor(&self) -> f32 {
        self.current_detail_factor
    }

    /// Whether the reference capture exists
    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Detach the surface from the scene
    pub fn dispose(&mut self, host: &mut dyn SceneHost) {
        if let Some(handle) = self.mesh.take() {
            host.remove_mesh(handle);
        }
    }

    fn rebuild_visible(&mut self, host: &mut dyn SceneHost) -> Result<()> {
        let mesh = resampler::synthesize(&self.synthesizer, self.config.detail, &self.config, 1.0);
        self.replace_mesh(host, mesh)
    }

    /// Dispose the previous mesh before installing the new one. Runs on
    /// every regeneration exit path so handles never leak in the host.
    fn replace_mesh(&mut self, host: &mut dyn SceneHost, mesh: crate::mesh::Mesh) -> Result<()> {
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

    fn small_config() -> PlanetConfig {
        PlanetConfig {
            detail: 16,
            ..Default::default()
        }
    }

    fn new_planet(host: &mut RecordingHost) -> Planet {
        Planet::new(host, Arc::new(NoiseField::new(TERRAIN_SEED)), small_config()).unwrap()
    }

    #[test]
    fn test_new_attaches_mesh_and_captures_reference() {
        let mut host = RecordingHost::new();
        let planet = new_planet(&mut host);

        assert!(planet.has_reference());
        let handle = planet.mesh_handle().unwrap();
        let mesh = host.mesh(handle).unwrap();
        assert_eq!(mesh.resolution, 16);
        assert_eq!(host.live_count(), 1);
    }

    #[test]
    fn test_lod_change_replaces_and_disposes() {
        let mut host = RecordingHost::new();
        let mut planet = new_planet(&mut host);
        let first = planet.mesh_handle().unwrap();

        planet.regenerate_with_detail(&mut host, 0.0).unwrap();
        let second = planet.mesh_handle().unwrap();

        assert_ne!(first, second);
        assert_eq!(planet.last_resolution(), 64);
        assert_eq!(host.live_count(), 1, "old mesh must be disposed");
        assert_eq!(host.removed, 1);
    }

    #[test]
    fn test_within_tolerance_keeps_mesh() {
        let mut host = RecordingHost::new();
        let mut planet = new_planet(&mut host);

        planet.regenerate_with_detail(&mut host, 0.0).unwrap();
        let handle = planet.mesh_handle().unwrap();

        // Same resolution resolves again: no rebuild
        planet.regenerate_with_detail(&mut host, 0.01).unwrap();
        assert_eq!(planet.mesh_handle().unwrap(), handle);
        assert_eq!(host.added, 2);
    }

    #[test]
    fn test_regenerate_rejects_invalid_config() {
        let mut host = RecordingHost::new();
        let mut planet = new_planet(&mut host);
        let handle = planet.mesh_handle().unwrap();

        let bad = PlanetConfig { radius: -1.0, ..small_config() };
        assert!(planet.regenerate(&mut host, bad).is_err());

        // The previous mesh survives a rejected regeneration
        assert_eq!(planet.mesh_handle().unwrap(), handle);
        assert_eq!(host.live_count(), 1);
    }

    #[test]
    fn test_dispose_detaches() {
        let mut host = RecordingHost::new();
        let mut planet = new_planet(&mut host);

        planet.dispose(&mut host);
        assert!(planet.mesh_handle().is_none());
        assert_eq!(host.live_count(), 0);
    }
}
