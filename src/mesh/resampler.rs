//! Mesh regeneration at a target resolution
//!
//! Two paths produce a terrain mesh:
//!
//! - [`resample`] reads the reference cache through a strided
//!   nearest-direction scan, so every resolution shows the same surface and
//!   LOD switches do not pop.
//! - [`synthesize`] evaluates the synthesizer directly, used before the
//!   cache exists, with the noise amplitude damped at low detail.

use crate::core::types::Rgb;
use crate::math::SphereTessellation;
use crate::mesh::Mesh;
use crate::terrain::config::PlanetConfig;
use crate::terrain::reference::ReferenceTerrainCache;
use crate::terrain::synthesizer::TerrainSynthesizer;

/// Color assigned when the cache yields no match for a vertex
const FALLBACK_COLOR: Rgb = [0.5, 0.5, 0.5];

/// Noise amplitude multiplier for direct synthesis at a detail factor:
/// low detail also reads as smoother terrain, not just fewer polygons.
pub fn noise_amplitude(detail_factor: f32) -> f32 {
    0.25 + 0.75 * detail_factor.clamp(0.0, 1.0)
}

/// Rebuild a terrain mesh at `target_resolution` from the reference cache.
///
/// For each vertex of a fresh tessellation the nearest cached direction is
/// found among every `cache_res / target_res`-th entry, and its elevation is
/// applied as a radial scale while its color is copied verbatim. A vertex
/// with no match degrades to the base radius and a neutral gray; one bad
/// vertex never invalidates the mesh.
pub fn resample(
    target_resolution: u32,
    cache: &ReferenceTerrainCache,
    config: &PlanetConfig,
) -> Mesh {
    let tess = SphereTessellation::new(config.radius, target_resolution);
    let stride = ((cache.resolution() / target_resolution.max(1)) as usize).max(1);

    let mut positions = Vec::with_capacity(tess.vertex_count());
    let mut colors = Vec::with_capacity(tess.vertex_count());

    for (position, direction) in tess.positions.iter().zip(&tess.directions) {
        match cache.nearest_strided(*direction, stride) {
            Some(index) => {
                let radial_scale = (config.radius + cache.elevation(index)) / config.radius;
                positions.push(*position * radial_scale);
                colors.push(cache.color(index));
            }
            None => {
                positions.push(*position);
                colors.push(FALLBACK_COLOR);
            }
        }
    }

    let mut mesh = Mesh {
        resolution: tess.resolution,
        positions,
        normals: Vec::new(),
        colors,
        opacity: None,
        indices: tess.indices,
    };
    mesh.compute_normals();
    mesh
}

/// Build a terrain mesh at `target_resolution` by direct synthesis, scaling
/// the configurable noise bands by [`noise_amplitude`] of `detail_factor`.
pub fn synthesize(
    synthesizer: &TerrainSynthesizer,
    target_resolution: u32,
    config: &PlanetConfig,
    detail_factor: f32,
) -> Mesh {
    let tess = SphereTessellation::new(config.radius, target_resolution);
    let amplitude = noise_amplitude(detail_factor);

    let mut positions = Vec::with_capacity(tess.vertex_count());
    let mut colors = Vec::with_capacity(tess.vertex_count());

    for direction in &tess.directions {
        let sample = synthesizer.evaluate_scaled(*direction, config, amplitude);
        positions.push(direction.as_vec3() * (config.radius + sample.elevation));
        colors.push(sample.color);
    }

    let mut mesh = Mesh {
        resolution: tess.resolution,
        positions,
        normals: Vec::new(),
        colors,
        opacity: None,
        indices: tess.indices,
    };
    mesh.compute_normals();
    mesh
}
