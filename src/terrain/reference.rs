//! Reference terrain capture for LOD-consistent resampling
//!
//! Re-synthesizing terrain at a different tessellation moves every sample
//! point, so elevations visibly swim when the resolution changes. The fix is
//! to evaluate the synthesizer once at maximum resolution and treat that
//! capture as ground truth: every lower-resolution mesh is a resample of
//! this cache, never an independent synthesis.

use rayon::prelude::*;

use crate::core::types::Rgb;
use crate::math::{Direction, SphereTessellation};
use crate::terrain::config::PlanetConfig;
use crate::terrain::synthesizer::TerrainSynthesizer;

/// Tessellation resolution of the reference capture
pub const REFERENCE_RESOLUTION: u32 = 512;

/// Immutable maximum-resolution terrain evaluation.
///
/// Parallel arrays indexed 1:1; built once per [`PlanetConfig`] and shared
/// read-only by every resampling pass. Rebuilt only on a full parameter
/// regeneration, never on LOD changes.
pub struct ReferenceTerrainCache {
    resolution: u32,
    directions: Vec<Direction>,
    elevations: Vec<f32>,
    colors: Vec<Rgb>,
}

impl ReferenceTerrainCache {
    /// Evaluate the synthesizer over the full 512x512 reference grid.
    pub fn build(synthesizer: &TerrainSynthesizer, config: &PlanetConfig) -> Self {
        Self::build_at(synthesizer, config, REFERENCE_RESOLUTION)
    }

    /// Evaluate over a grid of the given resolution. The 512 capture is the
    /// production path; smaller grids serve tests and tooling.
    pub fn build_at(
        synthesizer: &TerrainSynthesizer,
        config: &PlanetConfig,
        resolution: u32,
    ) -> Self {
        let tess = SphereTessellation::new(config.radius, resolution);

        // Every sample is independent and deterministic, so the parallel
        // evaluation is byte-identical to a serial one.
        let samples: Vec<_> = tess
            .directions
            .par_iter()
            .map(|dir| synthesizer.evaluate(*dir, config))
            .collect();

        let mut elevations = Vec::with_capacity(samples.len());
        let mut colors = Vec::with_capacity(samples.len());
        for sample in &samples {
            elevations.push(sample.elevation);
            colors.push(sample.color);
        }

        log::debug!(
            "reference terrain captured: {} vertices at {}x{}",
            tess.vertex_count(),
            tess.resolution,
            tess.resolution
        );

        Self {
            resolution: tess.resolution,
            directions: tess.directions,
            elevations,
            colors,
        }
    }

    /// An empty cache, for exercising the resampler's degradation path
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            resolution: 0,
            directions: Vec::new(),
            elevations: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Grid resolution of the capture
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Number of cached samples
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    /// Whether the cache holds no samples
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Cached direction at `index`
    pub fn direction(&self, index: usize) -> Direction {
        self.directions[index]
    }

    /// Cached elevation offset at `index`
    pub fn elevation(&self, index: usize) -> f32 {
        self.elevations[index]
    }

    /// Cached color at `index`
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index]
    }

    /// Find the cached entry closest to `direction` among every `stride`-th
    /// sample, by Euclidean distance between unit vectors. Ties keep the
    /// first entry in scan order. Returns `None` only for an empty cache.
    ///
    /// The stride makes this an approximate nearest neighbor: it scans the
    /// flattened vertex list, trading accuracy for a cache-resolution-
    /// independent cost, and the match it finds is what keeps resampled
    /// meshes consistent with each other.
    pub fn nearest_strided(&self, direction: Direction, stride: usize) -> Option<usize> {
        let stride = stride.max(1);
        let mut closest_index = None;
        let mut closest_distance = f32::INFINITY;

        for index in (0..self.directions.len()).step_by(stride) {
            let distance = direction.distance_to(self.directions[index]);
            if distance < closest_distance {
                closest_distance = distance;
                closest_index = Some(index);
            }
        }
        closest_index
    }
}
