//! Procedural terrain generation

pub mod noise_field;
pub use noise_field::{NoiseField, TERRAIN_SEED};

pub mod config;
pub use config::PlanetConfig;

pub mod biome;
pub use biome::Biome;

pub mod synthesizer;
pub use synthesizer::{TerrainSample, TerrainSynthesizer};

pub mod reference;
pub use reference::{ReferenceTerrainCache, REFERENCE_RESOLUTION};
