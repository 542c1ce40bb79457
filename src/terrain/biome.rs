//! Biome classification and palette
//!
//! Biomes are chosen by an ordered threshold table over elevation relative
//! to the waterline, with each band branching on a latitude-driven
//! temperature proxy. The palette is fixed; only shallow water interpolates
//! its color (by depth, so coasts fade instead of banding).

use crate::core::types::Rgb;

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

pub const DEEP_OCEAN: Rgb = rgb(0x00, 0x1a, 0x33);
pub const SHALLOW_WATER: Rgb = rgb(0x00, 0x77, 0xbe);
pub const SHALLOW_WATER_LIGHT: Rgb = rgb(0x00, 0xa1, 0xd6);
pub const BEACH: Rgb = rgb(0xde, 0xb8, 0x87);
pub const TROPICAL_FOREST: Rgb = rgb(0x22, 0x8b, 0x22);
pub const GRASSLAND: Rgb = rgb(0x95, 0xa1, 0x67);
pub const TUNDRA: Rgb = rgb(0xa6, 0x93, 0x74);
pub const DENSE_FOREST: Rgb = rgb(0x15, 0x67, 0x34);
pub const HIGHLAND: Rgb = rgb(0x6a, 0x7f, 0x3c);
pub const ALPINE: Rgb = rgb(0x8e, 0x9e, 0x82);
pub const WARM_ROCK: Rgb = rgb(0x96, 0x87, 0x72);
pub const ROCKY_MOUNTAIN: Rgb = rgb(0xc9, 0xc2, 0xb6);
pub const WARM_PEAK: Rgb = rgb(0xa0, 0x9e, 0x8c);
pub const SNOW: Rgb = rgb(0xf8, 0xf8, 0xff);

/// Biome types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    DeepOcean,
    ShallowWater,
    Beach,
    TropicalForest,
    Grassland,
    Tundra,
    DenseForest,
    Highland,
    Alpine,
    WarmRock,
    RockyMountain,
    WarmPeak,
    Snow,
}

impl Biome {
    /// Classify by elevation offset from the base radius and the temperature
    /// proxy. Thresholds are offsets relative to `water_level`.
    pub fn classify(elevation: f32, water_level: f32, temperature: f32) -> Biome {
        if elevation < -0.2 {
            Biome::DeepOcean
        } else if elevation < water_level {
            Biome::ShallowWater
        } else if elevation < water_level + 0.1 {
            Biome::Beach
        } else if elevation < water_level + 0.3 {
            if temperature > 0.7 {
                Biome::TropicalForest
            } else if temperature > 0.4 {
                Biome::Grassland
            } else {
                Biome::Tundra
            }
        } else if elevation < water_level + 0.7 {
            if temperature > 0.6 {
                Biome::DenseForest
            } else if temperature > 0.4 {
                Biome::Highland
            } else {
                Biome::Alpine
            }
        } else if elevation < water_level + 1.0 {
            if temperature > 0.7 {
                Biome::WarmRock
            } else {
                Biome::RockyMountain
            }
        } else if temperature > 0.8 {
            Biome::WarmPeak
        } else {
            Biome::Snow
        }
    }

    /// Surface color for this biome. Shallow water interpolates toward the
    /// lighter tone as depth decreases; every other biome has a fixed color.
    pub fn surface_color(self, elevation: f32, water_level: f32) -> Rgb {
        match self {
            Biome::DeepOcean => DEEP_OCEAN,
            Biome::ShallowWater => {
                let depth = (water_level - elevation) / (water_level + 0.2);
                lerp(SHALLOW_WATER, SHALLOW_WATER_LIGHT, 1.0 - depth.clamp(0.0, 1.0))
            }
            Biome::Beach => BEACH,
            Biome::TropicalForest => TROPICAL_FOREST,
            Biome::Grassland => GRASSLAND,
            Biome::Tundra => TUNDRA,
            Biome::DenseForest => DENSE_FOREST,
            Biome::Highland => HIGHLAND,
            Biome::Alpine => ALPINE,
            Biome::WarmRock => WARM_ROCK,
            Biome::RockyMountain => ROCKY_MOUNTAIN,
            Biome::WarmPeak => WARM_PEAK,
            Biome::Snow => SNOW,
        }
    }

    /// Whether this biome lies below the waterline
    pub fn is_water(self) -> bool {
        matches!(self, Biome::DeepOcean | Biome::ShallowWater)
    }

    /// Whether this biome belongs to the cold (low-temperature) branches
    pub fn is_cold(self) -> bool {
        matches!(
            self,
            Biome::Tundra | Biome::Alpine | Biome::RockyMountain | Biome::Snow
        )
    }
}

fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}
