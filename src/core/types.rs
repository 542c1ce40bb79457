//! Core type aliases and re-exports

pub use glam::{DVec3, Quat, Vec2, Vec3};

/// RGB color triplet, channels in `[0, 1]`.
pub type Rgb = [f32; 3];

/// Standard Result type for the engine
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
