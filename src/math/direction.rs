//! Unit directions on the sphere
//!
//! Every terrain query is keyed by a unit vector from the planet center.
//! Working in directions rather than raw vertex positions is what makes
//! resampling across resolutions line up: two tessellations never share
//! vertex positions, but their directions live on the same sphere.

use std::f32::consts::FRAC_PI_2;

use crate::core::types::Vec3;

/// A unit vector on the sphere, the canonical terrain sampling key
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Direction(Vec3);

impl Direction {
    /// North pole
    pub const POLE: Direction = Direction(Vec3::Y);

    /// Normalize an arbitrary position into a direction.
    ///
    /// A zero-length input cannot occur on a sphere tessellation but is
    /// guarded anyway: it falls back to the north pole instead of producing
    /// NaNs that would poison every downstream sample.
    pub fn from_position(position: Vec3) -> Self {
        let length_sq = position.length_squared();
        if length_sq > f32::EPSILON && length_sq.is_finite() {
            Direction(position / length_sq.sqrt())
        } else {
            Self::POLE
        }
    }

    /// The underlying unit vector
    pub fn as_vec3(self) -> Vec3 {
        self.0
    }

    /// Absolute latitude in `[0, 1]`: 0 at the equator, 1 at either pole
    pub fn latitude(self) -> f32 {
        self.0.y.clamp(-1.0, 1.0).asin().abs() / FRAC_PI_2
    }

    /// Euclidean distance to another direction.
    ///
    /// Monotonic with angular distance for unit vectors, so it orders
    /// nearest-direction searches correctly without any trig.
    pub fn distance_to(self, other: Direction) -> f32 {
        (self.0 - other.0).length()
    }
}
