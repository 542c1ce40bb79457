//! Detail factor to resolution mapping
//!
//! The detail factor is a normalized `[0, 1]` knob derived from camera
//! distance; resolutions are powers of two picked by interpolating in log2
//! space, so each step of the knob halves or doubles the vertex density
//! instead of sliding through useless in-between tessellations.

/// Terrain mesh resolution bounds
pub const TERRAIN_MIN_RESOLUTION: u32 = 64;
pub const TERRAIN_MAX_RESOLUTION: u32 = 512;

/// Resolution bounds for the water/cloud/atmosphere shells
pub const OVERLAY_MIN_RESOLUTION: u32 = 64;
pub const OVERLAY_MAX_RESOLUTION: u32 = 256;

/// Hysteresis tolerance: a resolution change at or under this is ignored,
/// which stops thrashing when the detail factor hovers at a rounding
/// boundary.
pub const RESOLUTION_TOLERANCE: u32 = 16;

/// Map a detail factor to a power-of-two resolution in `[min_res, max_res]`.
///
/// Interpolates the exponent between `log2(min_res)` and `log2(max_res)`,
/// rounds to the nearest integer, and clamps. Monotonic non-decreasing in
/// `detail_factor`.
///
/// # Examples
/// ```
/// use orbis::lod::resolution_for;
///
/// assert_eq!(resolution_for(0.0, 64, 512), 64);
/// assert_eq!(resolution_for(1.0, 64, 512), 512);
/// assert_eq!(resolution_for(0.5, 64, 256), 128);
/// ```
pub fn resolution_for(detail_factor: f32, min_res: u32, max_res: u32) -> u32 {
    let factor = if detail_factor.is_finite() {
        detail_factor.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let low = (min_res.max(1) as f32).log2();
    let high = (max_res.max(1) as f32).log2();
    let exponent = (low + (high - low) * factor).round() as u32;
    (1u32 << exponent.min(31)).clamp(min_res, max_res)
}

/// Map a camera distance to a detail factor in `[0, 1]`.
///
/// 1.0 at or below `min_distance` (closest, most detail), 0.0 at or above
/// `max_distance`; linear in between, clamped beyond either bound.
///
/// # Examples
/// ```
/// use orbis::lod::detail_factor_for;
///
/// assert_eq!(detail_factor_for(7.0, 7.0, 20.0), 1.0);
/// assert_eq!(detail_factor_for(20.0, 7.0, 20.0), 0.0);
/// assert_eq!(detail_factor_for(100.0, 7.0, 20.0), 0.0);
/// ```
pub fn detail_factor_for(distance: f32, min_distance: f32, max_distance: f32) -> f32 {
    if max_distance <= min_distance {
        return if distance <= min_distance { 1.0 } else { 0.0 };
    }
    if distance <= min_distance {
        1.0
    } else if distance >= max_distance {
        0.0
    } else {
        1.0 - (distance - min_distance) / (max_distance - min_distance)
    }
}

/// Hysteresis predicate: whether a new resolution differs enough from the
/// previously applied one to be worth a rebuild.
pub fn exceeds_tolerance(previous: u32, next: u32) -> bool {
    previous.abs_diff(next) > RESOLUTION_TOLERANCE
}
