//! Orbit camera for planet viewing
//!
//! The camera sits on the +Z axis looking at the planet center. Pointer
//! drags rotate the planet (not the camera) through a slerp-smoothed
//! quaternion, and the wheel zooms the camera along its axis. This mirrors
//! how a globe viewer feels: the world turns under a fixed eye.

use crate::core::types::{Quat, Vec3};

/// Configuration for the orbit camera
#[derive(Clone, Debug)]
pub struct OrbitCameraConfig {
    /// Auto-rotation speed in radians per frame at 60 Hz
    pub rotation_speed: f32,
    /// Zoom step per wheel notch, in world units
    pub zoom_speed: f32,
    /// Closest allowed camera distance
    pub min_zoom: f32,
    /// Farthest allowed camera distance
    pub max_zoom: f32,
    /// Distance the camera starts at and resets to
    pub default_distance: f32,
}

impl Default for OrbitCameraConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 0.0005,
            zoom_speed: 0.05,
            min_zoom: 7.0,
            max_zoom: 20.0,
            default_distance: 15.0,
        }
    }
}

/// Orbit camera state: distance plus planet rotation
pub struct OrbitCamera {
    config: OrbitCameraConfig,
    distance: f32,
    /// Rotation the user is steering toward
    target_rotation: Quat,
    /// Smoothed rotation actually applied to the planet
    current_rotation: Quat,
    /// Accumulated auto-rotation angle around Y
    auto_angle: f32,
    auto_rotate: bool,
    rotation_speed: f32,
}

impl OrbitCamera {
    /// Create a camera at the configured default distance
    pub fn new(config: OrbitCameraConfig) -> Self {
        let distance = config.default_distance.clamp(config.min_zoom, config.max_zoom);
        let rotation_speed = config.rotation_speed;
        Self {
            config,
            distance,
            target_rotation: Quat::IDENTITY,
            current_rotation: Quat::IDENTITY,
            auto_angle: 0.0,
            auto_rotate: true,
            rotation_speed,
        }
    }

    /// Current camera distance from the planet center
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Camera world position (on the +Z axis)
    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    /// Rotation to apply to the planet meshes this frame
    pub fn planet_rotation(&self) -> Quat {
        self.current_rotation * Quat::from_rotation_y(self.auto_angle)
    }

    /// Zoom by a wheel delta. Positive delta moves the camera away,
    /// negative brings it closer; the result is clamped to the zoom range.
    pub fn zoom(&mut self, wheel_delta: f32) {
        let direction = if wheel_delta > 0.0 { 1.0 } else { -1.0 };
        self.distance = (self.distance + direction * self.config.zoom_speed)
            .clamp(self.config.min_zoom, self.config.max_zoom);
    }

    /// Apply a pointer drag in pixels. Half a degree of rotation per pixel.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let delta = Quat::from_euler(
            glam::EulerRot::XYZ,
            (dy * 0.5).to_radians(),
            (dx * 0.5).to_radians(),
            0.0,
        );
        self.target_rotation = delta * self.target_rotation;
    }

    /// Advance auto-rotation and smooth the manual rotation toward its target.
    /// Call once per frame.
    pub fn update(&mut self) {
        if self.auto_rotate {
            self.auto_angle += self.rotation_speed;
        }
        self.current_rotation = self.current_rotation.slerp(self.target_rotation, 0.1);
    }

    /// Increase auto-rotation speed (arrow up)
    pub fn rotate_faster(&mut self) {
        self.rotation_speed = (self.rotation_speed + 0.0001).min(0.005);
    }

    /// Decrease auto-rotation speed (arrow down)
    pub fn rotate_slower(&mut self) {
        self.rotation_speed = (self.rotation_speed - 0.0001).max(0.0);
    }

    /// Toggle auto-rotation (space)
    pub fn toggle_rotation(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    /// Whether the planet is auto-rotating
    pub fn is_rotating(&self) -> bool {
        self.auto_rotate
    }

    /// Reset to the default distance, orientation, and rotation speed
    pub fn reset(&mut self) {
        self.distance = self
            .config
            .default_distance
            .clamp(self.config.min_zoom, self.config.max_zoom);
        self.target_rotation = Quat::IDENTITY;
        self.current_rotation = Quat::IDENTITY;
        self.auto_angle = 0.0;
        self.rotation_speed = self.config.rotation_speed;
        self.auto_rotate = true;
    }

    /// Zoom bounds, used to derive the LOD detail factor
    pub fn zoom_range(&self) -> (f32, f32) {
        (self.config.min_zoom, self.config.max_zoom)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(OrbitCameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamped() {
        let mut camera = OrbitCamera::default();

        for _ in 0..1000 {
            camera.zoom(-1.0);
        }
        assert_eq!(camera.distance(), 7.0);

        for _ in 0..1000 {
            camera.zoom(1.0);
        }
        assert_eq!(camera.distance(), 20.0);
    }

    #[test]
    fn test_default_distance() {
        let camera = OrbitCamera::default();
        assert_eq!(camera.distance(), 15.0);
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 15.0));
    }

    #[test]
    fn test_drag_rotates_toward_target() {
        let mut camera = OrbitCamera::default();
        camera.toggle_rotation(); // freeze auto-rotation

        camera.drag(100.0, 0.0);
        for _ in 0..120 {
            camera.update();
        }

        let rotated = camera.planet_rotation() * Vec3::Z;
        assert!((rotated - Vec3::Z).length() > 0.1);
    }

    #[test]
    fn test_rotation_speed_bounds() {
        let mut camera = OrbitCamera::default();

        for _ in 0..1000 {
            camera.rotate_faster();
        }
        for _ in 0..3 {
            camera.update();
        }
        let fast_angle = camera.auto_angle;
        assert!(fast_angle <= 0.005 * 3.0 + 1e-6);

        for _ in 0..1000 {
            camera.rotate_slower();
        }
        let before = camera.auto_angle;
        camera.update();
        assert_eq!(camera.auto_angle, before);
    }

    #[test]
    fn test_reset() {
        let mut camera = OrbitCamera::default();
        camera.zoom(-1.0);
        camera.drag(50.0, 20.0);
        camera.update();
        camera.reset();

        assert_eq!(camera.distance(), 15.0);
        assert_eq!(camera.planet_rotation(), Quat::IDENTITY);
        assert!(camera.is_rotating());
    }
}
