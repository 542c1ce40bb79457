//! Discrete input events
//!
//! The engine never polls input devices. The embedding host translates its
//! own pointer/keyboard/UI machinery into these events and feeds them to
//! [`crate::planet::PlanetSystem::handle_event`].

/// User-adjustable terrain parameters exposed as sliders
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderParam {
    /// Vertical terrain exaggeration, range `[0.5, 5.0]`
    HeightScale,
    /// Multiplier over all four noise frequency bands, range `[0.25, 3.0]`
    NoiseScale,
    /// Mountain sharpening strength, range `[0.5, 4.0]`
    MountainScale,
    /// Sea level as an offset from the base radius, range `[-0.2, 0.5]`
    WaterLevel,
}

/// Keyboard commands the viewer reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    /// Arrow up: speed up auto-rotation
    RotateFaster,
    /// Arrow down: slow down auto-rotation
    RotateSlower,
    /// Space: pause/resume auto-rotation
    ToggleRotation,
}

/// A discrete input event delivered by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer dragged by (dx, dy) pixels while held
    PointerDrag { dx: f32, dy: f32 },
    /// Wheel scrolled; positive delta zooms out
    Wheel { delta: f32 },
    /// Keyboard command
    Key(KeyCommand),
    /// A parameter slider moved. Takes effect on the next regenerate.
    Slider { param: SliderParam, value: f32 },
    /// Regenerate button pressed: rebuild the planet from the slider values
    Regenerate,
    /// Toggle between day and night lighting
    ToggleDayNight,
    /// Reset the camera to its default pose
    ResetCamera,
}
