//! Planet subsystems and their coordinator
//!
//! Each entity (terrain surface, water, clouds, atmosphere, starfield) owns
//! its mesh handle and its slice of the configuration. [`system::PlanetSystem`]
//! wires them to the camera, the input events, and the detail scheduler.

pub mod surface;
pub use surface::Planet;

pub mod water;
pub use water::{Water, WaterConfig};

pub mod clouds;
pub use clouds::{CloudConfig, Clouds};

pub mod atmosphere;
pub use atmosphere::{Atmosphere, AtmosphereConfig};

pub mod stars;
pub use stars::{StarConfig, Stars};

pub mod system;
pub use system::{LightingState, PlanetSystem, RegenerateOptions};
