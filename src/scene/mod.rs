//! Scene host boundary
//!
//! The engine never draws. It hands finished meshes across [`SceneHost`] and
//! remembers only the returned handles, so the previous mesh can be removed
//! (and its GPU resources released by the host) whenever a subsystem
//! replaces its geometry.

pub mod host;

pub use host::{HostedGeometry, MeshHandle, RecordingHost, SceneHost};
