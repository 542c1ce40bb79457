//! The rendering collaborator's interface

use std::collections::HashMap;

use crate::core::types::Result;
use crate::mesh::{Mesh, PointCloud};

/// Opaque handle to a mesh owned by the scene host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Receiver for generated geometry.
///
/// Implemented by the rendering host. `remove_mesh` both detaches the mesh
/// from the scene and releases its resources; the engine calls it before
/// installing a replacement, on every regeneration path.
pub trait SceneHost {
    /// Take ownership of a triangle mesh and attach it to the scene
    fn add_mesh(&mut self, mesh: Mesh) -> Result<MeshHandle>;

    /// Take ownership of a point cloud and attach it to the scene
    fn add_points(&mut self, cloud: PointCloud) -> Result<MeshHandle>;

    /// Detach and dispose a previously added mesh or point cloud
    fn remove_mesh(&mut self, handle: MeshHandle);
}

/// Geometry retained by the recording host
pub enum HostedGeometry {
    Mesh(Mesh),
    Points(PointCloud),
}

/// In-memory scene host for tests and headless tooling.
///
/// Stores every live geometry and counts add/remove traffic, which is all
/// the engine-side contracts need verifying: what is attached, and that
/// replaced meshes were disposed.
#[derive(Default)]
pub struct RecordingHost {
    next_id: u64,
    /// Currently attached geometry by handle
    pub live: HashMap<MeshHandle, HostedGeometry>,
    /// Total meshes and point clouds ever added
    pub added: usize,
    /// Total removals
    pub removed: usize,
}

impl RecordingHost {
    /// Create an empty recording host
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently attached geometries
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Fetch an attached triangle mesh
    pub fn mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
        match self.live.get(&handle) {
            Some(HostedGeometry::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    fn next_handle(&mut self) -> MeshHandle {
        self.next_id += 1;
        MeshHandle(self.next_id)
    }
}

impl SceneHost for RecordingHost {
    fn add_mesh(&mut self, mesh: Mesh) -> Result<MeshHandle> {
        let handle = self.next_handle();
        self.live.insert(handle, HostedGeometry::Mesh(mesh));
        self.added += 1;
        Ok(handle)
    }

    fn add_points(&mut self, cloud: PointCloud) -> Result<MeshHandle> {
        let handle = self.next_handle();
        self.live.insert(handle, HostedGeometry::Points(cloud));
        self.added += 1;
        Ok(handle)
    }

    fn remove_mesh(&mut self, handle: MeshHandle) {
        if self.live.remove(&handle).is_some() {
            self.removed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;

    fn tiny_mesh() -> Mesh {
        Mesh {
            resolution: 2,
            positions: vec![Vec3::X, Vec3::Y, Vec3::Z],
            normals: vec![Vec3::Y; 3],
            colors: vec![[1.0, 0.0, 0.0]; 3],
            opacity: None,
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_add_and_remove() {
        let mut host = RecordingHost::new();

        let a = host.add_mesh(tiny_mesh()).unwrap();
        let b = host.add_mesh(tiny_mesh()).unwrap();
        assert_ne!(a, b);
        assert_eq!(host.live_count(), 2);

        host.remove_mesh(a);
        assert_eq!(host.live_count(), 1);
        assert_eq!(host.removed, 1);
        assert!(host.mesh(a).is_none());
        assert!(host.mesh(b).is_some());
    }

    #[test]
    fn test_remove_unknown_handle_is_noop() {
        let mut host = RecordingHost::new();
        host.remove_mesh(MeshHandle(99));
        assert_eq!(host.removed, 0);
    }

    #[test]
    fn test_points_are_tracked() {
        let mut host = RecordingHost::new();
        let cloud = PointCloud {
            positions: vec![Vec3::X],
            colors: vec![[1.0, 1.0, 1.0]],
            point_size: 0.15,
        };
        let handle = host.add_points(cloud).unwrap();
        assert_eq!(host.live_count(), 1);
        assert!(host.mesh(handle).is_none());
    }
}
