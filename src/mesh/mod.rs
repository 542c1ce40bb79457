//! Mesh data handed to the rendering host

pub mod resampler;

use bytemuck::{Pod, Zeroable};

use crate::core::types::{Rgb, Vec3};

/// Packed vertex layout for GPU upload by the host
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub opacity: f32,
}

/// A triangle mesh over the lat/long sphere topology.
///
/// Ownership transfers to the scene host on handoff; the producer keeps only
/// the returned handle so it can dispose the previous mesh when replacing it.
pub struct Mesh {
    /// Tessellation resolution this mesh was built at
    pub resolution: u32,
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Vertex normals, parallel to `positions`
    pub normals: Vec<Vec3>,
    /// Vertex colors, parallel to `positions`
    pub colors: Vec<Rgb>,
    /// Per-vertex opacity (clouds); `None` means fully opaque
    pub opacity: Option<Vec<f32>>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Recompute vertex normals by area-weighted triangle accumulation.
    /// Vertices no triangle touches (or with degenerate accumulation) fall
    /// back to the radial direction, which is correct for a sphere shell.
    pub fn compute_normals(&mut self) {
        let mut accumulated = vec![Vec3::ZERO; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let normal = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            accumulated[a] += normal;
            accumulated[b] += normal;
            accumulated[c] += normal;
        }

        self.normals = accumulated
            .iter()
            .zip(&self.positions)
            .map(|(n, p)| {
                if n.length_squared() > f32::EPSILON {
                    n.normalize()
                } else {
                    p.normalize_or(Vec3::Y)
                }
            })
            .collect();
    }

    /// Interleave into the packed GPU vertex layout
    pub fn packed_vertices(&self) -> Vec<MeshVertex> {
        (0..self.positions.len())
            .map(|i| MeshVertex {
                position: self.positions[i].to_array(),
                normal: self.normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
                color: self.colors[i],
                opacity: self
                    .opacity
                    .as_ref()
                    .and_then(|o| o.get(i).copied())
                    .unwrap_or(1.0),
            })
            .collect()
    }
}

/// A point cloud (the starfield background)
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Rgb>,
    /// Point sprite size in world units
    pub point_size: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_mesh() -> Mesh {
        Mesh {
            resolution: 1,
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            normals: Vec::new(),
            colors: vec![[0.5, 0.5, 0.5]; 4],
            opacity: None,
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn test_normals_for_flat_quad() {
        let mut mesh = quad_mesh();
        mesh.compute_normals();

        assert_eq!(mesh.normals.len(), 4);
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-6);
            assert!((n.z - 1.0).abs() < 1e-5, "expected +Z normal, got {n:?}");
        }
    }

    #[test]
    fn test_untouched_vertex_gets_radial_normal() {
        let mut mesh = quad_mesh();
        mesh.positions.push(Vec3::new(0.0, 0.0, 2.0));
        mesh.colors.push([0.5, 0.5, 0.5]);
        mesh.compute_normals();

        let n = mesh.normals[4];
        assert!((n - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_packed_vertices() {
        let mut mesh = quad_mesh();
        mesh.compute_normals();
        mesh.opacity = Some(vec![0.25; 4]);

        let packed = mesh.packed_vertices();
        assert_eq!(packed.len(), 4);
        assert_eq!(packed[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(packed[0].opacity, 0.25);

        let bytes: &[u8] = bytemuck::cast_slice(&packed);
        assert_eq!(bytes.len(), packed.len() * std::mem::size_of::<MeshVertex>());
    }
}
