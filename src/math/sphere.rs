//! Latitude/longitude sphere tessellation
//!
//! A UV sphere of `resolution` × `resolution` segments, vertex-compatible
//! with the grid every subsystem (terrain, water, clouds, atmosphere)
//! displaces. Vertices are laid out row-major from the north pole down, with
//! a duplicated seam column so the texture-style topology stays simple; the
//! pole rows collapse to coincident vertices and the degenerate triangles
//! there are skipped in the index buffer.

use std::f32::consts::PI;

use crate::core::types::Vec3;
use crate::math::Direction;

/// A tessellated sphere: positions, per-vertex unit directions, and indices
pub struct SphereTessellation {
    /// Segments per axis
    pub resolution: u32,
    /// Vertex positions at the given radius
    pub positions: Vec<Vec3>,
    /// Unit direction of each vertex, parallel to `positions`
    pub directions: Vec<Direction>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl SphereTessellation {
    /// Tessellate a sphere of `radius` with `resolution` segments per axis.
    /// Produces `(resolution + 1)²` vertices.
    pub fn new(radius: f32, resolution: u32) -> Self {
        let res = resolution.max(2);
        let row = res + 1;
        let vertex_count = (row * row) as usize;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut directions = Vec::with_capacity(vertex_count);

        for iy in 0..=res {
            let v = iy as f32 / res as f32;
            let polar = v * PI;
            let (sin_polar, cos_polar) = polar.sin_cos();

            for ix in 0..=res {
                let u = ix as f32 / res as f32;
                let azimuth = u * 2.0 * PI;
                let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();

                let direction = Vec3::new(
                    -cos_azimuth * sin_polar,
                    cos_polar,
                    sin_azimuth * sin_polar,
                );
                positions.push(direction * radius);
                directions.push(Direction::from_position(direction));
            }
        }

        let mut indices = Vec::with_capacity((res * res * 6) as usize);
        for iy in 0..res {
            for ix in 0..res {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != res - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            resolution: res,
            positions,
            directions,
            indices,
        }
    }

    /// Number of vertices in the tessellation
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count() {
        let tess = SphereTessellation::new(5.0, 8);
        assert_eq!(tess.vertex_count(), 81);
        assert_eq!(tess.directions.len(), 81);
    }

    #[test]
    fn test_index_count_skips_pole_degenerates() {
        let res = 8u32;
        let tess = SphereTessellation::new(1.0, res);
        // res² quads, two triangles each, minus one triangle per pole quad
        let expected = (res * res * 2 - 2 * res) * 3;
        assert_eq!(tess.indices.len(), expected as usize);

        let max = *tess.indices.iter().max().unwrap();
        assert!((max as usize) < tess.vertex_count());
    }

    #[test]
    fn test_poles_and_radius() {
        let tess = SphereTessellation::new(5.0, 16);

        // First row is the north pole, last row the south pole
        assert!((tess.positions[0] - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-4);
        let last = *tess.positions.last().unwrap();
        assert!((last - Vec3::new(0.0, -5.0, 0.0)).length() < 1e-4);

        for p in &tess.positions {
            assert!((p.length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_directions_are_unit() {
        let tess = SphereTessellation::new(3.0, 12);
        for d in &tess.directions {
            assert!((d.as_vec3().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_seam_column_duplicated() {
        let res = 8u32;
        let tess = SphereTessellation::new(1.0, res);
        let row = (res + 1) as usize;

        // u = 0 and u = 1 land on the same point of an equatorial row
        let equator = (res / 2) as usize * row;
        let first = tess.positions[equator];
        let last = tess.positions[equator + res as usize];
        assert!((first - last).length() < 1e-5);
    }
}
