//! Capped cylinder builder for bond rendering.
//!
//! The stick runs along the local X axis from 0 to 1 so a renderer can
//! scale and orient one mesh instance per bond, for both short inter-atom
//! bonds and long backbone segments.

use std::f32::consts::TAU;

use glam::Vec3;

use super::{Mesh, MeshVertex};
use crate::options::StickOptions;

/// Build a capped unit-length cylinder along the X axis.
///
/// The far cap sits at `x = 1`; the near cap center is pushed back to
/// `x = -cap_offset` so abutting sticks overlap instead of gapping at
/// shared joints.
#[must_use]
pub fn stick(opts: &StickOptions) -> Mesh {
    let divisions = opts.divisions;
    let mut mesh = Mesh::default();

    // Cap centers are appended after the ring vertices.
    let far_center = (2 * divisions) as u32;
    let near_center = far_center + 1;

    for division in 0..divisions {
        let theta = TAU * division as f32 / divisions as f32;
        let z = opts.radius * theta.cos();
        let y = opts.radius * theta.sin();
        let radial = Vec3::new(0.0, y, z);

        mesh.vertices.push(MeshVertex::new(radial, radial));
        mesh.vertices
            .push(MeshVertex::new(Vec3::new(1.0, y, z), radial));

        let i1 = (2 * division) as u32;
        let i2 = i1 + 1;
        let i3 = (2 * ((division + 1) % divisions)) as u32;
        let i4 = i3 + 1;

        mesh.push_triangle(i1, i3, i2);
        mesh.push_triangle(i3, i4, i2);

        mesh.push_triangle(i2, i4, far_center);
        mesh.push_triangle(i3, i1, near_center);
    }

    mesh.vertices.push(MeshVertex::new(Vec3::X, Vec3::X));
    mesh.vertices.push(MeshVertex::new(
        Vec3::new(-opts.cap_offset, 0.0, 0.0),
        Vec3::NEG_X,
    ));

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_triangle_counts() {
        let opts = StickOptions::default();
        let mesh = stick(&opts);
        // Two ring vertices per division plus two cap centers
        assert_eq!(mesh.vertices.len(), 2 * opts.divisions + 2);
        // Two side triangles and two cap fan triangles per division
        assert_eq!(mesh.triangle_count(), 4 * opts.divisions);
    }

    #[test]
    fn ring_vertices_sit_at_radius() {
        let opts = StickOptions { radius: 0.3, ..Default::default() };
        let mesh = stick(&opts);
        for v in &mesh.vertices[..2 * opts.divisions] {
            let [x, y, z] = v.position;
            assert!(x == 0.0 || x == 1.0);
            let r = (y * y + z * z).sqrt();
            assert!((r - 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn near_cap_extends_behind_origin() {
        let opts = StickOptions::default();
        let mesh = stick(&opts);
        let near = mesh.vertices.last().unwrap();
        assert_eq!(near.position[0], -opts.cap_offset);
        assert_eq!(near.normal, [-1.0, 0.0, 0.0]);
    }
}
