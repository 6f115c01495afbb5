//! Subdivided icosphere builder for space-filling atom rendering.

use glam::Vec3;

use super::{Mesh, MeshVertex};

/// Build a unit sphere by recursively subdividing an 8-triangle octahedron
/// seed. Each subdivision pass splits every triangle into four by inserting
/// normalized edge midpoints, so level `d` yields `8 * 4^(d-1)` triangles.
/// Every vertex normal equals its position.
#[must_use]
pub fn icosphere(divisions: usize) -> Mesh {
    let mut mesh = Mesh::default();

    let seed = [
        [Vec3::Z, Vec3::X, Vec3::Y],
        [Vec3::X, Vec3::NEG_Z, Vec3::Y],
        [Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y],
        [Vec3::NEG_X, Vec3::Z, Vec3::Y],
        [Vec3::X, Vec3::Z, Vec3::NEG_Y],
        [Vec3::NEG_Z, Vec3::X, Vec3::NEG_Y],
        [Vec3::NEG_X, Vec3::NEG_Z, Vec3::NEG_Y],
        [Vec3::Z, Vec3::NEG_X, Vec3::NEG_Y],
    ];
    for [a, b, c] in seed {
        let base = mesh.vertices.len() as u32;
        mesh.vertices.push(MeshVertex::new(a, a));
        mesh.vertices.push(MeshVertex::new(b, b));
        mesh.vertices.push(MeshVertex::new(c, c));
        mesh.push_triangle(base, base + 1, base + 2);
    }

    for _ in 1..divisions {
        subdivide(&mut mesh);
    }

    mesh
}

/// Split every triangle into four equilateral children, projecting the new
/// edge midpoints back onto the unit sphere.
fn subdivide(mesh: &mut Mesh) {
    let triangle_count = mesh.indices.len() / 3;

    for t in 0..triangle_count {
        let offset = t * 3;
        let i1 = mesh.indices[offset];
        let i2 = mesh.indices[offset + 1];
        let i3 = mesh.indices[offset + 2];

        let p1 = Vec3::from(mesh.vertices[i1 as usize].position);
        let p2 = Vec3::from(mesh.vertices[i2 as usize].position);
        let p3 = Vec3::from(mesh.vertices[i3 as usize].position);

        let m12 = ((p1 + p2) * 0.5).normalize();
        let m23 = ((p2 + p3) * 0.5).normalize();
        let m31 = ((p3 + p1) * 0.5).normalize();

        let i4 = mesh.vertices.len() as u32;
        mesh.vertices.push(MeshVertex::new(m12, m12));
        mesh.vertices.push(MeshVertex::new(m23, m23));
        mesh.vertices.push(MeshVertex::new(m31, m31));
        let (i5, i6) = (i4 + 1, i4 + 2);

        // Center triangle replaces the parent in place; the three corner
        // triangles are appended.
        mesh.indices[offset] = i4;
        mesh.indices[offset + 1] = i5;
        mesh.indices[offset + 2] = i6;

        mesh.push_triangle(i1, i4, i6);
        mesh.push_triangle(i4, i2, i5);
        mesh.push_triangle(i6, i5, i3);
    }
}
