//! Triangle mesh types and procedural mesh builders.
//!
//! All builders emit [`Mesh`] values: a flat vertex list plus `u32` triangle
//! indices. Vertices are plain-old-data so a renderer can upload them to a
//! GPU buffer without conversion.

pub mod cartoon;
pub mod sphere;
pub mod stick;

use glam::Vec3;

/// 24-byte mesh vertex shared by every builder in this crate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position in model space.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub(crate) fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position: position.into(), normal: normal.into() }
    }
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex buffer.
    pub vertices: Vec<MeshVertex>,
    /// Index buffer, three entries per triangle.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Number of triangles in the mesh.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub(crate) fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Bounds of a point set. Returns a degenerate box at the origin for an
    /// empty set.
    #[must_use]
    pub fn from_points(points: impl Iterator<Item = Vec3>) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut any = false;
        for p in points {
            min = min.min(p);
            max = max.max(p);
            any = true;
        }
        if !any {
            return Self { min: Vec3::ZERO, max: Vec3::ZERO };
        }
        Self { min, max }
    }

    /// Geometric center of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_of_points() {
        let bounds = Aabb::from_points(
            [
                Vec3::new(-1.0, 2.0, 0.5),
                Vec3::new(3.0, -4.0, 0.0),
                Vec3::ZERO,
            ]
            .into_iter(),
        );
        assert_eq!(bounds.min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 2.0, 0.5));
        assert_eq!(bounds.center(), Vec3::new(1.0, -1.0, 0.25));
    }

    #[test]
    fn aabb_of_empty_set_is_degenerate() {
        let bounds = Aabb::from_points(std::iter::empty());
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.size(), Vec3::ZERO);
    }
}
