//! Visual triangle mesh asset and its STL loader.
//!
//! The mesh is display-only: it carries positions and per-face normals,
//! but it never participates in picking. Pick volumes live in
//! [`crate::scene`].

mod stl;

use glam::{Affine3A, Vec3};
pub use stl::{load_stl, parse_stl, StlError};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` for an empty set.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) =
            iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Radius of the bounding sphere around [`center`](Self::center).
    #[must_use]
    pub fn radius(&self) -> f32 {
        (self.max - self.min).length() * 0.5
    }

    /// The eight corner points.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Bounds of this box after an affine transform.
    #[must_use]
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        let corners = self.corners().map(|c| transform.transform_point3(c));
        // Eight corners, never empty.
        Self::from_points(corners).unwrap_or(*self)
    }
}

/// Non-indexed triangle soup as stored in stereolithography files.
///
/// `positions` holds three vertices per triangle; `face_normals` holds one
/// unit normal per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions, three per triangle.
    pub positions: Vec<Vec3>,
    /// One normal per triangle.
    pub face_normals: Vec<Vec3>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for `triangles` faces.
    #[must_use]
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangles * 3),
            face_normals: Vec::with_capacity(triangles),
        }
    }

    /// Append a triangle. A stored normal that is zero-length or not finite
    /// is replaced by one computed from the winding order.
    pub fn push_triangle(&mut self, normal: Vec3, vertices: [Vec3; 3]) {
        let [a, b, c] = vertices;
        let normal = if normal.is_finite() && normal.length_squared() > 1e-12
        {
            normal.normalize()
        } else {
            (b - a).cross(c - a).normalize_or_zero()
        };
        self.positions.extend_from_slice(&vertices);
        self.face_normals.push(normal);
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.face_normals.len()
    }

    /// Whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.face_normals.is_empty()
    }

    /// Model-space bounds, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::Quat;

    use super::*;

    #[test]
    fn degenerate_normal_is_recomputed_from_winding() {
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle(Vec3::ZERO, [Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(mesh.face_normals[0], Vec3::Z);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn stored_normal_is_normalized() {
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle(
            Vec3::new(0.0, 0.0, 4.0),
            [Vec3::ZERO, Vec3::X, Vec3::Y],
        );
        assert_eq!(mesh.face_normals[0], Vec3::Z);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle(
            Vec3::Z,
            [Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, -2.0, 0.0), Vec3::Y],
        );
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 1.0, 2.0));
        assert!(TriangleMesh::new().bounds().is_none());
    }

    #[test]
    fn transformed_bounds_follow_rotation() {
        let aabb = Aabb {
            min: Vec3::new(0.0, 0.0, 0.0),
            max: Vec3::new(1.0, 1.0, 10.0),
        };
        // -90 degrees about X maps +Z onto +Y.
        let t = Affine3A::from_quat(Quat::from_rotation_x(-FRAC_PI_2));
        let rotated = aabb.transformed(&t);
        assert!((rotated.max.y - 10.0).abs() < 1e-4);
        assert!((rotated.min.z + 1.0).abs() < 1e-4);
    }
}
