//! CPU ray picking.
//!
//! Screen points are turned into world-space rays, which are then tested
//! against the scene's capsule hit volumes. Only the nearest intersection
//! along the ray is ever reported.

mod capsule;

pub use capsule::ray_capsule;
use glam::Vec3;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point in world space.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` towards `direction`; the direction is normalized.
    /// Returns `None` for a zero or non-finite direction.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// The nearest intersection of a ray with a hit volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Position of the hit volume's record in its catalog.
    pub record_index: usize,
    /// Distance along the ray to the volume surface.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}
