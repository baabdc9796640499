use glam::{Affine3A, Vec3};

use crate::catalog::InspectionRecord;
use crate::picking::{ray_capsule, Ray};

/// Lower endpoint of the unit capsule's straight section.
const UNIT_CAPSULE_A: Vec3 = Vec3::new(0.0, -0.5, 0.0);

/// Upper endpoint of the unit capsule's straight section.
const UNIT_CAPSULE_B: Vec3 = Vec3::new(0.0, 0.5, 0.0);

/// Radius of the unit capsule.
const UNIT_CAPSULE_RADIUS: f32 = 1.0;

/// Invisible capsule bound to one catalog record.
///
/// Hit volumes are never drawn but always take part in picking. The
/// record association is fixed when the scene is composed.
#[derive(Debug, Clone)]
pub struct HitVolume {
    record_index: usize,
    record_id: String,
    transform: Affine3A,
    inverse: Affine3A,
}

impl HitVolume {
    /// Volume for the record at `record_index`, placed by its hit region.
    #[must_use]
    pub fn from_record(record_index: usize, record: &InspectionRecord) -> Self {
        let transform = record.hit_region.transform();
        Self {
            record_index,
            record_id: record.id.clone(),
            transform,
            inverse: transform.inverse(),
        }
    }

    /// Catalog position of the associated record.
    #[must_use]
    pub fn record_index(&self) -> usize {
        self.record_index
    }

    /// Id of the associated record.
    #[must_use]
    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    /// Unit-capsule-to-model transform.
    #[must_use]
    pub fn transform(&self) -> Affine3A {
        self.transform
    }

    /// Hit volumes are never drawn.
    #[must_use]
    pub fn visible(&self) -> bool {
        false
    }

    /// Hit volumes always participate in ray tests.
    #[must_use]
    pub fn pickable(&self) -> bool {
        true
    }

    /// World-space distance along `ray` to the volume surface.
    ///
    /// The ray is taken into the unit capsule's space without renormalizing
    /// its direction, so the returned parameter is a world distance.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let origin = self.inverse.transform_point3(ray.origin);
        let dir = self.inverse.transform_vector3(ray.direction);
        ray_capsule(
            origin,
            dir,
            UNIT_CAPSULE_A,
            UNIT_CAPSULE_B,
            UNIT_CAPSULE_RADIUS,
        )
    }
}
