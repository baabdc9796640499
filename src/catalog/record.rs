use std::fmt;

use glam::{Affine3A, EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Inspection status of a turbine component.
///
/// The catalog only accepts the three known values. [`Status::Other`]
/// exists so out-of-band records can still be represented and rendered
/// with a neutral badge instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    /// Damage requiring immediate action.
    Critical,
    /// Damage requiring monitoring.
    Warning,
    /// No actionable anomalies.
    Healthy,
    /// Any value outside the closed set, kept verbatim.
    Other(String),
}

impl Status {
    /// Wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Healthy => "healthy",
            Self::Other(s) => s,
        }
    }

    /// Whether the status is one of the three known values.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        match s {
            "critical" => Self::Critical,
            "warning" => Self::Warning,
            "healthy" => Self::Healthy,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement of a record's capsule pick volume in model space.
///
/// The volume is a unit capsule (radius 1, straight section of length 1
/// along local +Y) scaled, rotated, then translated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRegion {
    /// Capsule center.
    pub position: [f32; 3],
    /// Euler angles in radians, applied in XYZ order.
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Per-axis scale applied to the unit capsule.
    pub scale: [f32; 3],
}

impl HitRegion {
    /// Model-space transform of the unit capsule.
    #[must_use]
    pub fn transform(&self) -> Affine3A {
        let [rx, ry, rz] = self.rotation;
        Affine3A::from_scale_rotation_translation(
            Vec3::from_array(self.scale),
            Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            Vec3::from_array(self.position),
        )
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position
            .iter()
            .chain(&self.rotation)
            .chain(&self.scale)
            .all(|c| c.is_finite())
    }
}

/// One inspected turbine component and the data shown when it is picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
    /// Unique key within a catalog.
    pub id: String,
    /// Display name of the physical component.
    pub title: String,
    /// Short location label, e.g. "Blade 1".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Inspection status.
    pub status: Status,
    /// Number of anomalies found.
    pub anomaly_count: u32,
    /// Free-text findings.
    pub description: String,
    /// When the component was last scanned, as display text.
    pub last_scan: String,
    /// Where the record's pick volume sits on the model.
    pub hit_region: HitRegion,
}
