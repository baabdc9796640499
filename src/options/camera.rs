use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and orbit control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial eye position.
    #[schemars(skip)]
    pub eye: [f32; 3],
    /// Initial orbit focus point.
    #[schemars(skip)]
    pub focus: [f32; 3],
    /// Closest zoom distance from the focus point.
    #[schemars(title = "Min Distance", range(min = 0.5, max = 50.0), extend("step" = 0.5))]
    pub min_distance: f32,
    /// Farthest zoom distance from the focus point.
    #[schemars(title = "Max Distance", range(min = 5.0, max = 500.0), extend("step" = 1.0))]
    pub max_distance: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            znear: 0.1,
            zfar: 1000.0,
            eye: [0.0, 5.0, 25.0],
            focus: [0.0, 0.0, 0.0],
            min_distance: 5.0,
            max_distance: 50.0,
            rotate_speed: 0.5,
            pan_speed: 0.5,
            zoom_speed: 0.1,
        }
    }
}
