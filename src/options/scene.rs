use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Visual mesh asset and its placement in the scene.
pub struct SceneOptions {
    /// STL file holding the visual mesh.
    #[schemars(skip)]
    pub mesh_path: PathBuf,
    /// Uniform scale applied to the mesh.
    #[schemars(title = "Mesh Scale", range(min = 0.001, max = 10.0), extend("step" = 0.005))]
    pub mesh_scale: f32,
    /// Euler XYZ rotation (radians) applied to the mesh.
    #[schemars(skip)]
    pub mesh_rotation: [f32; 3],
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            mesh_path: PathBuf::from("assets/single_color.stl"),
            mesh_scale: 0.08,
            mesh_rotation: [-std::f32::consts::FRAC_PI_2, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Catalog", inline)]
#[serde(default)]
/// Where inspection records come from.
pub struct CatalogOptions {
    /// Catalog document (TOML or JSON). The shipped dataset is used when
    /// unset.
    #[schemars(skip)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Pointer gesture parameters.
pub struct InputOptions {
    /// Pointer travel in pixels, while pressed, past which a press becomes
    /// a drag instead of a click.
    #[schemars(title = "Drag Threshold", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub drag_threshold: f32,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            drag_threshold: 3.0,
        }
    }
}
