//! Centralized viewer options with TOML support.
//!
//! Mesh placement, camera, status palette, catalog source, and pointer
//! gesture settings live here. Options serialize to and from TOML; every
//! section uses `#[serde(default)]` so partial files work.

mod camera;
mod palette;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use palette::{BadgeStyle, PaletteOptions};
pub use scene::{CatalogOptions, InputOptions, SceneOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    BuiltinCatalog, Catalog, CatalogSource, FileCatalog,
};
use crate::error::TwinError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Visual mesh asset and placement.
    pub scene: SceneOptions,
    /// Camera projection and orbit parameters.
    pub camera: CameraOptions,
    /// Status badge labels and colors.
    pub palette: PaletteOptions,
    /// Inspection catalog source.
    #[schemars(skip)]
    pub catalog: CatalogOptions,
    /// Pointer gesture parameters.
    pub input: InputOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`TwinError::Io`] if the file cannot be read,
    /// [`TwinError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, TwinError> {
        let content = std::fs::read_to_string(path).map_err(TwinError::Io)?;
        toml::from_str(&content)
            .map_err(|e| TwinError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`TwinError::OptionsParse`] on serialization failure,
    /// [`TwinError::Io`] on write failure.
    pub fn save(&self, path: &Path) -> Result<(), TwinError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TwinError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TwinError::Io)?;
        }
        std::fs::write(path, content).map_err(TwinError::Io)
    }

    /// Catalog source named by these options.
    #[must_use]
    pub fn catalog_source(&self) -> Box<dyn CatalogSource> {
        match &self.catalog.path {
            Some(path) => Box::new(FileCatalog::new(path.clone())),
            None => Box::new(BuiltinCatalog),
        }
    }

    /// Load the catalog named by these options.
    ///
    /// # Errors
    ///
    /// Whatever the configured [`CatalogSource`] reports.
    pub fn load_catalog(&self) -> Result<Catalog, TwinError> {
        self.catalog_source().load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[scene]
mesh_path = "models/wtg04.stl"

[palette.critical]
label = "Crítico"
color = [1.0, 0.0, 0.0]
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.scene.mesh_path, Path::new("models/wtg04.stl"));
        assert_eq!(opts.palette.critical.label, "Crítico");
        // Everything else should be default
        assert_eq!(opts.scene.mesh_scale, 0.08);
        assert_eq!(opts.palette.warning, PaletteOptions::default().warning);
        assert_eq!(opts.camera, CameraOptions::default());
        assert!(opts.catalog.path.is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets/viewer.toml");
        let mut opts = Options::default();
        opts.camera.fovy = 60.0;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
    }

    #[test]
    fn malformed_file_is_an_options_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[camera]\nfovy = \"wide\"\n").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(TwinError::OptionsParse(_))
        ));
    }

    #[test]
    fn default_catalog_is_builtin() {
        let catalog = Options::default().load_catalog().unwrap();
        assert!(catalog.find("torre").is_some());
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("scene"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("palette"));
        assert!(props.contains_key("input"));
        assert!(!props.contains_key("catalog"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("znear").is_none());
    }
}
