//! View-manager options with TOML preset support.
//!
//! Startup/fallback view types, copy naming, and the initial camera
//! parameters handed to new controllers. Options serialize to/from TOML so a
//! host application can keep them alongside its own configuration.

mod camera;
mod views;

use std::path::Path;

pub use camera::CameraOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use views::ViewOptions;

use crate::error::VistaError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[views]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Startup, fallback and copy-naming policy.
    pub views: ViewOptions,
    /// Initial camera parameters for new controllers.
    pub camera: CameraOptions,
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
    /// [`VistaError::Io`] if the file cannot be read, or
    /// [`VistaError::OptionsParse`] if it is not valid options TOML (for
    /// example a `[views]` entry that is not a string). Unknown view type
    /// names are not rejected here; [`crate::ViewManager::new`] validates
    /// the fallback type.
    pub fn load(path: &Path) -> Result<Self, VistaError> {
        let content = std::fs::read_to_string(path).map_err(VistaError::Io)?;
        toml::from_str(&content)
            .map_err(|e| VistaError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// [`VistaError::OptionsParse`] if serialization fails, or
    /// [`VistaError::Io`] if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), VistaError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VistaError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VistaError::Io)?;
        }
        std::fs::write(path, content).map_err(VistaError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
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
[views]
initial_type = "FPS"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.views.initial_type, "FPS");
        // Everything else should be default
        assert_eq!(opts.views.default_type, "Orbit");
        assert_eq!(opts.views.copy_prefix, "Copy of ");
        assert_eq!(opts.camera.fovy, 45.0);
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = std::env::temp_dir()
            .join(format!("vista-options-{}", std::process::id()));
        let path = dir.join("presets").join("ortho.toml");
        let mut opts = Options::default();
        opts.views.initial_type = "TopDownOrtho".into();
        opts.camera.ortho_scale = 42.0;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(
            Options::list_presets(&dir.join("presets")),
            vec!["ortho".to_owned()]
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn malformed_views_section_is_parse_error() {
        let dir = std::env::temp_dir()
            .join(format!("vista-bad-options-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[views]\ninitial_type = 3\n").unwrap();
        let err = Options::load(&path).unwrap_err();
        assert!(matches!(err, VistaError::OptionsParse(_)));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Options::load(Path::new("/nonexistent/vista.toml"))
            .unwrap_err();
        assert!(matches!(err, VistaError::Io(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("views"));
        assert!(props.contains_key("camera"));

        let views = &props["views"]["properties"];
        assert!(views.get("initial_type").is_some());
        assert!(views.get("default_type").is_some());
        assert!(views.get("copy_prefix").is_none());
    }
}
