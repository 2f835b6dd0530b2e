//! Centralized camera options with TOML preset support.
//!
//! Follow, fly-by and projection settings are consolidated here. Options
//! serialize to/from TOML so camera rigs can be tuned without rebuilding.

mod flyby;
mod follow;
mod projection;

use std::path::Path;

pub use flyby::{FlybyCompletion, FlybyOptions};
pub use follow::FollowOptions;
pub use projection::ProjectionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CameraError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[follow]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Entity-follow parameters.
    pub follow: FollowOptions,
    /// Fly-by playback parameters.
    pub flyby: FlybyOptions,
    /// Projection parameters.
    pub projection: ProjectionOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`CameraError::OptionsParse`] for malformed TOML,
    /// [`CameraError::InvalidArgument`] for values that fail
    /// [`Options::validate`].
    pub fn from_toml(content: &str) -> Result<Self, CameraError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| CameraError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check every section holds usable values.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidArgument`] naming the first bad value.
    pub fn validate(&self) -> Result<(), CameraError> {
        self.follow.validate()?;
        self.projection.validate()
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`CameraError::Io`] if the file cannot be read, otherwise as
    /// [`Options::from_toml`].
    pub fn load(path: &Path) -> Result<Self, CameraError> {
        let content = std::fs::read_to_string(path).map_err(CameraError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`CameraError::Io`] on write failure.
    pub fn save(&self, path: &Path) -> Result<(), CameraError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CameraError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CameraError::Io)?;
        }
        std::fs::write(path, content).map_err(CameraError::Io)
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
    use crate::animation::EasingFunction;

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
[follow]
smoothing_factor = 0.2

[flyby]
easing = "smooth_step"
on_finish = "idle"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.follow.smoothing_factor, 0.2);
        // Everything else should be default
        assert_eq!(opts.follow.follow_distance, 12.0);
        assert!(opts.follow.collision_enabled);
        assert_eq!(opts.flyby.easing, EasingFunction::SmoothStep);
        assert_eq!(opts.flyby.on_finish, FlybyCompletion::Idle);
        assert_eq!(opts.projection, ProjectionOptions::default());
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = Options::from_toml("[follow]\nsmoothing_factor = \"fast\"")
            .unwrap_err();
        assert!(matches!(err, CameraError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("cinecam-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.follow.vertical_offset = 4.5;
        opts.save(&dir.join("high.toml")).unwrap();
        Options::default().save(&dir.join("default.toml")).unwrap();

        let loaded = Options::load(&dir.join("high.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["default", "high"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Options::load(Path::new("/nonexistent/cinecam.toml"))
            .unwrap_err();
        assert!(matches!(err, CameraError::Io(_)));
    }

    #[test]
    fn out_of_range_follow_values_rejected() {
        for bad in [
            "[follow]\nsmoothing_factor = 1.0",
            "[follow]\nsmoothing_factor = 1.5",
            "[follow]\nsmoothing_factor = -0.1",
            "[follow]\nsmoothing_factor = nan",
            "[follow]\ncollision_margin = -2.0",
            "[follow]\nfollow_distance = -1.0",
            "[follow]\nlook_height = inf",
            "[follow]\noffset = [0.0, nan, 0.0]",
            "[projection]\nznear = 0.0",
        ] {
            assert!(
                matches!(
                    Options::from_toml(bad),
                    Err(CameraError::InvalidArgument(_))
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn defaults_are_valid() {
        Options::default().validate().unwrap();
        let mut opts = Options::default();
        opts.follow.smoothing_factor = 0.0;
        opts.follow.collision_margin = 0.0;
        opts.validate().unwrap();
    }

    #[test]
    fn pitch_limits_are_ordered_radians() {
        let mut follow = FollowOptions::default();
        follow.min_pitch_deg = 30.0;
        follow.max_pitch_deg = -30.0;
        let (lo, hi) = follow.pitch_limits();
        assert!(lo < hi);
        assert!((hi - 30f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("follow"));
        assert!(props.contains_key("flyby"));
        assert!(props.contains_key("projection"));

        // Exposed fields present, skipped ones absent
        let follow = &props["follow"]["properties"];
        assert!(follow.get("smoothing_factor").is_some());
        assert!(follow.get("collision_enabled").is_some());
        assert!(follow.get("offset").is_none());
        assert!(follow.get("collision_margin").is_none());
    }
}
