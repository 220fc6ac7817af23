use marionette_input::{DEFAULT_STEP, Keymap};
use marionette_kernel::FigureParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config extension {0:?}, expected yaml, yml or json")]
    UnsupportedFormat(String),
}

/// Everything a session can be configured with. Missing fields default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarionetteConfig {
    pub figure: FigureParams,
    pub keymap: Keymap,
    /// Angle (radians) or distance per key press.
    pub step: f32,
}

impl Default for MarionetteConfig {
    fn default() -> Self {
        Self {
            figure: FigureParams::default(),
            keymap: Keymap::default(),
            step: DEFAULT_STEP,
        }
    }
}

impl MarionetteConfig {
    /// Load from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;
        let config = Self::parse(&text, &ext)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse config text in the format named by `ext`.
    pub fn parse(text: &str, ext: &str) -> Result<Self, ConfigError> {
        match ext {
            "yaml" | "yml" => Ok(serde_yaml::from_str(text)?),
            "json" => Ok(serde_json::from_str(text)?),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marionette_input::Action;

    #[test]
    fn empty_yaml_is_default() {
        let c = MarionetteConfig::parse("{}", "yaml").unwrap();
        assert_eq!(c, MarionetteConfig::default());
    }

    #[test]
    fn partial_yaml_overrides() {
        let text = "step: 0.25\nfigure:\n  head_radius: 0.4\nkeymap:\n  j: increase\n";
        let c = MarionetteConfig::parse(text, "yml").unwrap();
        assert_eq!(c.step, 0.25);
        assert_eq!(c.figure.head_radius, 0.4);
        assert_eq!(c.figure.torso_height, 1.5);
        assert_eq!(c.keymap.action_for("j"), Some(Action::Increase));
        assert_eq!(c.keymap.action_for("w"), None);
    }

    #[test]
    fn json_is_accepted() {
        let c = MarionetteConfig::parse(r#"{"step": 0.5}"#, "json").unwrap();
        assert_eq!(c.step, 0.5);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            MarionetteConfig::parse("", "toml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn yaml_dump_parses_back() {
        let c = MarionetteConfig::default();
        let text = c.to_yaml().unwrap();
        assert_eq!(MarionetteConfig::parse(&text, "yaml").unwrap(), c);
    }
}
