//! Reader Configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How the required-field check decides a control is empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredPolicy {
    /// Only the raw `value` is inspected, for every control kind.
    ///
    /// A required radio or checkbox reads as `"on"` (or its `value`
    /// attribute) and so never fails this check.
    #[default]
    RawValue,
    /// Constraint-validation rules: checkedness for checkboxes, a checked
    /// group member for radios, a selection for selects, a file for file
    /// inputs.
    ControlAware,
}

/// Per-reader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Tag names or `type` values that are never extracted
    pub excluded: Vec<String>,

    /// Value shown for fields without a value
    pub empty_placeholder: String,

    /// Prefix for generated names of unnamed fields
    pub unnamed_prefix: String,

    /// HTML written instead of the summary when a required field is empty
    pub required_message: String,

    /// Required-field check rules
    pub required_policy: RequiredPolicy,

    /// HTML-escape names and values before rendering
    pub escape_values: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            excluded: vec!["button".into(), "reset".into(), "submit".into()],
            empty_placeholder: "Unknown".into(),
            unnamed_prefix: "no_name_element_".into(),
            required_message:
                "<span class=\"form-error\">Please fill in all required fields!</span>".into(),
            required_policy: RequiredPolicy::RawValue,
            escape_values: false,
        }
    }
}

/// Page-level bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Which containers get a reader
    pub form_selector: String,
    /// Which descendants count as inputs
    pub input_selector: String,
    /// Element id of the trigger control
    pub trigger_id: String,
    /// Element id of the output container
    pub output_id: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            form_selector: "form".into(),
            input_selector: "input, select, textarea".into(),
            trigger_id: "submit".into(),
            output_id: "output".into(),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reader: ReaderConfig,
    pub bootstrap: BootstrapConfig,
}

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

impl Config {
    /// Parse a JSON configuration; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_json_str(&json)
    }
}
