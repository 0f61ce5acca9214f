//! Configuration module for the breadcrumb resolver
//!
//! This module provides the home name / delimiter configuration, the
//! settings file that lists naming functions, and loaders for rendering
//! contexts stored as JSON.

use crate::models::RenderContext;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default label of the root crumb
pub const DEFAULT_HOME_NAME: &str = "Home";

/// Default delimiter rendered between crumbs
pub const DEFAULT_DELIMITER: &str = "&raquo;";

/// Context key overriding the root crumb label
pub const HOME_NAME_KEY: &str = "crumb_home_name";

/// Context key overriding the delimiter
pub const DELIMITER_KEY: &str = "crumb_delim";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid context file: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

/// Resolved home name and delimiter for one trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrumbConfig {
    /// Label of the root crumb
    pub home_name: String,

    /// Delimiter between crumbs, trusted and never escaped
    pub delimiter: String,
}

impl Default for CrumbConfig {
    fn default() -> Self {
        Self {
            home_name: DEFAULT_HOME_NAME.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl CrumbConfig {
    /// Create config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root crumb label (builder pattern)
    pub fn with_home_name(mut self, home_name: impl Into<String>) -> Self {
        self.home_name = home_name.into();
        self
    }

    /// Set the delimiter (builder pattern)
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Defaults overridden by whatever the context provides
    pub fn from_context(context: &RenderContext) -> Self {
        Self::default().overlay(context)
    }

    /// Apply context overrides on top of this config.
    ///
    /// Only string values count; anything else leaves the current value.
    pub fn overlay(mut self, context: &RenderContext) -> Self {
        if let Some(home_name) = context.get_str(HOME_NAME_KEY) {
            self.home_name = home_name.to_string();
        }
        if let Some(delimiter) = context.get_str(DELIMITER_KEY) {
            self.delimiter = delimiter.to_string();
        }
        self
    }
}

/// Application settings, usually loaded once at start-up from TOML
///
/// ```toml
/// home_name = "Start"
/// naming_functions = ["page_title"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Root crumb label used when the context does not set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_name: Option<String>,

    /// Delimiter used when the context does not set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,

    /// Names of naming functions, in the order they are tried.
    ///
    /// Kept as a raw value so that a malformed setting is reported when
    /// resolving instead of failing the whole settings file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naming_functions: Option<toml::Value>,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(source)?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Set the naming function names (builder pattern)
    pub fn with_naming_functions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(|name| toml::Value::String(name.into()))
            .collect();
        self.naming_functions = Some(toml::Value::Array(names));
        self
    }

    /// Base crumb config before context overrides
    pub fn crumb_config(&self) -> CrumbConfig {
        let mut config = CrumbConfig::default();
        if let Some(ref home_name) = self.home_name {
            config.home_name = home_name.clone();
        }
        if let Some(ref delimiter) = self.delimiter {
            config.delimiter = delimiter.clone();
        }
        config
    }
}

/// Parse a rendering context from a JSON object
pub fn context_from_json_str(source: &str) -> Result<RenderContext, ConfigError> {
    let value: serde_json::Value = serde_json::from_str(source)?;
    match value {
        serde_json::Value::Object(map) => Ok(RenderContext::from(map)),
        other => Err(ConfigError::InvalidSetting(format!(
            "context must be a JSON object, found {}",
            other
        ))),
    }
}

/// Load a rendering context from a JSON file
pub fn load_context(path: &Path) -> Result<RenderContext, ConfigError> {
    let source = fs::read_to_string(path)?;
    context_from_json_str(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = CrumbConfig::default();
        assert_eq!(config.home_name, "Home");
        assert_eq!(config.delimiter, "&raquo;");
    }

    #[test]
    fn test_config_builder() {
        let config = CrumbConfig::new()
            .with_home_name("Start Here")
            .with_delimiter("|");

        assert_eq!(config.home_name, "Start Here");
        assert_eq!(config.delimiter, "|");
    }

    #[test]
    fn test_config_from_context() {
        let context = RenderContext::new()
            .with(HOME_NAME_KEY, "Start Here")
            .with(DELIMITER_KEY, "<b>|</b>");

        let config = CrumbConfig::from_context(&context);
        assert_eq!(config.home_name, "Start Here");
        assert_eq!(config.delimiter, "<b>|</b>");
    }

    #[test]
    fn test_config_ignores_non_string_context_values() {
        let context = RenderContext::new().with(HOME_NAME_KEY, 12);
        assert_eq!(CrumbConfig::from_context(&context).home_name, "Home");
    }

    #[test]
    fn test_settings_layer_under_context() {
        let settings = Settings::from_toml_str("home_name = \"Index\"\ndelimiter = \"/\"").unwrap();
        let context = RenderContext::new().with(DELIMITER_KEY, ">");

        let config = settings.crumb_config().overlay(&context);
        assert_eq!(config.home_name, "Index");
        assert_eq!(config.delimiter, ">");
    }

    #[test]
    fn test_settings_accept_empty_delimiter() {
        let settings = Settings::from_toml_str("delimiter = \"\"").unwrap();
        assert_eq!(settings.crumb_config().delimiter, "");

        let context = RenderContext::new().with(DELIMITER_KEY, "");
        assert_eq!(CrumbConfig::from_context(&context).delimiter, "");
    }

    #[test]
    fn test_settings_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "naming_functions = [\"page_title\"]").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        let expected = Settings::default().with_naming_functions(["page_title"]);
        assert_eq!(settings, expected);
    }

    #[test]
    fn test_load_context_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"crumb_home_name": "Start", "page": {{"title": "T"}}}}"#).unwrap();

        let context = load_context(file.path()).unwrap();
        assert_eq!(context.get_str("crumb_home_name"), Some("Start"));
        assert!(context.contains_key("page"));
    }

    #[test]
    fn test_context_must_be_object() {
        let result = context_from_json_str("[1, 2]");
        assert!(matches!(result, Err(ConfigError::InvalidSetting(_))));
    }
}
