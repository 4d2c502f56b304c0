//! Shared configuration loader for nyanplate.
//!
//! `defaults/nyanplate.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`NyanConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/nyanplate.default.toml");

/// Top-level configuration consumed by nyanplate applications.
#[derive(Debug, Clone, Deserialize)]
pub struct NyanConfig {
    #[serde(default)]
    pub render: RenderConfig,
    pub extract: ExtractConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Template rendered when a request names none
    #[serde(default)]
    pub default_template: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    pub format: ExtractFormat,
    pub pretty: bool,
}

/// Serialization used for extracted contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractFormat {
    Json,
    Yaml,
}

impl ExtractFormat {
    pub fn name(self) -> &'static str {
        match self {
            ExtractFormat::Json => "json",
            ExtractFormat::Yaml => "yaml",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<NyanConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<NyanConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.render.default_template, None);
        assert_eq!(config.extract.format, ExtractFormat::Json);
        assert!(config.extract.pretty);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("extract.format", "yaml")
            .expect("override to apply")
            .set_override("render.default_template", "page.html")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.extract.format, ExtractFormat::Yaml);
        assert_eq!(config.render.default_template.as_deref(), Some("page.html"));
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[extract]\npretty = false\n[log]\nlevel = \"debug\"").expect("write");

        let config = Loader::new().with_file(file.path()).build().expect("config to build");

        assert!(!config.extract.pretty);
        assert_eq!(config.extract.format, ExtractFormat::Json);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("definitely/not/here.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::new()
            .set_override("extract.format", "xml")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
