//! Shared configuration loader for the regexplore toolchain.
//!
//! `defaults/regexplore.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`RegexploreConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use regexplore_core::matching::{Flags, MatchBudget};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/regexplore.default.toml");

/// Top-level configuration consumed by regexplore applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RegexploreConfig {
    pub matcher: MatcherConfig,
    pub flags: FlagsConfig,
    pub output: OutputConfig,
}

/// Execution bounds for the live matcher.
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfig {
    pub time_limit_ms: u64,
    pub max_matches: usize,
    pub size_limit: usize,
}

impl MatcherConfig {
    pub fn budget(&self) -> MatchBudget {
        MatchBudget::default()
            .with_time_limit(Duration::from_millis(self.time_limit_ms))
            .with_max_matches(self.max_matches)
            .with_size_limit(self.size_limit)
    }
}

/// Default matching flags when the command line names none.
#[derive(Debug, Clone, Deserialize)]
pub struct FlagsConfig {
    pub global: bool,
    pub case_insensitive: bool,
    pub multiline: bool,
    pub dot_all: bool,
}

impl FlagsConfig {
    pub fn flags(&self) -> Flags {
        Flags {
            global: self.global,
            case_insensitive: self.case_insensitive,
            multiline: self.multiline,
            dot_all: self.dot_all,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Layers user files and overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Loader holding only the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file that must exist (an explicit `--config`).
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a TOML file that may be absent, e.g. a per-user default location.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one dotted key such as `matcher.max_matches`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge all layers and deserialize.
    pub fn build(self) -> Result<RegexploreConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in defaults alone.
pub fn load_defaults() -> Result<RegexploreConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.matcher.max_matches, 10_000);
        assert!(config.flags.global);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.matcher.budget(), MatchBudget::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "json")
            .expect("override to apply")
            .set_override("flags.case_insensitive", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.flags.flags(), Flags::parse("gi").unwrap());
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[matcher]\nmax_matches = 5").expect("write user config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.matcher.max_matches, 5);
        assert_eq!(config.matcher.time_limit_ms, 250);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/regexplore.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Text);
    }
}
