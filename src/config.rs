//! Configuration loading for codelang.
//!
//! Settings live in `.codelang.toml`, discovered in the working directory or
//! any of its parents unless a path is passed explicitly.

use crate::linguist::LinguistResolver;
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".codelang.toml";

/// Language normalization strategy applied after resolution.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizeLanguage {
    /// Use the tag exactly as captured from the class name
    #[default]
    Exact,
    /// Resolve aliases using GitHub Linguist data (e.g., "py" -> "python")
    Linguist,
}

impl NormalizeLanguage {
    pub fn apply(&self, language: String) -> String {
        match self {
            Self::Exact => language,
            Self::Linguist => LinguistResolver::new().resolve(&language),
        }
    }
}

/// Represents the complete configuration loaded from `.codelang.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Language normalization strategy (default: exact)
    #[serde(default)]
    pub normalize_language: NormalizeLanguage,

    /// Output format for `scan` (default: text)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// File extensions considered when scanning directories
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "mdx".to_string(), "markdown".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normalize_language: NormalizeLanguage::default(),
            output_format: OutputFormat::default(),
            extensions: default_extensions(),
        }
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file
    #[error("Failed to access config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}

impl Config {
    /// Parse configuration from TOML text. `origin` is only used in errors.
    pub fn from_toml(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("{origin}: {e}")))
    }

    /// Load the explicit config file, or discover one from the current directory.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let cwd = std::env::current_dir().map_err(|e| ConfigError::IoError {
                    source: e,
                    path: ".".to_string(),
                })?;
                Self::discover(&cwd)
            }
        }
    }

    /// Load the nearest config file at or above `start`, or the defaults.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        match find_config_file(start) {
            Some(path) => Self::load_file(&path),
            None => {
                log::debug!("No {CONFIG_FILE_NAME} found above {}, using defaults", start.display());
                Ok(Self::default())
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            source: e,
            path: display.clone(),
        })?;
        log::debug!("Loaded configuration from {display}");
        Self::from_toml(&content, &display)
    }

    /// Whether `path` has one of the configured extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::FileExists {
            path: path.display().to_string(),
        });
    }

    let default_config = r#"# codelang configuration file

# How resolved language tags are normalized:
#   "exact"    - keep the tag as written in the fence (default)
#   "linguist" - map aliases such as "py" or "sh" to canonical names
normalize-language = "exact"

# Output format for `codelang scan`: "text", "json" or "json-lines"
output-format = "text"

# File extensions considered when scanning directories
extensions = ["md", "mdx", "markdown"]
"#;

    fs::write(path, default_config).map_err(|e| ConfigError::IoError {
        source: e,
        path: path.display().to_string(),
    })
}
