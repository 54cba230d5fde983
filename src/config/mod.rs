//! Converter configuration.
//!
//! ```yaml
//! default_format: tmx
//! plugins:
//!   - name: Level files
//!     extensions: [lvl]
//!     base: json
//! ```
//!
//! The file is looked up in this order: an explicit path, then
//! `$MAPCONVERT_CONFIG`, then [`CONFIG_FILE`] in the working directory
//! (`formatconvert.yaml`, or `formatconvert.json` without the `yaml` feature).
//! No file at all means [`Config::default`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interchange::{self, FormatCapability, MapFormat};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "MAPCONVERT_CONFIG";

/// Config file picked up from the working directory.
#[cfg(feature = "yaml")]
pub const CONFIG_FILE: &str = "formatconvert.yaml";

/// Config file picked up from the working directory.
#[cfg(not(feature = "yaml"))]
pub const CONFIG_FILE: &str = "formatconvert.json";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported config file type: {}", .0.display())]
    Unsupported(PathBuf),

    #[error("default format '{name}' {reason}")]
    UnknownDefaultFormat { name: String, reason: String },
}

/// Plugin format declared in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Key of the built-in codec doing the work.
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key of the built-in codec used when no registered format claims a path.
    pub default_format: String,
    pub plugins: Vec<PluginSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: "tmx".to_string(),
            plugins: Vec::new(),
        }
    }
}

impl Config {
    /// Load a config file, picking the syntax from its extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        if interchange::has_extension(path, &["json"]) {
            return serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()));
        }

        #[cfg(feature = "yaml")]
        if interchange::has_extension(path, &["yaml", "yml"]) {
            if content.trim().is_empty() {
                return Ok(Self::default());
            }
            return serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()));
        }

        Err(ConfigError::Unsupported(path.to_path_buf()))
    }

    /// Find and load the config for this process.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::discover_in(explicit, std::env::var_os(CONFIG_ENV), Path::new("."))
    }

    fn discover_in(
        explicit: Option<&Path>,
        env: Option<OsString>,
        dir: &Path,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = env.filter(|p| !p.is_empty()) {
            return Self::load(Path::new(&path));
        }

        let implicit = dir.join(CONFIG_FILE);
        if implicit.is_file() {
            tracing::debug!(path = %implicit.display(), "using config from working directory");
            return Self::load(&implicit);
        }
        Ok(Self::default())
    }

    /// Resolve [`default_format`](Self::default_format) to a codec.
    ///
    /// The default handles both sides of a conversion, so it must read and
    /// write.
    pub fn default_format(&self) -> Result<Arc<dyn MapFormat>, ConfigError> {
        let format = interchange::builtin(&self.default_format).ok_or_else(|| {
            ConfigError::UnknownDefaultFormat {
                name: self.default_format.clone(),
                reason: format!(
                    "is not a built-in format (expected one of: {})",
                    interchange::builtin_keys().join(", ")
                ),
            }
        })?;

        let caps: FormatCapability = format.capabilities();
        if !(caps.read && caps.write) {
            return Err(ConfigError::UnknownDefaultFormat {
                name: self.default_format.clone(),
                reason: "cannot both read and write".to_string(),
            });
        }
        Ok(format)
    }
}
