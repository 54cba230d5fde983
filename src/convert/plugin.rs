//! Plugin discovery.
//!
//! A [`PluginSource`] yields formats to append to the registry. The shipped
//! source is [`ConfigPlugins`], which turns configuration entries into
//! [`AliasFormat`]s: a new name and extension list delegating to one of the
//! built-in codecs.

use std::path::Path;
use std::sync::Arc;

use super::PluginLoadError;
use crate::config::PluginSpec;
use crate::interchange::{self, FormatCapability, FormatError, MapFormat};
use crate::map::Map;

/// Something that can produce plugin formats.
pub trait PluginSource {
    /// Discover plugins in a stable order.
    ///
    /// Each entry is either a ready format or the reason that plugin could
    /// not be loaded.
    fn discover(&self) -> Vec<Result<Box<dyn MapFormat>, PluginLoadError>>;
}

/// A format reusing another codec under a different name and extensions.
pub struct AliasFormat {
    name: String,
    extensions: Vec<String>,
    base: Arc<dyn MapFormat>,
}

impl AliasFormat {
    /// Extensions are normalized to lowercase without a leading dot.
    pub fn new(
        name: impl Into<String>,
        extensions: impl IntoIterator<Item = impl AsRef<str>>,
        base: Arc<dyn MapFormat>,
    ) -> Self {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self {
            name: name.into(),
            extensions,
            base,
        }
    }

    /// The codec doing the work.
    pub fn base(&self) -> &dyn MapFormat {
        self.base.as_ref()
    }
}

impl MapFormat for AliasFormat {
    fn name(&self) -> &str {
        &self.name
    }

    fn extensions(&self) -> Vec<&str> {
        self.extensions.iter().map(String::as_str).collect()
    }

    fn capabilities(&self) -> FormatCapability {
        self.base.capabilities()
    }

    fn read(&self, path: &Path) -> Result<Map, FormatError> {
        self.base.read(path)
    }

    fn write(&self, map: &Map, path: &Path) -> Result<(), FormatError> {
        self.base.write(map, path)
    }
}

impl std::fmt::Debug for AliasFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliasFormat")
            .field("name", &self.name)
            .field("extensions", &self.extensions)
            .field("base", &self.base.name())
            .finish()
    }
}

/// Plugins declared in the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigPlugins {
    specs: Vec<PluginSpec>,
}

impl ConfigPlugins {
    pub fn new(specs: Vec<PluginSpec>) -> Self {
        Self { specs }
    }

    fn load(spec: &PluginSpec) -> Result<Box<dyn MapFormat>, PluginLoadError> {
        let plugin = spec.name.trim();
        if plugin.is_empty() {
            return Err(PluginLoadError::new("<unnamed>", "plugin name is empty"));
        }

        let base = interchange::builtin(&spec.base).ok_or_else(|| {
            PluginLoadError::new(
                plugin,
                format!(
                    "unknown base format '{}' (expected one of: {})",
                    spec.base,
                    interchange::builtin_keys().join(", ")
                ),
            )
        })?;

        let alias = AliasFormat::new(plugin, &spec.extensions, base);
        if alias.extensions.is_empty() {
            return Err(PluginLoadError::new(plugin, "no file extensions declared"));
        }

        Ok(Box::new(alias))
    }
}

impl PluginSource for ConfigPlugins {
    fn discover(&self) -> Vec<Result<Box<dyn MapFormat>, PluginLoadError>> {
        self.specs.iter().map(Self::load).collect()
    }
}
