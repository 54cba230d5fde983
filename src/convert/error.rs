//! Error types for conversion and plugin loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::interchange::FormatError;

/// A conversion that could not complete.
///
/// Resolution misses never show up here: they are recovered by falling
/// back to the default format. Only a failing read or write aborts.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The selected format could not read the source file.
    #[error("failed to read {} as {format}: {source}", .path.display())]
    Read {
        path: PathBuf,
        format: String,
        #[source]
        source: FormatError,
    },

    /// The selected format could not write the destination file.
    #[error("failed to write {} as {format}: {source}", .path.display())]
    Write {
        path: PathBuf,
        format: String,
        #[source]
        source: FormatError,
    },
}

impl ConvertError {
    /// `"read"` or `"write"`.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Write { .. } => "write",
        }
    }

    /// The file the failing stage operated on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }

    /// Name of the format that attempted the operation.
    pub fn format(&self) -> &str {
        match self {
            Self::Read { format, .. } | Self::Write { format, .. } => format,
        }
    }
}

/// A discovered plugin that could not be turned into a format.
///
/// Never fatal: the plugin is left out of the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("plugin '{plugin}' failed to load: {reason}")]
pub struct PluginLoadError {
    pub plugin: String,
    pub reason: String,
}

impl PluginLoadError {
    pub fn new(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }
}
