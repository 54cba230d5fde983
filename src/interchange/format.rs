//! Common trait for map formats.

use std::path::Path;

use super::FormatError;
use crate::map::Map;

/// Capabilities supported by a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatCapability {
    /// Can read/import maps.
    pub read: bool,
    /// Can write/export maps.
    pub write: bool,
    /// Preserves everything the map model holds.
    pub lossless: bool,
}

impl FormatCapability {
    /// Full capability (read, write, lossless).
    pub const FULL: Self = Self {
        read: true,
        write: true,
        lossless: true,
    };

    /// Read-only capability.
    pub const READ_ONLY: Self = Self {
        read: true,
        write: false,
        lossless: true,
    };

    /// Write-only capability.
    pub const WRITE_ONLY: Self = Self {
        read: false,
        write: true,
        lossless: true,
    };

    /// Mark the capability as dropping information.
    pub const fn lossy(self) -> Self {
        Self {
            lossless: false,
            ..self
        }
    }

    /// Whether the requested access is available.
    pub fn allows(self, access: Access) -> bool {
        match access {
            Access::Read => self.read,
            Access::Write => self.write,
        }
    }
}

/// Direction of a format operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Trait for map formats.
///
/// A format is a stateless handler: it decides from a path alone whether it
/// claims a file, and it reads or writes whole maps. The same instance may be
/// used for any number of files.
///
/// ## Contract
///
/// `supports_file` must be a pure function of the path. It must not open the
/// file or depend on mutable state, because the resolver relies on its answer
/// being stable for the lifetime of the process.
pub trait MapFormat: Send + Sync {
    /// Human-readable name of the format.
    fn name(&self) -> &str;

    /// File extension(s) for this format, lowercase, without the dot.
    fn extensions(&self) -> Vec<&str>;

    /// Capabilities of this format implementation.
    fn capabilities(&self) -> FormatCapability {
        FormatCapability::FULL
    }

    /// File dialog style filter, e.g. `Tiled JSON map files (*.json *.tmj)`.
    fn name_filter(&self) -> String {
        let patterns: Vec<String> = self
            .extensions()
            .iter()
            .map(|ext| format!("*.{ext}"))
            .collect();
        format!("{} ({})", self.name(), patterns.join(" "))
    }

    /// Whether this format claims the given path.
    ///
    /// The default compares the path's extension against [`extensions`]
    /// case-insensitively.
    ///
    /// [`extensions`]: MapFormat::extensions
    fn supports_file(&self, path: &Path) -> bool {
        has_extension(path, &self.extensions())
    }

    /// Read a map from `path`.
    fn read(&self, path: &Path) -> Result<Map, FormatError>;

    /// Write `map` to `path`.
    fn write(&self, map: &Map, path: &Path) -> Result<(), FormatError>;
}

/// Case-insensitive extension test.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)))
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, FormatError> {
    Ok(std::fs::read(path)?)
}

/// The id after the largest one in use, for files that omit `next*id`.
pub(crate) fn next_id(max: u32, kind: &str) -> Result<u32, FormatError> {
    max.checked_add(1).ok_or_else(|| {
        FormatError::invalid_attribute(format!("{kind} id {max} leaves no id free for the next {kind}"))
    })
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<(), FormatError> {
    Ok(std::fs::write(path, bytes)?)
}
