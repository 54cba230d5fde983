//! Path to format resolution.

use std::path::Path;

use tracing::debug;

use super::FormatRegistry;
use crate::interchange::{Access, MapFormat};

/// Picks the format that claims a path.
///
/// Formats are asked in registry order and the first one whose
/// `supports_file` answers true wins. Later formats are not consulted, so a
/// catch-all registered early shadows everything after it.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r FormatRegistry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r FormatRegistry) -> Self {
        Self { registry }
    }

    /// First format in registry order that claims `path`.
    pub fn resolve(&self, path: &Path) -> Option<&'r dyn MapFormat> {
        self.first_match(path, None)
    }

    /// Like [`resolve`](Self::resolve), skipping formats that cannot
    /// perform `access`.
    pub fn resolve_for(&self, path: &Path, access: Access) -> Option<&'r dyn MapFormat> {
        self.first_match(path, Some(access))
    }

    fn first_match(&self, path: &Path, access: Option<Access>) -> Option<&'r dyn MapFormat> {
        self.registry
            .handlers()
            .iter()
            .map(|format| format.as_ref())
            .filter(|format| access.is_none_or(|a| format.capabilities().allows(a)))
            .find(|format| {
                let supported = format.supports_file(path);
                debug!(
                    format = %format.name_filter(),
                    path = %path.display(),
                    supported,
                    "checking format"
                );
                supported
            })
    }
}
