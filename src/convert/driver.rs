//! Read one map file and write it back out in another format.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use super::{ConvertError, FormatRegistry, Resolver};
use crate::interchange::{Access, MapFormat, Tmx};
use crate::map::Map;

/// How a format was chosen for one side of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A registered format claimed the path.
    Registered(String),
    /// Nothing claimed the path; the default format was used.
    Default(String),
}

impl Selection {
    pub fn format_name(&self) -> &str {
        match self {
            Self::Registered(name) | Self::Default(name) => name,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

/// Which formats a successful conversion used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub reader: Selection,
    pub writer: Selection,
}

/// Conversion driver.
///
/// Resolves the reader from the source path and the writer from the
/// destination path independently. When no registered format claims a path
/// the default format handles it.
pub struct Converter<'r> {
    resolver: Resolver<'r>,
    default: Arc<dyn MapFormat>,
}

impl<'r> Converter<'r> {
    /// Converter falling back to TMX.
    pub fn new(registry: &'r FormatRegistry) -> Self {
        Self::with_default(registry, Arc::new(Tmx))
    }

    pub fn with_default(registry: &'r FormatRegistry, default: Arc<dyn MapFormat>) -> Self {
        Self {
            resolver: Resolver::new(registry),
            default,
        }
    }

    pub fn default_format(&self) -> &dyn MapFormat {
        self.default.as_ref()
    }

    fn select(&self, path: &Path, access: Access) -> (&dyn MapFormat, Selection) {
        match self.resolver.resolve_for(path, access) {
            Some(format) => (format, Selection::Registered(format.name().to_string())),
            None => {
                debug!(
                    path = %path.display(),
                    format = self.default.name(),
                    "no registered format claims path, using default"
                );
                (
                    self.default.as_ref(),
                    Selection::Default(self.default.name().to_string()),
                )
            }
        }
    }

    /// Read the map at `path` with the format that claims it.
    pub fn read_map(&self, path: &Path) -> Result<(Map, Selection), ConvertError> {
        let (format, selection) = self.select(path, Access::Read);
        info!("reading {} as {}", path.display(), format.name());

        let map = format.read(path).map_err(|source| ConvertError::Read {
            path: path.to_path_buf(),
            format: format.name().to_string(),
            source,
        })?;
        Ok((map, selection))
    }

    /// Write `map` to `path` with the format that claims it.
    pub fn write_map(&self, map: &Map, path: &Path) -> Result<Selection, ConvertError> {
        let (format, selection) = self.select(path, Access::Write);
        info!("writing {} as {}", path.display(), format.name());

        format.write(map, path).map_err(|source| ConvertError::Write {
            path: path.to_path_buf(),
            format: format.name().to_string(),
            source,
        })?;
        Ok(selection)
    }

    /// Convert `source` into `destination`.
    ///
    /// The destination is only touched when the source was read successfully.
    pub fn convert(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<ConversionReport, ConvertError> {
        let (map, reader) = self.read_map(source.as_ref())?;
        let writer = self.write_map(&map, destination.as_ref())?;
        Ok(ConversionReport { reader, writer })
    }
}

impl std::fmt::Debug for Converter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("resolver", &self.resolver)
            .field("default", &self.default.name())
            .finish()
    }
}
