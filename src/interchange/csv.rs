//! CSV export of tile layers.
//!
//! Write-only: every tile layer is written as rows of comma-separated gids,
//! layers separated by one blank line. Tilesets, objects and properties are
//! dropped.

use std::path::Path;

use super::format::write_file;
use super::{FormatCapability, FormatError, MapFormat};
use crate::map::Map;

/// CSV format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Csv;

impl Csv {
    /// Encode the map's tile layers as CSV.
    pub fn encode(&self, map: &Map) -> Result<Vec<u8>, FormatError> {
        map.validate()?;

        let blocks: Vec<String> = map
            .tile_layers()
            .map(|layer| {
                layer
                    .rows()
                    .map(|row| {
                        let cells: Vec<String> = row.iter().map(u32::to_string).collect();
                        cells.join(",") + "\n"
                    })
                    .collect()
            })
            .collect();

        if blocks.is_empty() {
            return Err(FormatError::unsupported("CSV export needs at least one tile layer"));
        }

        Ok(blocks.join("\n").into_bytes())
    }
}

impl MapFormat for Csv {
    fn name(&self) -> &str {
        "CSV files"
    }

    fn extensions(&self) -> Vec<&str> {
        vec!["csv"]
    }

    fn capabilities(&self) -> FormatCapability {
        FormatCapability::WRITE_ONLY.lossy()
    }

    fn read(&self, path: &Path) -> Result<Map, FormatError> {
        Err(FormatError::unsupported(format!(
            "{} cannot be read: CSV is an export-only format",
            path.display()
        )))
    }

    fn write(&self, map: &Map, path: &Path) -> Result<(), FormatError> {
        write_file(path, &self.encode(map)?)
    }
}
