//! YAML format support.
//!
//! YAML provides a human-editable rendition of a map. It uses the same
//! structure as Tiled JSON, only in YAML syntax, so a map converts between
//! the two without loss.
//!
//! ## YAML Structure
//!
//! ```yaml
//! type: map
//! version: '1.10'
//! orientation: orthogonal
//! width: 2
//! height: 1
//! tilewidth: 16
//! tileheight: 16
//! layers:
//! - type: tilelayer
//!   id: 1
//!   name: Ground
//!   width: 2
//!   height: 1
//!   data: [1, 2]
//! ```

use std::path::Path;

use super::format::{read_file, write_file};
use super::json::wire;
use super::{FormatCapability, FormatError, MapFormat};
use crate::map::Map;

/// YAML format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl Yaml {
    /// Decode a map from YAML bytes.
    pub fn decode(&self, input: &[u8]) -> Result<Map, FormatError> {
        let content = std::str::from_utf8(input)
            .map_err(|e| FormatError::yaml(format!("Invalid UTF-8: {e}")))?;
        if content.trim().is_empty() {
            return Err(FormatError::yaml("Empty YAML content"));
        }

        let doc: wire::MapDoc = serde_yaml::from_str(content)
            .map_err(|e| FormatError::yaml(format!("YAML parse error: {e}")))?;
        wire::from_doc(doc)
    }

    /// Encode a map as YAML.
    pub fn encode(&self, map: &Map) -> Result<Vec<u8>, FormatError> {
        map.validate()?;
        serde_yaml::to_string(&wire::to_doc(map))
            .map(String::into_bytes)
            .map_err(|e| FormatError::yaml(format!("Serialization error: {e}")))
    }
}

impl MapFormat for Yaml {
    fn name(&self) -> &str {
        "YAML map files"
    }

    fn extensions(&self) -> Vec<&str> {
        vec!["yaml", "yml"]
    }

    fn capabilities(&self) -> FormatCapability {
        FormatCapability::FULL
    }

    fn read(&self, path: &Path) -> Result<Map, FormatError> {
        self.decode(&read_file(path)?)
    }

    fn write(&self, map: &Map, path: &Path) -> Result<(), FormatError> {
        write_file(path, &self.encode(map)?)
    }
}
