//! Map file formats.
//!
//! Every format implements [`MapFormat`]: it claims paths by extension and
//! reads/writes whole [`Map`](crate::map::Map)s.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  TMX (XML)   │   │  Tiled JSON  │   │     YAML     │   │  CSV (out)   │
//! └──────┬───────┘   └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!        │                  │                  │                  │
//!        ▼                  ▼                  ▼                  ▼
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                         MapFormat trait                              │
//! │  - supports_file(&Path) -> bool                                      │
//! │  - read(&Path) -> Result<Map>                                        │
//! │  - write(&Map, &Path) -> Result<()>                                  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! TMX is not registered with the [`FormatRegistry`](crate::convert::FormatRegistry);
//! it is the default format the converter falls back to.

mod csv;
mod error;
mod format;
mod json;
mod tmx;
#[cfg(feature = "yaml")]
mod yaml;

use std::sync::Arc;

pub use csv::Csv;
pub use error::FormatError;
pub use format::{Access, FormatCapability, MapFormat, has_extension};
pub use json::Json;
pub use tmx::{TMX_VERSION, Tmx};
#[cfg(feature = "yaml")]
pub use yaml::Yaml;

/// Short keys naming the built-in codecs, as used in configuration files.
pub fn builtin_keys() -> &'static [&'static str] {
    #[cfg(feature = "yaml")]
    {
        &["tmx", "json", "yaml", "csv"]
    }
    #[cfg(not(feature = "yaml"))]
    {
        &["tmx", "json", "csv"]
    }
}

/// Look up a built-in codec by key (case-insensitive).
pub fn builtin(key: &str) -> Option<Arc<dyn MapFormat>> {
    match key.to_ascii_lowercase().as_str() {
        "tmx" => Some(Arc::new(Tmx)),
        "json" => Some(Arc::new(Json)),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Some(Arc::new(Yaml)),
        "csv" => Some(Arc::new(Csv)),
        _ => None,
    }
}
