//! # mapconvert
//!
//! Convert tile maps between file formats.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! config      → Config file, plugin declarations, default format
//!   ↓
//! convert     → Registry, first-match resolver, conversion driver, plugins
//!   ↓
//! interchange → MapFormat trait and the TMX/JSON/YAML/CSV codecs
//!   ↓
//! map         → Format-agnostic map model
//! ```

/// Format-agnostic map model
pub mod map;

/// Map file formats
pub mod interchange;

/// Format resolution and conversion
pub mod convert;

/// Configuration loading
pub mod config;

pub use config::{Config, ConfigError, PluginSpec};
pub use convert::{
    ConfigPlugins, ConversionReport, ConvertError, Converter, FormatRegistry, PluginLoadError,
    PluginSource, Resolver, Selection,
};
pub use interchange::{FormatError, MapFormat};
pub use map::Map;
