//! Format selection and conversion.
//!
//! ```text
//! source path ──► Resolver ──► reader ──► Map ──► writer ◄── Resolver ◄── destination path
//!                    │                                          │
//!                    └── no match: default format ──────────────┘
//! ```
//!
//! The [`FormatRegistry`] holds the registered formats in a fixed order.
//! The [`Resolver`] asks them in that order and takes the first that claims
//! a path. The [`Converter`] runs one read and one write, falling back to its
//! default format whenever resolution comes up empty.

mod driver;
mod error;
mod plugin;
mod registry;
mod resolve;

pub use driver::{ConversionReport, Converter, Selection};
pub use error::{ConvertError, PluginLoadError};
pub use plugin::{AliasFormat, ConfigPlugins, PluginSource};
pub use registry::{FormatRegistry, PluginReport};
pub use resolve::Resolver;
