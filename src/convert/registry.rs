//! Ordered registry of available map formats.

use std::fmt;
use std::sync::Arc;

use super::PluginLoadError;
use super::plugin::PluginSource;
use crate::interchange::{Csv, Json, MapFormat};

/// Ordered collection of the formats the resolver may pick from.
///
/// Built once at startup: built-in formats first, then whatever a
/// [`PluginSource`] contributes, in discovery order. After that it is only
/// borrowed, so the order seen by every resolution is the same.
///
/// The default format is deliberately not part of the registry.
///
/// # Examples
///
/// ```ignore
/// let mut registry = FormatRegistry::with_builtins();
/// let report = registry.load_plugins(&ConfigPlugins::new(config.plugins));
///
/// for format in registry.handlers() {
///     println!("{}", format.name_filter());
/// }
/// ```
#[derive(Clone, Default)]
pub struct FormatRegistry {
    handlers: Vec<Arc<dyn MapFormat>>,
}

/// Outcome of [`FormatRegistry::load_plugins`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PluginReport {
    /// Names of the plugins that were appended, in order.
    pub loaded: Vec<String>,
    pub failed: Vec<PluginLoadError>,
}

impl FormatRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in formats.
    ///
    /// Order: JSON, YAML (with the `yaml` feature), CSV.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Json);
        #[cfg(feature = "yaml")]
        registry.register(crate::interchange::Yaml);
        registry.register(Csv);
        registry
    }

    /// Append a format. Later formats lose ties against earlier ones.
    pub fn register<F: MapFormat + 'static>(&mut self, format: F) {
        self.handlers.push(Arc::new(format));
    }

    /// Append an already shared format.
    pub fn register_shared(&mut self, format: Arc<dyn MapFormat>) {
        self.handlers.push(format);
    }

    /// Append every plugin the source manages to load.
    ///
    /// Failures are logged and reported but never abort: the plugin simply
    /// does not contribute a format.
    pub fn load_plugins(&mut self, source: &dyn PluginSource) -> PluginReport {
        let mut report = PluginReport::default();
        for discovered in source.discover() {
            match discovered {
                Ok(format) => {
                    tracing::debug!(plugin = format.name(), "registered plugin format");
                    report.loaded.push(format.name().to_string());
                    self.handlers.push(Arc::from(format));
                }
                Err(err) => {
                    tracing::warn!("{err}");
                    report.failed.push(err);
                }
            }
        }
        report
    }

    /// All formats in resolution order.
    pub fn handlers(&self) -> &[Arc<dyn MapFormat>] {
        &self.handlers
    }

    /// Get a format by its exact name.
    pub fn get(&self, name: &str) -> Option<&dyn MapFormat> {
        self.handlers
            .iter()
            .find(|f| f.name() == name)
            .map(|f| f.as_ref())
    }

    /// Format names in resolution order.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interchange::FormatError;
    use crate::map::Map;
    use std::path::Path;

    struct TestFormat(&'static str);

    impl MapFormat for TestFormat {
        fn name(&self) -> &str {
            self.0
        }

        fn extensions(&self) -> Vec<&str> {
            vec!["test"]
        }

        fn read(&self, _path: &Path) -> Result<Map, FormatError> {
            Ok(Map::new(1, 1, 1, 1))
        }

        fn write(&self, _map: &Map, _path: &Path) -> Result<(), FormatError> {
            Ok(())
        }
    }

    struct FixedSource(Vec<Result<&'static str, &'static str>>);

    impl PluginSource for FixedSource {
        fn discover(&self) -> Vec<Result<Box<dyn MapFormat>, PluginLoadError>> {
            self.0
                .iter()
                .map(|entry| match entry {
                    Ok(name) => Ok(Box::new(TestFormat(name)) as Box<dyn MapFormat>),
                    Err(name) => Err(PluginLoadError::new(*name, "broken")),
                })
                .collect()
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register_keeps_order() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat("b"));
        registry.register(TestFormat("a"));
        registry.register(TestFormat("c"));

        assert_eq!(registry.names(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_registry_get() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat("test"));

        assert_eq!(registry.get("test").map(|f| f.name()), Some("test"));
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_registry_with_builtins() {
        let registry = FormatRegistry::with_builtins();
        assert_eq!(registry.names().first(), Some(&"Tiled JSON map files"));
        assert_eq!(registry.names().last(), Some(&"CSV files"));
        assert!(registry.get("Tiled map files").is_none(), "TMX is the default, not registered");
    }

    #[test]
    fn test_load_plugins_appends_after_builtins() {
        let mut registry = FormatRegistry::with_builtins();
        let builtins = registry.len();

        let report = registry.load_plugins(&FixedSource(vec![Ok("first"), Err("bad"), Ok("second")]));

        assert_eq!(report.loaded, vec!["first", "second"]);
        assert_eq!(report.failed, vec![PluginLoadError::new("bad", "broken")]);
        assert_eq!(registry.len(), builtins + 2);
        assert_eq!(&registry.names()[builtins..], &["first", "second"]);
    }

    #[test]
    fn test_handlers_stable_across_calls() {
        let registry = FormatRegistry::with_builtins();
        let first: Vec<_> = registry.handlers().iter().map(|f| f.name().to_string()).collect();
        let second: Vec<_> = registry.handlers().iter().map(|f| f.name().to_string()).collect();
        assert_eq!(first, second);
    }
}
