//! Plugin loading and its effect on resolution order.

use std::path::Path;

use mapconvert::convert::{
    ConfigPlugins, Converter, FormatRegistry, PluginLoadError, PluginSource, Resolver, Selection,
};
use mapconvert::interchange::{FormatError, Json, MapFormat};
use mapconvert::{Map, PluginSpec};
use rstest::rstest;
use tempfile::TempDir;

use crate::helpers::{LEVEL_TMX, level_map, write_fixture};

fn spec(name: &str, extensions: &[&str], base: &str) -> PluginSpec {
    PluginSpec {
        name: name.to_string(),
        extensions: extensions.iter().map(|e| e.to_string()).collect(),
        base: base.to_string(),
    }
}

/// Claims every path, including ones without an extension.
struct CatchAll;

impl MapFormat for CatchAll {
    fn name(&self) -> &str {
        "Catch-all"
    }

    fn extensions(&self) -> Vec<&str> {
        vec![]
    }

    fn supports_file(&self, _path: &Path) -> bool {
        true
    }

    fn read(&self, path: &Path) -> Result<Map, FormatError> {
        Json.read(path)
    }

    fn write(&self, map: &Map, path: &Path) -> Result<(), FormatError> {
        Json.write(map, path)
    }
}

struct CatchAllSource;

impl PluginSource for CatchAllSource {
    fn discover(&self) -> Vec<Result<Box<dyn MapFormat>, PluginLoadError>> {
        vec![Ok(Box::new(CatchAll) as Box<dyn MapFormat>)]
    }
}

#[test]
fn test_config_plugin_writes_through_base_codec() {
    let dir = TempDir::new().unwrap();
    let src = write_fixture(dir.path(), "level.tmx", LEVEL_TMX);
    let dst = dir.path().join("world.lvl");

    let mut registry = FormatRegistry::with_builtins();
    let report = registry.load_plugins(&ConfigPlugins::new(vec![spec("Level files", &["lvl"], "json")]));
    assert_eq!(report.loaded, vec!["Level files"]);
    assert!(report.failed.is_empty());

    let report = Converter::new(&registry).convert(&src, &dst).unwrap();

    assert_eq!(report.writer, Selection::Registered("Level files".to_string()));
    assert_eq!(Json.read(&dst).unwrap(), level_map());
}

#[test]
fn test_unknown_base_leaves_registry_unchanged() {
    let mut registry = FormatRegistry::with_builtins();
    let before = registry.names().into_iter().map(str::to_string).collect::<Vec<_>>();

    let report = registry.load_plugins(&ConfigPlugins::new(vec![spec("Lua", &["lua"], "lua")]));

    assert!(report.loaded.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].plugin, "Lua");
    assert_eq!(registry.names(), before);
}

#[test]
fn test_builtins_shadow_plugins_on_shared_extensions() {
    let mut registry = FormatRegistry::with_builtins();
    registry.load_plugins(&ConfigPlugins::new(vec![spec("My JSON", &["json"], "json")]));

    let resolved = Resolver::new(&registry).resolve(Path::new("level.json"));
    assert_eq!(resolved.map(|f| f.name()), Some("Tiled JSON map files"));
}

#[rstest]
#[case("level.tmx")]
#[case("level.unknown")]
#[case("")]
fn test_catch_all_registered_first_claims_everything(#[case] path: &str) {
    let mut registry = FormatRegistry::new();
    registry.load_plugins(&CatchAllSource);
    registry.register(Json);

    let resolved = Resolver::new(&registry).resolve(Path::new(path));
    assert_eq!(resolved.map(|f| f.name()), Some("Catch-all"));
}

#[test]
fn test_catch_all_disables_default_fallback() {
    let dir = TempDir::new().unwrap();
    let src = write_fixture(dir.path(), "level.tmx", LEVEL_TMX);

    let mut registry = FormatRegistry::new();
    registry.load_plugins(&CatchAllSource);

    let err = Converter::new(&registry)
        .convert(&src, dir.path().join("out.json"))
        .unwrap_err();
    assert_eq!(err.format(), "Catch-all");
}
