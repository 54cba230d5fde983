//! End-to-end conversions through the registry, resolver and driver.

use mapconvert::convert::{ConvertError, Converter, FormatRegistry, Selection};
use mapconvert::interchange::{FormatError, Json, MapFormat, Tmx};
use tempfile::TempDir;

use crate::helpers::{LEVEL_TMX, level_map, read_text, write_fixture};

fn json_only() -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(Json);
    registry
}

#[test]
fn test_tmx_to_json_with_json_only_registry() {
    let dir = TempDir::new().unwrap();
    let src = write_fixture(dir.path(), "level.tmx", LEVEL_TMX);
    let dst = dir.path().join("level.json");

    let registry = json_only();
    let report = Converter::new(&registry).convert(&src, &dst).expect("conversion failed");

    assert_eq!(report.reader, Selection::Default("Tiled map files".to_string()));
    assert_eq!(report.writer, Selection::Registered("Tiled JSON map files".to_string()));

    let json: serde_json::Value = serde_json::from_str(&read_text(&dst)).unwrap();
    assert_eq!(json["type"], "map");
    assert_eq!(json["layers"][0]["data"][4], 2);
    assert_eq!(Json.read(&dst).unwrap(), level_map());
}

#[test]
fn test_unknown_extension_with_empty_registry() {
    let dir = TempDir::new().unwrap();
    let src = write_fixture(dir.path(), "level.unknown", LEVEL_TMX);
    let dst = dir.path().join("copy.unknown");

    let registry = FormatRegistry::new();
    let report = Converter::new(&registry).convert(&src, &dst).unwrap();

    assert!(report.reader.is_default());
    assert!(report.writer.is_default());
    assert!(read_text(&dst).starts_with("<?xml"));
    assert_eq!(Tmx.read(&dst).unwrap(), level_map());
}

#[test]
fn test_missing_source_does_not_create_destination() {
    let dir = TempDir::new().unwrap();
    let dst = dir.path().join("level.json");

    let registry = FormatRegistry::with_builtins();
    let err = Converter::new(&registry)
        .convert(dir.path().join("does-not-exist.tmx"), &dst)
        .unwrap_err();

    match &err {
        ConvertError::Read { format, source, .. } => {
            assert_eq!(format, "Tiled map files");
            assert!(matches!(source, FormatError::Io(_)));
        }
        other => panic!("expected a read error, got {other:?}"),
    }
    assert!(!dst.exists());
}

#[test]
fn test_tmx_to_tmx_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let src = write_fixture(dir.path(), "level.tmx", LEVEL_TMX);
    let once = dir.path().join("once.tmx");
    let twice = dir.path().join("twice.tmx");

    let registry = FormatRegistry::with_builtins();
    let converter = Converter::new(&registry);
    converter.convert(&src, &once).unwrap();
    converter.convert(&once, &twice).unwrap();

    assert_eq!(Tmx.read(&once).unwrap(), Tmx.read(&src).unwrap());
    assert_eq!(read_text(&once), read_text(&twice));
}

#[test]
fn test_json_roundtrip_through_driver_is_byte_stable() {
    let dir = TempDir::new().unwrap();
    let src = write_fixture(dir.path(), "level.tmx", LEVEL_TMX);
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    let registry = FormatRegistry::with_builtins();
    let converter = Converter::new(&registry);
    converter.convert(&src, &first).unwrap();
    converter.convert(&first, &second).unwrap();

    assert_eq!(read_text(&first), read_text(&second));
}

#[test]
fn test_csv_source_is_never_read_as_csv() {
    let dir = TempDir::new().unwrap();
    let src = write_fixture(dir.path(), "level.csv", "1,2\n3,4\n");

    let registry = FormatRegistry::with_builtins();
    let err = Converter::new(&registry)
        .convert(&src, dir.path().join("level.json"))
        .unwrap_err();

    assert_eq!(err.stage(), "read");
    assert_eq!(err.format(), "Tiled map files");
}

#[test]
fn test_tmx_to_csv_export() {
    let dir = TempDir::new().unwrap();
    let src = write_fixture(dir.path(), "level.tmx", LEVEL_TMX);
    let dst = dir.path().join("level.csv");

    let registry = FormatRegistry::with_builtins();
    let report = Converter::new(&registry).convert(&src, &dst).unwrap();

    assert_eq!(report.writer.format_name(), "CSV files");
    assert_eq!(read_text(&dst), "1,1,1,1\n2,0,0,2\n3,3,4,4\n");
}

#[cfg(feature = "yaml")]
#[test]
fn test_json_yaml_json_preserves_model() {
    let dir = TempDir::new().unwrap();
    let src = write_fixture(dir.path(), "level.tmx", LEVEL_TMX);
    let json = dir.path().join("level.json");
    let yaml = dir.path().join("level.yaml");
    let back = dir.path().join("back.json");

    let registry = FormatRegistry::with_builtins();
    let converter = Converter::new(&registry);
    converter.convert(&src, &json).unwrap();
    let report = converter.convert(&json, &yaml).unwrap();
    assert_eq!(report.writer.format_name(), "YAML map files");
    converter.convert(&yaml, &back).unwrap();

    assert_eq!(read_text(&json), read_text(&back));
}

#[test]
fn test_json_default_format() {
    let dir = TempDir::new().unwrap();
    let src = write_fixture(dir.path(), "level.tmx", LEVEL_TMX);
    let tmp = dir.path().join("level.dat");

    let registry = FormatRegistry::new();
    let tmx_default = Converter::new(&registry);
    let json_default = Converter::with_default(&registry, std::sync::Arc::new(Json));

    let (map, reader) = tmx_default.read_map(&src).unwrap();
    assert!(reader.is_default());
    let selection = json_default.write_map(&map, &tmp).unwrap();

    assert_eq!(selection, Selection::Default("Tiled JSON map files".to_string()));
    assert_eq!(Json.read(&tmp).unwrap(), level_map());
}
