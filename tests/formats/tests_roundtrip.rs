//! write → read → write through each lossless codec.

use std::sync::Arc;

use mapconvert::interchange::{self, MapFormat};
use rstest::rstest;
use tempfile::TempDir;

use crate::helpers::level_map;

#[rstest]
#[case("tmx", "level.tmx")]
#[case("json", "level.json")]
fn test_roundtrip_is_byte_stable(#[case] key: &str, #[case] file: &str) {
    assert_roundtrip(key, file);
}

#[cfg(feature = "yaml")]
#[test]
fn test_yaml_roundtrip_is_byte_stable() {
    assert_roundtrip("yaml", "level.yml");
}

fn assert_roundtrip(key: &str, file: &str) {
    let format: Arc<dyn MapFormat> = interchange::builtin(key).expect("unknown codec");
    assert!(format.capabilities().lossless);

    let dir = TempDir::new().unwrap();
    let first = dir.path().join(file);
    let second = dir.path().join(format!("again-{file}"));

    format.write(&level_map(), &first).expect("first write failed");
    let reread = format.read(&first).expect("read failed");
    assert_eq!(reread, level_map());

    format.write(&reread, &second).expect("second write failed");
    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn test_csv_is_lossy_and_export_only() {
    let csv = interchange::builtin("csv").unwrap();
    let caps = csv.capabilities();
    assert!(caps.write);
    assert!(!caps.read);
    assert!(!caps.lossless);
}

#[test]
fn test_invalid_map_is_rejected_before_writing() {
    let mut map = level_map();
    map.tilesets[0].first_gid = 0;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    let json = interchange::builtin("json").unwrap();

    assert!(json.write(&map, &path).is_err());
    assert!(!path.exists());
}
