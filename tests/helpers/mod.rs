//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use mapconvert::map::{MapObject, ObjectGroup, Shape, TileLayer, Tileset};
use mapconvert::Map;

/// A small TMX map with an embedded tileset, one tile layer and one object group.
pub const LEVEL_TMX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" renderorder="right-down" width="4" height="3" tilewidth="16" tileheight="16" infinite="0" nextlayerid="3" nextobjectid="3">
 <properties>
  <property name="title" value="First level"/>
  <property name="par" type="int" value="120"/>
 </properties>
 <tileset firstgid="1" name="terrain" tilewidth="16" tileheight="16" tilecount="8" columns="4">
  <image source="terrain.png" width="64" height="32"/>
 </tileset>
 <layer id="1" name="Ground" width="4" height="3">
  <data encoding="csv">
1,1,1,1,
2,0,0,2,
3,3,4,4
</data>
 </layer>
 <objectgroup id="2" name="Spawns">
  <object id="1" name="player" type="spawn" x="16" y="32">
   <point/>
  </object>
  <object id="2" name="exit" x="48" y="16" width="16" height="16"/>
 </objectgroup>
</map>
"#;

/// The model equivalent of [`LEVEL_TMX`].
pub fn level_map() -> Map {
    let spawns = ObjectGroup::new(2, "Spawns")
        .with_object(MapObject::new(1, 16.0, 32.0).with_name("player").with_shape(Shape::Point))
        .with_object(MapObject::new(2, 48.0, 16.0).with_name("exit").with_size(16.0, 16.0));

    let mut map = Map::new(4, 3, 16, 16)
        .with_property("title", "First level")
        .with_property("par", 120i64)
        .with_tileset(Tileset::embedded(1, "terrain", 16, 16).with_image("terrain.png", 64, 32))
        .with_layer(
            TileLayer::new(1, "Ground", 4, 3)
                .with_data(vec![1, 1, 1, 1, 2, 0, 0, 2, 3, 3, 4, 4])
                .into(),
        )
        .with_layer(spawns.into());
    if let Some(mapconvert::map::Layer::Objects(group)) = map.layers.last_mut() {
        group.objects[0].class = "spawn".to_string();
    }
    map
}

/// Write `content` to `dir/name` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    path
}

pub fn read_text(path: &Path) -> String {
    std::fs::read_to_string(path).expect("failed to read output")
}
