//! Tiled JSON map format support.
//!
//! This is the layout Tiled itself exports to `*.json` / `*.tmj`. The wire
//! structs in [`wire`] are shared with the YAML format, which writes the very
//! same structure in YAML syntax.
//!
//! ## JSON Structure
//!
//! ```json
//! {
//!   "type": "map",
//!   "version": "1.10",
//!   "orientation": "orthogonal",
//!   "width": 2, "height": 1, "tilewidth": 16, "tileheight": 16,
//!   "tilesets": [{ "firstgid": 1, "source": "terrain.tsx" }],
//!   "layers": [
//!     { "type": "tilelayer", "id": 1, "name": "Ground", "width": 2, "height": 1, "data": [1, 2] },
//!     { "type": "objectgroup", "id": 2, "name": "Spawns", "objects": [] }
//!   ],
//!   "properties": [{ "name": "music", "type": "file", "value": "level1.ogg" }]
//! }
//! ```

use std::path::Path;

use super::format::{read_file, write_file};
use super::{FormatCapability, FormatError, MapFormat};
use crate::map::Map;

/// Tiled JSON format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Json {
    /// Decode a map from Tiled JSON bytes.
    pub fn decode(&self, input: &[u8]) -> Result<Map, FormatError> {
        let doc: wire::MapDoc = serde_json::from_slice(input)
            .map_err(|e| FormatError::json(format!("Parse error: {e}")))?;
        wire::from_doc(doc)
    }

    /// Encode a map as pretty-printed Tiled JSON.
    pub fn encode(&self, map: &Map) -> Result<Vec<u8>, FormatError> {
        map.validate()?;
        let mut output = serde_json::to_vec_pretty(&wire::to_doc(map))
            .map_err(|e| FormatError::json(format!("Serialization error: {e}")))?;
        output.push(b'\n');
        Ok(output)
    }
}

impl MapFormat for Json {
    fn name(&self) -> &str {
        "Tiled JSON map files"
    }

    fn extensions(&self) -> Vec<&str> {
        vec!["json", "tmj"]
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

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// Serde mirror of the Tiled JSON layout and its conversion to [`Map`].
pub(crate) mod wire {
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    use super::super::format::next_id;
    use super::super::tmx::TMX_VERSION;
    use crate::interchange::FormatError;
    use crate::map::{
        Image, Layer, Map, MapObject, ObjectGroup, Orientation, Point, Properties,
        PropertyValue, RenderOrder, Shape, TileLayer, Tileset,
    };

    fn map_type() -> String {
        "map".to_string()
    }

    fn orthogonal() -> String {
        Orientation::Orthogonal.as_str().to_string()
    }

    fn right_down() -> String {
        RenderOrder::RightDown.as_str().to_string()
    }

    fn string_type() -> String {
        "string".to_string()
    }

    fn yes() -> bool {
        true
    }

    fn one() -> f64 {
        1.0
    }

    fn is_zero(v: &u32) -> bool {
        *v == 0
    }

    fn is_zero_f64(v: &f64) -> bool {
        *v == 0.0
    }

    fn is_false(v: &bool) -> bool {
        !*v
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MapDoc {
        #[serde(rename = "type", default = "map_type")]
        pub kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub version: Option<Value>,
        #[serde(default = "orthogonal")]
        pub orientation: String,
        #[serde(rename = "renderorder", default = "right_down")]
        pub render_order: String,
        pub width: u32,
        pub height: u32,
        #[serde(rename = "tilewidth")]
        pub tile_width: u32,
        #[serde(rename = "tileheight")]
        pub tile_height: u32,
        #[serde(default)]
        pub infinite: bool,
        #[serde(rename = "backgroundcolor", default, skip_serializing_if = "Option::is_none")]
        pub background_color: Option<String>,
        #[serde(rename = "nextlayerid", default)]
        pub next_layer_id: u32,
        #[serde(rename = "nextobjectid", default)]
        pub next_object_id: u32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub properties: Vec<PropertyDoc>,
        #[serde(default)]
        pub tilesets: Vec<TilesetDoc>,
        #[serde(default)]
        pub layers: Vec<LayerDoc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PropertyDoc {
        pub name: String,
        #[serde(rename = "type", default = "string_type")]
        pub kind: String,
        pub value: Value,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TilesetDoc {
        #[serde(rename = "firstgid")]
        pub first_gid: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub source: Option<String>,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        pub name: String,
        #[serde(rename = "tilewidth", default, skip_serializing_if = "is_zero")]
        pub tile_width: u32,
        #[serde(rename = "tileheight", default, skip_serializing_if = "is_zero")]
        pub tile_height: u32,
        #[serde(rename = "tilecount", default, skip_serializing_if = "is_zero")]
        pub tile_count: u32,
        #[serde(default, skip_serializing_if = "is_zero")]
        pub columns: u32,
        #[serde(default, skip_serializing_if = "is_zero")]
        pub spacing: u32,
        #[serde(default, skip_serializing_if = "is_zero")]
        pub margin: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub image: Option<String>,
        #[serde(rename = "imagewidth", default, skip_serializing_if = "is_zero")]
        pub image_width: u32,
        #[serde(rename = "imageheight", default, skip_serializing_if = "is_zero")]
        pub image_height: u32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub properties: Vec<PropertyDoc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "type")]
    pub enum LayerDoc {
        #[serde(rename = "tilelayer")]
        Tiles(TileLayerDoc),
        #[serde(rename = "objectgroup")]
        Objects(ObjectGroupDoc),
    }

    /// Tile layer payload: a plain gid array, or an encoded string we refuse.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum TileData {
        Gids(Vec<u32>),
        Encoded(String),
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TileLayerDoc {
        #[serde(default)]
        pub id: u32,
        #[serde(default)]
        pub name: String,
        pub width: u32,
        pub height: u32,
        #[serde(default)]
        pub x: i32,
        #[serde(default)]
        pub y: i32,
        #[serde(default = "yes")]
        pub visible: bool,
        #[serde(default = "one")]
        pub opacity: f64,
        #[serde(rename = "offsetx", default, skip_serializing_if = "is_zero_f64")]
        pub offset_x: f64,
        #[serde(rename = "offsety", default, skip_serializing_if = "is_zero_f64")]
        pub offset_y: f64,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub properties: Vec<PropertyDoc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub data: Option<TileData>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ObjectGroupDoc {
        #[serde(default)]
        pub id: u32,
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub x: i32,
        #[serde(default)]
        pub y: i32,
        #[serde(default = "yes")]
        pub visible: bool,
        #[serde(default = "one")]
        pub opacity: f64,
        #[serde(rename = "offsetx", default, skip_serializing_if = "is_zero_f64")]
        pub offset_x: f64,
        #[serde(rename = "offsety", default, skip_serializing_if = "is_zero_f64")]
        pub offset_y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub color: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub properties: Vec<PropertyDoc>,
        #[serde(default)]
        pub objects: Vec<ObjectDoc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ObjectDoc {
        #[serde(default)]
        pub id: u32,
        #[serde(default)]
        pub name: String,
        #[serde(rename = "type", alias = "class", default)]
        pub class: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub gid: Option<u32>,
        #[serde(default)]
        pub x: f64,
        #[serde(default)]
        pub y: f64,
        #[serde(default)]
        pub width: f64,
        #[serde(default)]
        pub height: f64,
        #[serde(default)]
        pub rotation: f64,
        #[serde(default = "yes")]
        pub visible: bool,
        #[serde(default, skip_serializing_if = "is_false")]
        pub ellipse: bool,
        #[serde(default, skip_serializing_if = "is_false")]
        pub point: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub polygon: Option<Vec<PointDoc>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub polyline: Option<Vec<PointDoc>>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub properties: Vec<PropertyDoc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PointDoc {
        pub x: f64,
        pub y: f64,
    }

    // ------------------------------------------------------------------------
    // Map -> wire
    // ------------------------------------------------------------------------

    pub fn to_doc(map: &Map) -> MapDoc {
        MapDoc {
            kind: map_type(),
            version: Some(Value::from(TMX_VERSION)),
            orientation: map.orientation.as_str().to_string(),
            render_order: map.render_order.as_str().to_string(),
            width: map.width,
            height: map.height,
            tile_width: map.tile_width,
            tile_height: map.tile_height,
            infinite: map.infinite,
            background_color: map.background_color.clone(),
            next_layer_id: map.next_layer_id,
            next_object_id: map.next_object_id,
            properties: properties_to_doc(&map.properties),
            tilesets: map.tilesets.iter().map(tileset_to_doc).collect(),
            layers: map.layers.iter().map(layer_to_doc).collect(),
        }
    }

    fn properties_to_doc(props: &Properties) -> Vec<PropertyDoc> {
        props
            .iter()
            .map(|(name, value)| PropertyDoc {
                name: name.to_string(),
                kind: value.type_name().to_string(),
                value: match value {
                    PropertyValue::String(s) | PropertyValue::Color(s) | PropertyValue::File(s) => {
                        Value::from(s.as_str())
                    }
                    PropertyValue::Int(v) => Value::from(*v),
                    PropertyValue::Float(v) => Value::from(*v),
                    PropertyValue::Bool(v) => Value::from(*v),
                    PropertyValue::Object(v) => Value::from(*v),
                },
            })
            .collect()
    }

    fn tileset_to_doc(tileset: &Tileset) -> TilesetDoc {
        let (image, image_width, image_height) = match &tileset.image {
            Some(img) => (Some(img.source.clone()), img.width, img.height),
            None => (None, 0, 0),
        };
        TilesetDoc {
            first_gid: tileset.first_gid,
            source: tileset.source.clone(),
            name: tileset.name.clone(),
            tile_width: tileset.tile_width,
            tile_height: tileset.tile_height,
            tile_count: tileset.tile_count,
            columns: tileset.columns,
            spacing: tileset.spacing,
            margin: tileset.margin,
            image,
            image_width,
            image_height,
            properties: properties_to_doc(&tileset.properties),
        }
    }

    fn layer_to_doc(layer: &Layer) -> LayerDoc {
        match layer {
            Layer::Tiles(tiles) => LayerDoc::Tiles(TileLayerDoc {
                id: tiles.id,
                name: tiles.name.clone(),
                width: tiles.width,
                height: tiles.height,
                x: 0,
                y: 0,
                visible: tiles.visible,
                opacity: tiles.opacity,
                offset_x: tiles.offset_x,
                offset_y: tiles.offset_y,
                properties: properties_to_doc(&tiles.properties),
                data: Some(TileData::Gids(tiles.data.clone())),
            }),
            Layer::Objects(group) => LayerDoc::Objects(ObjectGroupDoc {
                id: group.id,
                name: group.name.clone(),
                x: 0,
                y: 0,
                visible: group.visible,
                opacity: group.opacity,
                offset_x: group.offset_x,
                offset_y: group.offset_y,
                color: group.color.clone(),
                properties: properties_to_doc(&group.properties),
                objects: group.objects.iter().map(object_to_doc).collect(),
            }),
        }
    }

    fn points_to_doc(points: &[Point]) -> Vec<PointDoc> {
        points.iter().map(|p| PointDoc { x: p.x, y: p.y }).collect()
    }

    fn object_to_doc(object: &MapObject) -> ObjectDoc {
        ObjectDoc {
            id: object.id,
            name: object.name.clone(),
            class: object.class.clone(),
            gid: object.gid,
            x: object.x,
            y: object.y,
            width: object.width,
            height: object.height,
            rotation: object.rotation,
            visible: object.visible,
            ellipse: object.shape == Shape::Ellipse,
            point: object.shape == Shape::Point,
            polygon: match &object.shape {
                Shape::Polygon(pts) => Some(points_to_doc(pts)),
                _ => None,
            },
            polyline: match &object.shape {
                Shape::Polyline(pts) => Some(points_to_doc(pts)),
                _ => None,
            },
            properties: properties_to_doc(&object.properties),
        }
    }

    // ------------------------------------------------------------------------
    // wire -> Map
    // ------------------------------------------------------------------------

    pub fn from_doc(doc: MapDoc) -> Result<Map, FormatError> {
        if doc.kind != "map" {
            return Err(FormatError::invalid_element(format!(
                "expected a document of type 'map', found '{}'",
                doc.kind
            )));
        }

        let mut map = Map::new(doc.width, doc.height, doc.tile_width, doc.tile_height);
        map.orientation = Orientation::parse(&doc.orientation).ok_or_else(|| {
            FormatError::invalid_attribute(format!("unknown orientation '{}'", doc.orientation))
        })?;
        map.render_order = RenderOrder::parse(&doc.render_order).ok_or_else(|| {
            FormatError::invalid_attribute(format!("unknown render order '{}'", doc.render_order))
        })?;
        map.infinite = doc.infinite;
        map.background_color = doc.background_color;
        map.properties = properties_from_doc(doc.properties)?;
        map.tilesets = doc
            .tilesets
            .into_iter()
            .map(tileset_from_doc)
            .collect::<Result<_, _>>()?;
        map.layers = doc
            .layers
            .into_iter()
            .map(layer_from_doc)
            .collect::<Result<_, _>>()?;

        let max_layer = map.layers.iter().map(Layer::id).max().unwrap_or(0);
        let max_object = map
            .object_groups()
            .flat_map(|g| g.objects.iter().map(|o| o.id))
            .max()
            .unwrap_or(0);
        map.next_layer_id = match doc.next_layer_id {
            0 => next_id(max_layer, "layer")?,
            id => id,
        };
        map.next_object_id = match doc.next_object_id {
            0 => next_id(max_object, "object")?,
            id => id,
        };

        Ok(map)
    }

    fn properties_from_doc(docs: Vec<PropertyDoc>) -> Result<Properties, FormatError> {
        let mut props = Properties::new();
        for doc in docs {
            let value = match doc.kind.as_str() {
                "string" => doc.value.as_str().map(|s| PropertyValue::String(s.to_string())),
                "color" => doc.value.as_str().map(|s| PropertyValue::Color(s.to_string())),
                "file" => doc.value.as_str().map(|s| PropertyValue::File(s.to_string())),
                "int" => doc.value.as_i64().map(PropertyValue::Int),
                "float" => doc.value.as_f64().map(PropertyValue::Float),
                "bool" => doc.value.as_bool().map(PropertyValue::Bool),
                "object" => doc
                    .value
                    .as_u64()
                    .and_then(|v| u32::try_from(v).ok())
                    .map(PropertyValue::Object),
                _ => None,
            };
            let value = value.ok_or_else(|| {
                FormatError::invalid_property(format!(
                    "'{}' of type '{}' has value {}",
                    doc.name, doc.kind, doc.value
                ))
            })?;
            props.insert(doc.name, value);
        }
        Ok(props)
    }

    fn tileset_from_doc(doc: TilesetDoc) -> Result<Tileset, FormatError> {
        if let Some(source) = doc.source {
            return Ok(Tileset::external(doc.first_gid, source));
        }
        Ok(Tileset {
            first_gid: doc.first_gid,
            source: None,
            name: doc.name,
            tile_width: doc.tile_width,
            tile_height: doc.tile_height,
            tile_count: doc.tile_count,
            columns: doc.columns,
            spacing: doc.spacing,
            margin: doc.margin,
            image: doc.image.map(|source| Image {
                source,
                width: doc.image_width,
                height: doc.image_height,
            }),
            properties: properties_from_doc(doc.properties)?,
        })
    }

    fn layer_from_doc(doc: LayerDoc) -> Result<Layer, FormatError> {
        match doc {
            LayerDoc::Tiles(doc) => {
                let data = match doc.data {
                    Some(TileData::Gids(gids)) => gids,
                    Some(TileData::Encoded(_)) => {
                        return Err(FormatError::unsupported("base64 tile data"));
                    }
                    None => {
                        return Err(FormatError::unsupported(format!(
                            "layer '{}' has no data array (chunked infinite maps)",
                            doc.name
                        )));
                    }
                };
                let expected = TileLayer::cell_count(doc.width, doc.height);
                if data.len() as u64 != expected {
                    return Err(FormatError::invalid_element(format!(
                        "layer '{}' has {} tiles, expected {expected}",
                        doc.name,
                        data.len()
                    )));
                }

                let mut layer = TileLayer::from_data(doc.id, doc.name, doc.width, doc.height, data);
                layer.visible = doc.visible;
                layer.opacity = doc.opacity;
                layer.offset_x = doc.offset_x;
                layer.offset_y = doc.offset_y;
                layer.properties = properties_from_doc(doc.properties)?;
                Ok(Layer::Tiles(layer))
            }
            LayerDoc::Objects(doc) => {
                let mut group = ObjectGroup::new(doc.id, doc.name);
                group.visible = doc.visible;
                group.opacity = doc.opacity;
                group.offset_x = doc.offset_x;
                group.offset_y = doc.offset_y;
                group.color = doc.color;
                group.properties = properties_from_doc(doc.properties)?;
                group.objects = doc
                    .objects
                    .into_iter()
                    .map(object_from_doc)
                    .collect::<Result<_, _>>()?;
                Ok(Layer::Objects(group))
            }
        }
    }

    fn points_from_doc(points: Vec<PointDoc>) -> Vec<Point> {
        points.into_iter().map(|p| Point::new(p.x, p.y)).collect()
    }

    fn object_from_doc(doc: ObjectDoc) -> Result<MapObject, FormatError> {
        let shape = if let Some(pts) = doc.polygon {
            Shape::Polygon(points_from_doc(pts))
        } else if let Some(pts) = doc.polyline {
            Shape::Polyline(points_from_doc(pts))
        } else if doc.ellipse {
            Shape::Ellipse
        } else if doc.point {
            Shape::Point
        } else {
            Shape::Rectangle
        };

        let mut object = MapObject::new(doc.id, doc.x, doc.y)
            .with_name(doc.name)
            .with_size(doc.width, doc.height)
            .with_shape(shape);
        object.class = doc.class;
        object.rotation = doc.rotation;
        object.gid = doc.gid;
        object.visible = doc.visible;
        object.properties = properties_from_doc(doc.properties)?;
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MapObject, ObjectGroup, Point, PropertyValue, Shape, TileLayer, Tileset};

    fn sample_map() -> Map {
        let mut objects = ObjectGroup::new(2, "Triggers");
        objects.color = Some("#a0a0a4".to_string());
        let mut door = MapObject::new(3, 32.0, 48.0).with_name("door").with_size(16.0, 16.0);
        door.class = "portal".to_string();
        door.properties.insert("target", "level2.tmx");
        objects = objects
            .with_object(door)
            .with_object(MapObject::new(4, 0.0, 0.0).with_shape(Shape::Polyline(vec![
                Point::new(0.0, 0.0),
                Point::new(10.5, 4.0),
            ])));

        Map::new(2, 2, 32, 32)
            .with_property("difficulty", 3i64)
            .with_property("wind", 0.25)
            .with_tileset(Tileset::external(1, "dungeon.tsj"))
            .with_layer(TileLayer::new(1, "Floor", 2, 2).with_data(vec![1, 1, 2, 0]).into())
            .with_layer(objects.into())
    }

    #[test]
    fn test_json_format_metadata() {
        assert_eq!(Json.name(), "Tiled JSON map files");
        assert!(Json.supports_file(Path::new("maps/level.json")));
        assert!(Json.supports_file(Path::new("maps/level.tmj")));
        assert!(!Json.supports_file(Path::new("maps/level.tmx")));
    }

    #[test]
    fn test_json_read_tiled_export() {
        let input = br#"{
            "type": "map", "version": 1.2, "tiledversion": "1.2.1",
            "orientation": "isometric", "renderorder": "right-down",
            "width": 2, "height": 1, "tilewidth": 64, "tileheight": 32,
            "infinite": false, "nextlayerid": 2, "nextobjectid": 1,
            "tilesets": [{ "firstgid": 1, "name": "iso", "tilewidth": 64, "tileheight": 32,
                           "tilecount": 4, "columns": 2, "image": "iso.png",
                           "imagewidth": 128, "imageheight": 64 }],
            "layers": [{ "type": "tilelayer", "id": 1, "name": "Ground", "width": 2, "height": 1,
                         "x": 0, "y": 0, "visible": true, "opacity": 1, "data": [3, 4] }],
            "properties": [{ "name": "indoor", "type": "bool", "value": true }]
        }"#;

        let map = Json.decode(input).expect("Failed to read JSON");
        assert_eq!(map.orientation, crate::map::Orientation::Isometric);
        assert_eq!(map.tile_layers().next().unwrap().data, vec![3, 4]);
        assert_eq!(map.tilesets[0].image.as_ref().unwrap().width, 128);
        assert_eq!(map.properties.get("indoor"), Some(&PropertyValue::Bool(true)));
    }

    #[test]
    fn test_json_rejects_non_map_document() {
        let input = br#"{ "type": "tileset", "width": 1, "height": 1, "tilewidth": 1, "tileheight": 1 }"#;
        assert!(matches!(Json.decode(input), Err(FormatError::Invalid { .. })));
    }

    #[test]
    fn test_json_rejects_encoded_layer_data() {
        let input = br#"{ "width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
            "layers": [{ "type": "tilelayer", "name": "L", "width": 1, "height": 1,
                         "encoding": "base64", "data": "AQAAAA==" }] }"#;
        assert!(matches!(Json.decode(input), Err(FormatError::Unsupported(_))));
    }

    #[test]
    fn test_json_rejects_mistyped_property() {
        let input = br#"{ "width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
            "properties": [{ "name": "lives", "type": "int", "value": "three" }] }"#;
        assert!(matches!(Json.decode(input), Err(FormatError::Invalid { kind: "property", .. })));
    }

    #[test]
    fn test_json_rejects_oversized_layer() {
        let input = br#"{"width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
            "layers": [{"type": "tilelayer", "id": 1, "name": "L",
                        "width": 4294967295, "height": 4294967295, "data": [1]}]}"#;
        let err = Json.decode(input).unwrap_err();
        assert!(matches!(err, FormatError::Invalid { kind: "element", .. }), "got {err:?}");
    }

    #[test]
    fn test_json_rejects_max_ids_without_next_id() {
        let layer = br#"{"width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
            "layers": [{"type": "tilelayer", "id": 4294967295, "name": "L",
                        "width": 1, "height": 1, "data": [0]}]}"#;
        assert!(matches!(
            Json.decode(layer),
            Err(FormatError::Invalid { kind: "attribute", .. })
        ));

        let object = br#"{"width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
            "layers": [{"type": "objectgroup", "id": 1, "name": "O",
                        "objects": [{"id": 4294967295, "x": 0, "y": 0}]}]}"#;
        assert!(matches!(
            Json.decode(object),
            Err(FormatError::Invalid { kind: "attribute", .. })
        ));
    }

    #[test]
    fn test_json_explicit_next_ids_are_kept() {
        let input = br#"{"width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
            "nextlayerid": 9, "nextobjectid": 4,
            "layers": [{"type": "tilelayer", "id": 4294967295, "name": "L",
                        "width": 1, "height": 1, "data": [0]}]}"#;
        let map = Json.decode(input).unwrap();
        assert_eq!((map.next_layer_id, map.next_object_id), (9, 4));
    }

    #[test]
    fn test_json_rejects_garbage() {
        assert!(matches!(Json.decode(b"<map/>"), Err(FormatError::Json(_))));
    }

    #[test]
    fn test_json_write_layout() {
        let output = Json.encode(&sample_map()).expect("Failed to write JSON");
        let value: serde_json::Value = serde_json::from_slice(&output).expect("Invalid JSON");

        assert_eq!(value["type"], "map");
        assert_eq!(value["layers"][0]["type"], "tilelayer");
        assert_eq!(value["layers"][1]["type"], "objectgroup");
        assert_eq!(value["layers"][1]["objects"][0]["type"], "portal");
        assert_eq!(value["tilesets"][0]["source"], "dungeon.tsj");
        assert_eq!(value["properties"][0]["type"], "int");
        assert!(output.ends_with(b"}\n"));
    }

    #[test]
    fn test_json_roundtrip() {
        let map = sample_map();
        let first = Json.encode(&map).expect("Write failed");
        let reread = Json.decode(&first).expect("Read failed");
        assert_eq!(reread, map);

        let second = Json.encode(&reread).expect("Second write failed");
        assert_eq!(first, second);
    }
}
