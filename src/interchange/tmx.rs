//! TMX (Tiled XML map) format support.
//!
//! TMX is Tiled's native map format and the fallback used whenever no
//! registered format claims a path.
//!
//! ## TMX Structure
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <map version="1.10" orientation="orthogonal" renderorder="right-down"
//!      width="4" height="2" tilewidth="16" tileheight="16" infinite="0"
//!      nextlayerid="3" nextobjectid="2">
//!  <properties>
//!   <property name="music" type="file" value="level1.ogg"/>
//!  </properties>
//!  <tileset firstgid="1" name="terrain" tilewidth="16" tileheight="16" tilecount="8" columns="4">
//!   <image source="terrain.png" width="64" height="32"/>
//!  </tileset>
//!  <layer id="1" name="Ground" width="4" height="2">
//!   <data encoding="csv">
//! 1,2,3,4,
//! 5,6,7,8
//! </data>
//!  </layer>
//!  <objectgroup id="2" name="Spawns">
//!   <object id="1" name="player" x="16" y="16">
//!    <point/>
//!   </object>
//!  </objectgroup>
//! </map>
//! ```
//!
//! Tile data is read from CSV or from `<tile gid=".."/>` children and always
//! written as CSV. Base64 and compressed layer data are rejected.

use std::path::Path;

use super::format::{next_id, read_file, write_file};
use super::{FormatCapability, FormatError, MapFormat};
use crate::map::{
    Layer, Map, MapObject, ObjectGroup, Orientation, Point, Properties, PropertyValue,
    RenderOrder, Shape, TileLayer, Tileset,
};

/// TMX version written into the `<map>` element.
pub const TMX_VERSION: &str = "1.10";

/// TMX format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tmx;

impl Tmx {
    /// Decode a map from TMX bytes.
    pub fn decode(&self, input: &[u8]) -> Result<Map, FormatError> {
        let tree = reader::parse_tree(input)?;
        reader::map_from_tree(&tree)
    }

    /// Encode a map as TMX bytes.
    pub fn encode(&self, map: &Map) -> Result<Vec<u8>, FormatError> {
        writer::TmxWriter::new().write(map)
    }
}

impl MapFormat for Tmx {
    fn name(&self) -> &str {
        "Tiled map files"
    }

    fn extensions(&self) -> Vec<&str> {
        vec!["tmx", "xml"]
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
// TMX READER
// ============================================================================

mod reader {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::{BytesStart, Event};
    use std::str::FromStr;

    /// Element tree built from the XML event stream.
    #[derive(Debug, Default)]
    pub struct Node {
        pub name: String,
        attrs: Vec<(String, String)>,
        text: String,
        children: Vec<Node>,
    }

    impl Node {
        fn from_start(e: &BytesStart<'_>) -> Result<Self, FormatError> {
            let name = std::str::from_utf8(e.name().as_ref())
                .map_err(|e| FormatError::xml(format!("Invalid tag name: {e}")))?
                .to_string();

            let mut attrs = Vec::new();
            for attr_result in e.attributes() {
                let attr = attr_result
                    .map_err(|e| FormatError::xml(format!("Attribute error: {e}")))?;
                let key = std::str::from_utf8(attr.key.as_ref())
                    .map_err(|e| FormatError::xml(format!("Attribute key error: {e}")))?
                    .to_string();
                let value = attr
                    .unescape_value()
                    .map_err(|e| FormatError::xml(format!("Attribute value error: {e}")))?
                    .into_owned();
                attrs.push((key, value));
            }

            Ok(Self {
                name,
                attrs,
                ..Default::default()
            })
        }

        fn attr(&self, key: &str) -> Option<&str> {
            self.attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        }

        fn child(&self, name: &str) -> Option<&Node> {
            self.children.iter().find(|c| c.name == name)
        }

        fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> {
            self.children.iter().filter(move |c| c.name == name)
        }

        fn parse_attr<T: FromStr>(&self, key: &str) -> Result<Option<T>, FormatError> {
            match self.attr(key) {
                None => Ok(None),
                Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
                    FormatError::invalid_attribute(format!(
                        "<{}> {key}=\"{raw}\" is not a valid value",
                        self.name
                    ))
                }),
            }
        }

        fn required<T: FromStr>(&self, key: &str) -> Result<T, FormatError> {
            self.parse_attr(key)?
                .ok_or_else(|| FormatError::missing_attribute(format!("{}@{key}", self.name)))
        }

        fn string(&self, key: &str) -> String {
            self.attr(key).unwrap_or_default().to_string()
        }

        /// TMX booleans are `0`/`1`; `true`/`false` is accepted as well.
        fn flag(&self, key: &str, default: bool) -> Result<bool, FormatError> {
            match self.attr(key) {
                None => Ok(default),
                Some("1") | Some("true") => Ok(true),
                Some("0") | Some("false") => Ok(false),
                Some(other) => Err(FormatError::invalid_attribute(format!(
                    "<{}> {key}=\"{other}\" is not a boolean",
                    self.name
                ))),
            }
        }
    }

    pub fn parse_tree(input: &[u8]) -> Result<Node, FormatError> {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<Node> = Vec::new();
        let mut root: Option<Node> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    stack.push(Node::from_start(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let node = Node::from_start(e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| FormatError::xml("Unexpected closing tag"))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(ref t)) => {
                    if let Some(top) = stack.last_mut() {
                        let text = t
                            .unescape()
                            .map_err(|e| FormatError::xml(format!("Text error: {e}")))?;
                        top.text.push_str(&text);
                    }
                }
                Ok(Event::CData(t)) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&t));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FormatError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(FormatError::xml(format!(
                "Unexpected end of document inside <{}>",
                open.name
            )));
        }

        root.ok_or_else(|| FormatError::missing_element("map"))
    }

    fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<(), FormatError> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None if root.is_some() => {
                return Err(FormatError::xml("Document has more than one root element"));
            }
            None => *root = Some(node),
        }
        Ok(())
    }

    pub fn map_from_tree(root: &Node) -> Result<Map, FormatError> {
        if root.name != "map" {
            return Err(FormatError::invalid_element(format!(
                "expected <map> root, found <{}>",
                root.name
            )));
        }

        let mut map = Map::new(
            root.required("width")?,
            root.required("height")?,
            root.required("tilewidth")?,
            root.required("tileheight")?,
        );

        if let Some(raw) = root.attr("orientation") {
            map.orientation = Orientation::parse(raw).ok_or_else(|| {
                FormatError::invalid_attribute(format!("unknown orientation '{raw}'"))
            })?;
        }
        if let Some(raw) = root.attr("renderorder") {
            map.render_order = RenderOrder::parse(raw).ok_or_else(|| {
                FormatError::invalid_attribute(format!("unknown render order '{raw}'"))
            })?;
        }
        map.infinite = root.flag("infinite", false)?;
        map.background_color = root.attr("backgroundcolor").map(str::to_string);

        for child in &root.children {
            match child.name.as_str() {
                "properties" => map.properties = read_properties(child)?,
                "tileset" => map.tilesets.push(read_tileset(child)?),
                "layer" => map.layers.push(Layer::Tiles(read_tile_layer(child)?)),
                "objectgroup" => map.layers.push(Layer::Objects(read_object_group(child)?)),
                "editorsettings" => {}
                other => {
                    tracing::warn!(element = other, "dropping unsupported TMX element");
                }
            }
        }

        let max_layer = map.layers.iter().map(Layer::id).max().unwrap_or(0);
        let max_object = map
            .object_groups()
            .flat_map(|g| g.objects.iter().map(|o| o.id))
            .max()
            .unwrap_or(0);
        map.next_layer_id = match root.parse_attr("nextlayerid")? {
            Some(id) => id,
            None => next_id(max_layer, "layer")?,
        };
        map.next_object_id = match root.parse_attr("nextobjectid")? {
            Some(id) => id,
            None => next_id(max_object, "object")?,
        };

        Ok(map)
    }

    fn read_properties(node: &Node) -> Result<Properties, FormatError> {
        let mut props = Properties::new();
        for property in node.children_named("property") {
            let name = property
                .attr("name")
                .ok_or_else(|| FormatError::missing_attribute("property@name"))?;
            let type_name = property.attr("type").unwrap_or("string");
            // Multi-line strings are stored as element text instead of `value`.
            let text = property.attr("value").unwrap_or(&property.text);
            let value = PropertyValue::parse(type_name, text).ok_or_else(|| {
                FormatError::invalid_property(format!(
                    "'{name}' of type '{type_name}' has value '{text}'"
                ))
            })?;
            props.insert(name, value);
        }
        Ok(props)
    }

    fn read_tileset(node: &Node) -> Result<Tileset, FormatError> {
        let first_gid = node.required("firstgid")?;
        if let Some(source) = node.attr("source") {
            return Ok(Tileset::external(first_gid, source));
        }

        let mut tileset = Tileset::embedded(
            first_gid,
            node.string("name"),
            node.parse_attr("tilewidth")?.unwrap_or(0),
            node.parse_attr("tileheight")?.unwrap_or(0),
        );
        tileset.tile_count = node.parse_attr("tilecount")?.unwrap_or(0);
        tileset.columns = node.parse_attr("columns")?.unwrap_or(0);
        tileset.spacing = node.parse_attr("spacing")?.unwrap_or(0);
        tileset.margin = node.parse_attr("margin")?.unwrap_or(0);

        if let Some(props) = node.child("properties") {
            tileset.properties = read_properties(props)?;
        }
        if let Some(image) = node.child("image") {
            tileset.image = Some(crate::map::Image {
                source: image
                    .attr("source")
                    .ok_or_else(|| FormatError::missing_attribute("image@source"))?
                    .to_string(),
                width: image.parse_attr("width")?.unwrap_or(0),
                height: image.parse_attr("height")?.unwrap_or(0),
            });
        }

        Ok(tileset)
    }

    fn read_tile_layer(node: &Node) -> Result<TileLayer, FormatError> {
        let name = node.string("name");
        let width: u32 = node.required("width")?;
        let height: u32 = node.required("height")?;

        let data = node
            .child("data")
            .ok_or_else(|| FormatError::missing_element(format!("data in layer '{name}'")))?;
        let data = read_data(data)?;

        let expected = TileLayer::cell_count(width, height);
        if data.len() as u64 != expected {
            return Err(FormatError::invalid_element(format!(
                "layer '{name}' has {} tiles, expected {expected}",
                data.len()
            )));
        }

        let mut layer =
            TileLayer::from_data(node.parse_attr("id")?.unwrap_or(0), name, width, height, data);
        layer.visible = node.flag("visible", true)?;
        layer.opacity = node.parse_attr("opacity")?.unwrap_or(1.0);
        layer.offset_x = node.parse_attr("offsetx")?.unwrap_or(0.0);
        layer.offset_y = node.parse_attr("offsety")?.unwrap_or(0.0);

        if let Some(props) = node.child("properties") {
            layer.properties = read_properties(props)?;
        }

        Ok(layer)
    }

    fn read_data(node: &Node) -> Result<Vec<u32>, FormatError> {
        if node.child("chunk").is_some() {
            return Err(FormatError::unsupported("chunked tile data (infinite maps)"));
        }
        if let Some(compression) = node.attr("compression") {
            return Err(FormatError::unsupported(format!(
                "{compression}-compressed tile data"
            )));
        }

        match node.attr("encoding") {
            None => node
                .children_named("tile")
                .map(|tile| -> Result<u32, FormatError> {
                    Ok(tile.parse_attr("gid")?.unwrap_or(0))
                })
                .collect(),
            Some("csv") => node
                .text
                .split(',')
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .map(|cell| {
                    cell.parse::<u32>().map_err(|_| {
                        FormatError::invalid_element(format!("'{cell}' is not a tile gid"))
                    })
                })
                .collect(),
            Some("base64") => Err(FormatError::unsupported("base64 tile data")),
            Some(other) => Err(FormatError::invalid_attribute(format!(
                "unknown data encoding '{other}'"
            ))),
        }
    }

    fn read_object_group(node: &Node) -> Result<ObjectGroup, FormatError> {
        let mut group = ObjectGroup::new(node.parse_attr("id")?.unwrap_or(0), node.string("name"));
        group.visible = node.flag("visible", true)?;
        group.opacity = node.parse_attr("opacity")?.unwrap_or(1.0);
        group.offset_x = node.parse_attr("offsetx")?.unwrap_or(0.0);
        group.offset_y = node.parse_attr("offsety")?.unwrap_or(0.0);
        group.color = node.attr("color").map(str::to_string);

        if let Some(props) = node.child("properties") {
            group.properties = read_properties(props)?;
        }
        for object in node.children_named("object") {
            group.objects.push(read_object(object)?);
        }

        Ok(group)
    }

    fn read_object(node: &Node) -> Result<MapObject, FormatError> {
        let mut object = MapObject::new(
            node.parse_attr("id")?.unwrap_or(0),
            node.parse_attr("x")?.unwrap_or(0.0),
            node.parse_attr("y")?.unwrap_or(0.0),
        );
        object.name = node.string("name");
        object.class = node.attr("class").or(node.attr("type")).unwrap_or_default().to_string();
        object.width = node.parse_attr("width")?.unwrap_or(0.0);
        object.height = node.parse_attr("height")?.unwrap_or(0.0);
        object.rotation = node.parse_attr("rotation")?.unwrap_or(0.0);
        object.gid = node.parse_attr("gid")?;
        object.visible = node.flag("visible", true)?;

        for child in &node.children {
            match child.name.as_str() {
                "properties" => object.properties = read_properties(child)?,
                "ellipse" => object.shape = Shape::Ellipse,
                "point" => object.shape = Shape::Point,
                "polygon" => object.shape = Shape::Polygon(read_points(child)?),
                "polyline" => object.shape = Shape::Polyline(read_points(child)?),
                _ => {}
            }
        }

        Ok(object)
    }

    fn read_points(node: &Node) -> Result<Vec<Point>, FormatError> {
        let raw = node
            .attr("points")
            .ok_or_else(|| FormatError::missing_attribute(format!("{}@points", node.name)))?;

        raw.split_whitespace()
            .map(|pair| {
                let parsed = pair
                    .split_once(',')
                    .and_then(|(x, y)| Some(Point::new(x.parse().ok()?, y.parse().ok()?)));
                parsed.ok_or_else(|| {
                    FormatError::invalid_attribute(format!("'{pair}' is not an x,y point"))
                })
            })
            .collect()
    }
}

// ============================================================================
// TMX WRITER
// ============================================================================

mod writer {
    use super::*;
    use quick_xml::Writer;
    use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
    use std::fmt::Display;
    use std::io::{Cursor, Write};

    /// TMX document writer. Tile data is always CSV encoded.
    pub struct TmxWriter;

    impl TmxWriter {
        pub fn new() -> Self {
            Self
        }

        pub fn write(&self, map: &Map) -> Result<Vec<u8>, FormatError> {
            map.validate()?;

            let mut buffer = Cursor::new(Vec::new());
            let mut writer = Writer::new_with_indent(&mut buffer, b' ', 1);

            emit(
                &mut writer,
                Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
            )?;

            let mut start = BytesStart::new("map");
            attr(&mut start, "version", TMX_VERSION);
            attr(&mut start, "orientation", map.orientation.as_str());
            attr(&mut start, "renderorder", map.render_order.as_str());
            attr(&mut start, "width", map.width);
            attr(&mut start, "height", map.height);
            attr(&mut start, "tilewidth", map.tile_width);
            attr(&mut start, "tileheight", map.tile_height);
            attr(&mut start, "infinite", u8::from(map.infinite));
            if let Some(color) = &map.background_color {
                attr(&mut start, "backgroundcolor", color);
            }
            attr(&mut start, "nextlayerid", map.next_layer_id);
            attr(&mut start, "nextobjectid", map.next_object_id);
            emit(&mut writer, Event::Start(start))?;

            write_properties(&mut writer, &map.properties)?;
            for tileset in &map.tilesets {
                write_tileset(&mut writer, tileset)?;
            }
            for layer in &map.layers {
                match layer {
                    Layer::Tiles(tiles) => write_tile_layer(&mut writer, tiles)?,
                    Layer::Objects(group) => write_object_group(&mut writer, group)?,
                }
            }

            emit(&mut writer, Event::End(BytesEnd::new("map")))?;

            let mut output = buffer.into_inner();
            output.push(b'\n');
            Ok(output)
        }
    }

    fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), FormatError> {
        writer
            .write_event(event)
            .map_err(|e| FormatError::xml(format!("Write error: {e}")))
    }

    fn attr(start: &mut BytesStart<'_>, key: &str, value: impl Display) {
        start.push_attribute((key, value.to_string().as_str()));
    }

    /// Attributes every layer kind shares, omitted at their defaults.
    fn layer_attrs(start: &mut BytesStart<'_>, visible: bool, opacity: f64, dx: f64, dy: f64) {
        if !visible {
            attr(start, "visible", 0);
        }
        if opacity != 1.0 {
            attr(start, "opacity", opacity);
        }
        if dx != 0.0 {
            attr(start, "offsetx", dx);
        }
        if dy != 0.0 {
            attr(start, "offsety", dy);
        }
    }

    /// Write `start` as an empty element or wrap `body` in start/end tags.
    fn element<W: Write>(
        writer: &mut Writer<W>,
        start: BytesStart<'_>,
        has_children: bool,
        body: impl FnOnce(&mut Writer<W>) -> Result<(), FormatError>,
    ) -> Result<(), FormatError> {
        if !has_children {
            return emit(writer, Event::Empty(start));
        }
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        emit(writer, Event::Start(start))?;
        body(writer)?;
        emit(writer, Event::End(BytesEnd::new(name)))
    }

    fn write_properties<W: Write>(
        writer: &mut Writer<W>,
        props: &Properties,
    ) -> Result<(), FormatError> {
        if props.is_empty() {
            return Ok(());
        }

        emit(writer, Event::Start(BytesStart::new("properties")))?;
        for (name, value) in props.iter() {
            let mut start = BytesStart::new("property");
            attr(&mut start, "name", name);
            if !matches!(value, PropertyValue::String(_)) {
                attr(&mut start, "type", value.type_name());
            }
            match value {
                PropertyValue::String(text) if text.contains('\n') => {
                    emit(writer, Event::Start(start))?;
                    emit(writer, Event::Text(BytesText::new(text)))?;
                    emit(writer, Event::End(BytesEnd::new("property")))?;
                }
                _ => {
                    attr(&mut start, "value", value.to_attr_string());
                    emit(writer, Event::Empty(start))?;
                }
            }
        }
        emit(writer, Event::End(BytesEnd::new("properties")))
    }

    fn write_tileset<W: Write>(writer: &mut Writer<W>, tileset: &Tileset) -> Result<(), FormatError> {
        let mut start = BytesStart::new("tileset");
        attr(&mut start, "firstgid", tileset.first_gid);

        if let Some(source) = &tileset.source {
            attr(&mut start, "source", source);
            return emit(writer, Event::Empty(start));
        }

        attr(&mut start, "name", &tileset.name);
        attr(&mut start, "tilewidth", tileset.tile_width);
        attr(&mut start, "tileheight", tileset.tile_height);
        if tileset.spacing != 0 {
            attr(&mut start, "spacing", tileset.spacing);
        }
        if tileset.margin != 0 {
            attr(&mut start, "margin", tileset.margin);
        }
        attr(&mut start, "tilecount", tileset.tile_count);
        attr(&mut start, "columns", tileset.columns);

        let has_children = !tileset.properties.is_empty() || tileset.image.is_some();
        element(writer, start, has_children, |writer| {
            write_properties(writer, &tileset.properties)?;
            if let Some(image) = &tileset.image {
                let mut img = BytesStart::new("image");
                attr(&mut img, "source", &image.source);
                attr(&mut img, "width", image.width);
                attr(&mut img, "height", image.height);
                emit(writer, Event::Empty(img))?;
            }
            Ok(())
        })
    }

    fn write_tile_layer<W: Write>(writer: &mut Writer<W>, layer: &TileLayer) -> Result<(), FormatError> {
        let mut start = BytesStart::new("layer");
        attr(&mut start, "id", layer.id);
        attr(&mut start, "name", &layer.name);
        attr(&mut start, "width", layer.width);
        attr(&mut start, "height", layer.height);
        layer_attrs(&mut start, layer.visible, layer.opacity, layer.offset_x, layer.offset_y);

        emit(writer, Event::Start(start))?;
        write_properties(writer, &layer.properties)?;

        let mut data = BytesStart::new("data");
        attr(&mut data, "encoding", "csv");
        emit(writer, Event::Start(data))?;
        let csv: Vec<String> = layer
            .rows()
            .map(|row| {
                row.iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();
        let text = format!("\n{}\n", csv.join(",\n"));
        emit(writer, Event::Text(BytesText::new(&text)))?;
        emit(writer, Event::End(BytesEnd::new("data")))?;

        emit(writer, Event::End(BytesEnd::new("layer")))
    }

    fn write_object_group<W: Write>(
        writer: &mut Writer<W>,
        group: &ObjectGroup,
    ) -> Result<(), FormatError> {
        let mut start = BytesStart::new("objectgroup");
        attr(&mut start, "id", group.id);
        attr(&mut start, "name", &group.name);
        if let Some(color) = &group.color {
            attr(&mut start, "color", color);
        }
        layer_attrs(&mut start, group.visible, group.opacity, group.offset_x, group.offset_y);

        let has_children = !group.properties.is_empty() || !group.objects.is_empty();
        element(writer, start, has_children, |writer| {
            write_properties(writer, &group.properties)?;
            for object in &group.objects {
                write_object(writer, object)?;
            }
            Ok(())
        })
    }

    fn write_object<W: Write>(writer: &mut Writer<W>, object: &MapObject) -> Result<(), FormatError> {
        let mut start = BytesStart::new("object");
        attr(&mut start, "id", object.id);
        if !object.name.is_empty() {
            attr(&mut start, "name", &object.name);
        }
        if !object.class.is_empty() {
            attr(&mut start, "type", &object.class);
        }
        if let Some(gid) = object.gid {
            attr(&mut start, "gid", gid);
        }
        attr(&mut start, "x", object.x);
        attr(&mut start, "y", object.y);
        if object.width != 0.0 {
            attr(&mut start, "width", object.width);
        }
        if object.height != 0.0 {
            attr(&mut start, "height", object.height);
        }
        if object.rotation != 0.0 {
            attr(&mut start, "rotation", object.rotation);
        }
        if !object.visible {
            attr(&mut start, "visible", 0);
        }

        let has_children =
            !object.properties.is_empty() || !matches!(object.shape, Shape::Rectangle);
        element(writer, start, has_children, |writer| {
            write_properties(writer, &object.properties)?;
            match &object.shape {
                Shape::Rectangle => Ok(()),
                Shape::Ellipse => emit(writer, Event::Empty(BytesStart::new("ellipse"))),
                Shape::Point => emit(writer, Event::Empty(BytesStart::new("point"))),
                Shape::Polygon(points) => write_points(writer, "polygon", points),
                Shape::Polyline(points) => write_points(writer, "polyline", points),
            }
        })
    }

    fn write_points<W: Write>(
        writer: &mut Writer<W>,
        tag: &str,
        points: &[Point],
    ) -> Result<(), FormatError> {
        let joined: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
        let mut start = BytesStart::new(tag);
        attr(&mut start, "points", joined.join(" "));
        emit(writer, Event::Empty(start))
    }
}
