//! Format-agnostic map document.
//!
//! Every format reads into and writes from a [`Map`]. The conversion driver
//! treats it as an opaque value handed from a reader to a writer; only the
//! codecs look inside.
//!
//! ```text
//! Map
//! ├── properties: Properties            (insertion ordered)
//! ├── tilesets: Vec<Tileset>            (ascending first_gid)
//! └── layers: Vec<Layer>
//!     ├── Layer::Tiles(TileLayer)       (row-major gids)
//!     └── Layer::Objects(ObjectGroup)
//! ```

mod properties;

pub use properties::{Properties, PropertyValue};

use crate::interchange::FormatError;

// ============================================================================
// ENUMS
// ============================================================================

/// Map projection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Orthogonal,
    Isometric,
    Staggered,
    Hexagonal,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Orthogonal => "orthogonal",
            Self::Isometric => "isometric",
            Self::Staggered => "staggered",
            Self::Hexagonal => "hexagonal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "orthogonal" => Some(Self::Orthogonal),
            "isometric" => Some(Self::Isometric),
            "staggered" => Some(Self::Staggered),
            "hexagonal" => Some(Self::Hexagonal),
            _ => None,
        }
    }
}

/// Order in which tiles are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderOrder {
    #[default]
    RightDown,
    RightUp,
    LeftDown,
    LeftUp,
}

impl RenderOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RightDown => "right-down",
            Self::RightUp => "right-up",
            Self::LeftDown => "left-down",
            Self::LeftUp => "left-up",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "right-down" => Some(Self::RightDown),
            "right-up" => Some(Self::RightUp),
            "left-down" => Some(Self::LeftDown),
            "left-up" => Some(Self::LeftUp),
            _ => None,
        }
    }
}

// ============================================================================
// MAP
// ============================================================================

/// A tile map.
#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    pub orientation: Orientation,
    pub render_order: RenderOrder,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    pub infinite: bool,
    pub background_color: Option<String>,
    pub next_layer_id: u32,
    pub next_object_id: u32,
    pub properties: Properties,
    pub tilesets: Vec<Tileset>,
    pub layers: Vec<Layer>,
}

impl Map {
    /// Create an empty orthogonal map.
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            orientation: Orientation::Orthogonal,
            render_order: RenderOrder::RightDown,
            width,
            height,
            tile_width,
            tile_height,
            infinite: false,
            background_color: None,
            next_layer_id: 1,
            next_object_id: 1,
            properties: Properties::new(),
            tilesets: Vec::new(),
            layers: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name, value);
        self
    }

    pub fn with_tileset(mut self, tileset: Tileset) -> Self {
        self.tilesets.push(tileset);
        self
    }

    /// Append a layer, bumping `next_layer_id` past its id.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.next_layer_id = self.next_layer_id.max(layer.id().saturating_add(1));
        if let Layer::Objects(group) = &layer {
            if let Some(max) = group.objects.iter().map(|o| o.id).max() {
                self.next_object_id = self.next_object_id.max(max.saturating_add(1));
            }
        }
        self.layers.push(layer);
        self
    }

    pub fn tile_layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Tiles(t) => Some(t),
            Layer::Objects(_) => None,
        })
    }

    pub fn object_groups(&self) -> impl Iterator<Item = &ObjectGroup> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Objects(g) => Some(g),
            Layer::Tiles(_) => None,
        })
    }

    /// Check the structural invariants writers rely on.
    pub fn validate(&self) -> Result<(), FormatError> {
        let mut previous_gid = 0;
        for tileset in &self.tilesets {
            if tileset.first_gid <= previous_gid {
                return Err(FormatError::invalid_element(format!(
                    "tileset firstgid {} must be greater than {}",
                    tileset.first_gid, previous_gid
                )));
            }
            previous_gid = tileset.first_gid;
        }

        for layer in self.tile_layers() {
            let expected = TileLayer::cell_count(layer.width, layer.height);
            if layer.data.len() as u64 != expected {
                return Err(FormatError::invalid_element(format!(
                    "layer '{}' has {} tiles, expected {}x{} = {}",
                    layer.name,
                    layer.data.len(),
                    layer.width,
                    layer.height,
                    expected
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// TILESETS
// ============================================================================

/// Tileset image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Image {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// A tileset, either embedded or referenced through `source`.
///
/// For external tilesets only `first_gid` and `source` are meaningful.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tileset {
    pub first_gid: u32,
    pub source: Option<String>,
    pub name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: u32,
    pub columns: u32,
    pub spacing: u32,
    pub margin: u32,
    pub image: Option<Image>,
    pub properties: Properties,
}

impl Tileset {
    /// An embedded tileset.
    pub fn embedded(first_gid: u32, name: impl Into<String>, tile_width: u32, tile_height: u32) -> Self {
        Self {
            first_gid,
            name: name.into(),
            tile_width,
            tile_height,
            ..Default::default()
        }
    }

    /// A reference to an external `.tsx`/`.tsj` tileset.
    pub fn external(first_gid: u32, source: impl Into<String>) -> Self {
        Self {
            first_gid,
            source: Some(source.into()),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, source: impl Into<String>, width: u32, height: u32) -> Self {
        self.image = Some(Image {
            source: source.into(),
            width,
            height,
        });
        if self.tile_width > 0 && self.tile_height > 0 {
            self.columns = width / self.tile_width;
            self.tile_count = self.columns * (height / self.tile_height);
        }
        self
    }

    pub fn is_external(&self) -> bool {
        self.source.is_some()
    }
}

// ============================================================================
// LAYERS
// ============================================================================

/// A map layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Layer {
    Tiles(TileLayer),
    Objects(ObjectGroup),
}

impl Layer {
    pub fn id(&self) -> u32 {
        match self {
            Self::Tiles(l) => l.id,
            Self::Objects(g) => g.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Tiles(l) => &l.name,
            Self::Objects(g) => &g.name,
        }
    }
}

impl From<TileLayer> for Layer {
    fn from(layer: TileLayer) -> Self {
        Self::Tiles(layer)
    }
}

impl From<ObjectGroup> for Layer {
    fn from(group: ObjectGroup) -> Self {
        Self::Objects(group)
    }
}

/// A grid of global tile ids. Zero means "no tile".
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayer {
    pub id: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub visible: bool,
    pub opacity: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub properties: Properties,
    /// Row-major, `width * height` entries.
    pub data: Vec<u32>,
}

impl TileLayer {
    /// A visible, fully opaque layer with every cell empty.
    pub fn new(id: u32, name: impl Into<String>, width: u32, height: u32) -> Self {
        let cells = Self::cell_count(width, height) as usize;
        Self::from_data(id, name, width, height, vec![0; cells])
    }

    /// A visible, fully opaque layer around already decoded gids.
    ///
    /// Nothing is allocated from `width` and `height`; readers compare
    /// `data.len()` against [`cell_count`](Self::cell_count) first.
    pub fn from_data(id: u32, name: impl Into<String>, width: u32, height: u32, data: Vec<u32>) -> Self {
        Self {
            id,
            name: name.into(),
            width,
            height,
            visible: true,
            opacity: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            properties: Properties::new(),
            data,
        }
    }

    /// Number of cells a `width` x `height` layer holds.
    pub fn cell_count(width: u32, height: u32) -> u64 {
        u64::from(width) * u64::from(height)
    }

    pub fn with_data(mut self, data: Vec<u32>) -> Self {
        self.data = data;
        self
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn gid(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).and_then(|i| self.data.get(i).copied())
    }

    /// Set a cell. Returns `false` when `(x, y)` lies outside the layer.
    pub fn set_gid(&mut self, x: u32, y: u32, gid: u32) -> bool {
        match self.index(x, y).and_then(|i| self.data.get_mut(i)) {
            Some(cell) => {
                *cell = gid;
                true
            }
            None => false,
        }
    }

    /// Iterate rows of gids, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.data.chunks(self.width.max(1) as usize)
    }
}

/// A layer of free-placed objects.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectGroup {
    pub id: u32,
    pub name: String,
    pub visible: bool,
    pub opacity: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub color: Option<String>,
    pub properties: Properties,
    pub objects: Vec<MapObject>,
}

impl ObjectGroup {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            opacity: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            color: None,
            properties: Properties::new(),
            objects: Vec::new(),
        }
    }

    pub fn with_object(mut self, object: MapObject) -> Self {
        self.objects.push(object);
        self
    }
}

// ============================================================================
// OBJECTS
// ============================================================================

/// A point in pixel coordinates, relative to the owning object.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry of an object.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Shape {
    #[default]
    Rectangle,
    Ellipse,
    Point,
    Polygon(Vec<Point>),
    Polyline(Vec<Point>),
}

/// An object placed in an [`ObjectGroup`].
#[derive(Clone, Debug, PartialEq)]
pub struct MapObject {
    pub id: u32,
    pub name: String,
    /// Tiled's object class (`type` in older files).
    pub class: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    /// Set for tile objects.
    pub gid: Option<u32>,
    pub visible: bool,
    pub shape: Shape,
    pub properties: Properties,
}

impl MapObject {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self {
            id,
            name: String::new(),
            class: String::new(),
            x,
            y,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            gid: None,
            visible: true,
            shape: Shape::Rectangle,
            properties: Properties::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }
}
