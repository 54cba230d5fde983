//! Custom properties attached to maps, tilesets, layers and objects.

use indexmap::IndexMap;

/// A typed custom property value.
///
/// The variants mirror the property types Tiled understands. `Color` keeps
/// the `#AARRGGBB` text untouched, `File` keeps the path as written.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Color(String),
    File(String),
    /// Reference to another object by id.
    Object(u32),
}

impl PropertyValue {
    /// The type name used by both TMX (`type="..."`) and Tiled JSON (`"type"`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Color(_) => "color",
            Self::File(_) => "file",
            Self::Object(_) => "object",
        }
    }

    /// Render the value the way it appears in a `value="..."` attribute.
    pub fn to_attr_string(&self) -> String {
        match self {
            Self::String(s) | Self::Color(s) | Self::File(s) => s.clone(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Bool(v) => v.to_string(),
            Self::Object(v) => v.to_string(),
        }
    }

    /// Parse a textual value of the given type.
    ///
    /// Returns `None` when the type is unknown or the text does not parse
    /// as that type; callers turn that into a format-specific error.
    pub fn parse(type_name: &str, text: &str) -> Option<Self> {
        let value = match type_name {
            "" | "string" => Self::String(text.to_string()),
            "int" => Self::Int(text.trim().parse().ok()?),
            "float" => Self::Float(text.trim().parse().ok()?),
            "bool" => Self::Bool(match text.trim() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => return None,
            }),
            "color" => Self::Color(text.to_string()),
            "file" => Self::File(text.to_string()),
            "object" => Self::Object(text.trim().parse().ok()?),
            _ => return None,
        };
        Some(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Insertion-ordered property set.
///
/// Order is preserved so that a read followed by a write reproduces the
/// properties in the order the source file listed them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties(IndexMap<String, PropertyValue>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}
