//! Error types for format read/write operations.

use thiserror::Error;

/// Errors a format handler can report while reading or writing a map.
#[derive(Debug, Error)]
pub enum FormatError {
    /// XML parsing or serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML parsing or serialization error.
    #[error("YAML error: {0}")]
    Yaml(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing required element or attribute.
    #[error("Missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },

    /// Invalid element, attribute or value.
    #[error("Invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },

    /// The map uses something this format cannot represent or decode.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl FormatError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    /// Create a YAML error.
    pub fn yaml(message: impl Into<String>) -> Self {
        Self::Yaml(message.into())
    }

    /// Create an unsupported-content error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Create a missing element error.
    pub fn missing_element(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "element",
            name: name.into(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "attribute",
            name: name.into(),
        }
    }

    /// Create an invalid element error.
    pub fn invalid_element(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "element",
            message: message.into(),
        }
    }

    /// Create an invalid attribute error.
    pub fn invalid_attribute(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "attribute",
            message: message.into(),
        }
    }

    /// Create an invalid property error.
    pub fn invalid_property(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "property",
            message: message.into(),
        }
    }
}
