//! Head metadata tag identities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute used to identify a `<meta>` node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// `<meta name="...">`
    Name,
    /// `<meta property="...">`
    Property,
}

impl AttributeKind {
    /// The HTML attribute name
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Name => "name",
            AttributeKind::Property => "property",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(attribute kind, key)` pair naming one head metadata node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetaKey {
    pub kind: AttributeKind,
    pub key: String,
}

impl MetaKey {
    pub fn name(key: impl Into<String>) -> Self {
        MetaKey {
            kind: AttributeKind::Name,
            key: key.into(),
        }
    }

    pub fn property(key: impl Into<String>) -> Self {
        MetaKey {
            kind: AttributeKind::Property,
            key: key.into(),
        }
    }
}

impl fmt::Display for MetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.kind, self.key)
    }
}
