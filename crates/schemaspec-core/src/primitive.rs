// crates/schemaspec-core/src/primitive.rs
// ============================================================================
// Module: Wire Primitives
// Description: Closed set of untyped values accepted at the schema boundary.
// Purpose: Decouple the engine from any particular document format.
// Dependencies: serde, crate::text
// ============================================================================

//! ## Overview
//! A [`Primitive`] is what a document loader hands to the engine: strings,
//! integers, floats, booleans, sequences and string-keyed mappings. Integers and
//! floats are distinct variants so integer and float adapters never coerce.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::text;

// ============================================================================
// SECTION: Types
// ============================================================================

/// String-keyed mapping of primitives (a parsed document or table).
pub type PrimitiveMap = BTreeMap<String, Primitive>;

/// Untyped wire-level value.
///
/// # Invariants
/// - `Integer` and `Float` are never interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    /// Boolean value.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence.
    Array(Vec<Primitive>),
    /// String-keyed mapping.
    Table(PrimitiveMap),
}

impl Primitive {
    /// Returns a stable label for the primitive kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Table(_) => "table",
        }
    }

    /// Returns the mapping when this primitive is a table.
    #[must_use]
    pub const fn as_table(&self) -> Option<&PrimitiveMap> {
        match self {
            Self::Table(map) => Some(map),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Primitive>> for Primitive {
    fn from(value: Vec<Primitive>) -> Self {
        Self::Array(value)
    }
}

impl From<PrimitiveMap> for Primitive {
    fn from(value: PrimitiveMap) -> Self {
        Self::Table(value)
    }
}

// ============================================================================
// SECTION: Display
// ============================================================================

/// Renders the primitive as a TOML literal.
impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&text::float(*value)),
            Self::String(value) => f.write_str(&text::quote(value)),
            Self::Array(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Table(map) => {
                if map.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (index, (key, item)) in map.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} = {item}", text::key(key))?;
                }
                f.write_str(" }")
            }
        }
    }
}
