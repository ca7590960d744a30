// crates/schemaspec-core/src/value.rs
// ============================================================================
// Module: Typed Values and Namespaces
// Description: Internal value model and the record contract parsing writes to.
// Purpose: Let any named-field record receive parsed configuration.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Adapters turn [`crate::Primitive`]s into [`Value`]s, and the parse engine
//! writes those values into a [`Namespace`]. The engine only needs named field
//! read/write, so a caller can implement [`Namespace`] on its own record type;
//! [`Record`] is the ready-made dynamic implementation and is also how nested
//! tables are represented.

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

// ============================================================================
// SECTION: Value
// ============================================================================

/// Strongly typed value stored in a namespace.
///
/// # Invariants
/// - `None` is only produced by [`crate::ErrorMode::SetNone`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicitly empty value.
    None,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
    /// Filesystem path.
    Path(PathBuf),
    /// Homogeneous list.
    List(Vec<Value>),
    /// Nested record.
    Table(Record),
}

impl Value {
    /// Returns true for [`Value::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the boolean payload.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer payload.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float payload.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string payload.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the path payload.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the list payload.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested record.
    #[must_use]
    pub const fn as_table(&self) -> Option<&Record> {
        match self {
            Self::Table(record) => Some(record),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<PathBuf> for Value {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&Path> for Value {
    fn from(value: &Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Table(value)
    }
}

// ============================================================================
// SECTION: Namespace Contract
// ============================================================================

/// Named-field record that parsed values are written into.
///
/// Nested tables are exchanged as [`Value::Table`]; an implementation backed
/// by typed fields converts at this boundary.
pub trait Namespace {
    /// Returns a copy of the field, or `None` when it is not set.
    fn get(&self, name: &str) -> Option<Value>;

    /// Sets the field, replacing any previous value.
    fn set(&mut self, name: &str, value: Value);

    /// Removes the field, returning the previous value.
    fn remove(&mut self, name: &str) -> Option<Value>;

    /// Returns true when the field is set.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

// ============================================================================
// SECTION: Record
// ============================================================================

/// Dynamic namespace backed by a sorted map.
///
/// # Invariants
/// - Field names are unique; ordering carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Field storage.
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Returns the record with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Borrows a field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Borrows a nested record field.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Self> {
        self.fields.get(name).and_then(Value::as_table)
    }

    /// Mutably borrows a nested record field.
    pub fn table_mut(&mut self, name: &str) -> Option<&mut Self> {
        match self.fields.get_mut(name) {
            Some(Value::Table(record)) => Some(record),
            _ => None,
        }
    }

    /// Iterates field names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the number of set fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Namespace for Record {
    fn get(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}
