// crates/schemaspec-config/src/load.rs
// ============================================================================
// Module: Document Loading
// Description: Read TOML or JSON documents into schema primitives.
// Purpose: Fail-closed file reading feeding SchemaTable::parse_data.
// Dependencies: schemaspec-core, serde_json, thiserror, toml, tracing
// ============================================================================

//! ## Overview
//! Documents are read with strict size and path limits, decoded as UTF-8, and
//! parsed as TOML (or JSON for `.json` files). The parsed tree is converted to
//! [`Primitive`]s and handed to the schema, which rejects anything it does not
//! declare.
//!
//! Security posture: documents are untrusted input; limits are checked before
//! parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use schemaspec_core::ErrorMode;
use schemaspec_core::Namespace;
use schemaspec_core::Primitive;
use schemaspec_core::PrimitiveMap;
use schemaspec_core::Record;
use schemaspec_core::SchemaError;
use schemaspec_core::SchemaTable;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum document size in bytes.
pub(crate) const MAX_DOCUMENT_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading a document into a namespace.
#[derive(Debug, Error)]
pub enum LoadError {
    /// I/O failure while reading the document.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML or JSON syntax error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Document violates a loading limit or holds unsupported values.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Document does not match the schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

// ============================================================================
// SECTION: Primitive Conversion
// ============================================================================

/// Converts a TOML value; datetimes become their RFC 3339 text.
#[must_use]
pub fn primitive_from_toml(value: toml::Value) -> Primitive {
    match value {
        toml::Value::String(text) => Primitive::String(text),
        toml::Value::Integer(number) => Primitive::Integer(number),
        toml::Value::Float(number) => Primitive::Float(number),
        toml::Value::Boolean(flag) => Primitive::Boolean(flag),
        toml::Value::Datetime(datetime) => Primitive::String(datetime.to_string()),
        toml::Value::Array(items) => {
            Primitive::Array(items.into_iter().map(primitive_from_toml).collect())
        }
        toml::Value::Table(table) => Primitive::Table(
            table.into_iter().map(|(key, item)| (key, primitive_from_toml(item))).collect(),
        ),
    }
}

/// Converts a JSON value.
///
/// Integers that fit `i64` stay integers; other numbers become floats.
///
/// # Errors
///
/// Returns [`LoadError::Invalid`] for `null`, which has no primitive form.
pub fn primitive_from_json(value: serde_json::Value) -> Result<Primitive, LoadError> {
    match value {
        serde_json::Value::Null => {
            Err(LoadError::Invalid("null is not a supported configuration value".to_string()))
        }
        serde_json::Value::Bool(flag) => Ok(Primitive::Boolean(flag)),
        serde_json::Value::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(integer), _) => Ok(Primitive::Integer(integer)),
            (None, Some(float)) => Ok(Primitive::Float(float)),
            (None, None) => Err(LoadError::Invalid(format!("unsupported number {number}"))),
        },
        serde_json::Value::String(text) => Ok(Primitive::String(text)),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(primitive_from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Primitive::Array),
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(key, item)| primitive_from_json(item).map(|item| (key, item)))
            .collect::<Result<PrimitiveMap, _>>()
            .map(Primitive::Table),
    }
}

// ============================================================================
// SECTION: Text Parsing
// ============================================================================

/// Parses TOML document text.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] on TOML syntax errors.
pub fn parse_toml_str(text: &str) -> Result<PrimitiveMap, LoadError> {
    let table: toml::Table = toml::from_str(text).map_err(|err| LoadError::Parse(err.to_string()))?;
    Ok(table.into_iter().map(|(key, value)| (key, primitive_from_toml(value))).collect())
}

/// Parses JSON document text; the top level must be an object.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] on JSON syntax errors and
/// [`LoadError::Invalid`] when the document is not an object or holds `null`.
pub fn parse_json_str(text: &str) -> Result<PrimitiveMap, LoadError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|err| LoadError::Parse(err.to_string()))?;
    match primitive_from_json(value)? {
        Primitive::Table(map) => Ok(map),
        other => Err(LoadError::Invalid(format!(
            "document must be a table, found {}",
            other.kind()
        ))),
    }
}

// ============================================================================
// SECTION: Files
// ============================================================================

/// Reads and parses a document file.
///
/// Files ending in `.json` are parsed as JSON; everything else as TOML.
///
/// # Errors
///
/// Returns [`LoadError`] when the path or size limits are exceeded, the file
/// cannot be read, is not UTF-8, or does not parse.
pub fn read_document(path: &Path) -> Result<PrimitiveMap, LoadError> {
    validate_path(path)?;
    let bytes = fs::read(path).map_err(|err| LoadError::Io(err.to_string()))?;
    if bytes.len() > MAX_DOCUMENT_SIZE {
        return Err(LoadError::Invalid("config file exceeds size limit".to_string()));
    }
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| LoadError::Invalid("config file must be utf-8".to_string()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read configuration document");
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json { parse_json_str(content) } else { parse_toml_str(content) }
}

/// Reads `path` and merges it into `namespace`.
///
/// The namespace is consumed even on failure; read the document with
/// [`read_document`] and call [`SchemaTable::parse_into`] to keep it.
///
/// # Errors
///
/// Returns [`LoadError`] when reading fails or the document does not match
/// the schema under `mode`.
pub fn load_toml<N: Namespace>(
    table: &SchemaTable,
    path: &Path,
    namespace: N,
    mode: ErrorMode,
) -> Result<N, LoadError> {
    let data = read_document(path)?;
    Ok(table.parse_data(data, namespace, mode)?)
}

/// Reads `path` into a fresh record from the table's factory.
///
/// # Errors
///
/// Same as [`load_toml`].
pub fn load_fresh(table: &SchemaTable, path: &Path, mode: ErrorMode) -> Result<Record, LoadError> {
    load_toml(table, path, table.instantiate(), mode)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates a document path against length limits.
fn validate_path(path: &Path) -> Result<(), LoadError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(LoadError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(LoadError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use super::*;

    #[test]
    fn validate_path_accepts_ordinary_paths() {
        assert!(validate_path(Path::new("./config/settings.toml")).is_ok());
    }

    #[test]
    fn validate_path_rejects_long_components() {
        let name = "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1);
        let result = validate_path(Path::new(&name));
        assert!(result.unwrap_err().to_string().contains("component too long"));
    }

    #[test]
    fn validate_path_rejects_long_paths() {
        let path = ["a"; MAX_TOTAL_PATH_LENGTH].join("/");
        let result = validate_path(Path::new(&path));
        assert!(result.unwrap_err().to_string().contains("max length"));
    }

    #[test]
    fn toml_datetimes_become_strings() {
        let map = parse_toml_str("when = 1979-05-27T07:32:00Z\n").unwrap();
        assert_eq!(map.get("when"), Some(&Primitive::from("1979-05-27T07:32:00Z")));
    }
}
