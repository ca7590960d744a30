// crates/schemaspec-core/src/error.rs
// ============================================================================
// Module: Schema Error Definitions
// Description: Closed error taxonomy for schema construction, parsing, export.
// Purpose: Give callers structured, actionable diagnostics for every failure.
// Dependencies: thiserror, crate::primitive
// ============================================================================

//! ## Overview
//! Every failure the engine can report is a [`SchemaError`]. Variants fall into
//! five kinds (see [`ErrorKind`]): construction errors surface while a schema is
//! being built, conversion errors are recoverable through
//! [`crate::ErrorMode`], structural and lookup errors are always fatal, and
//! export errors flag namespace values that do not match their own schema.

use thiserror::Error;

use crate::primitive::Primitive;

// ============================================================================
// SECTION: Error Kinds
// ============================================================================

/// Coarse classification of a [`SchemaError`].
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Schema could not be built.
    Construction,
    /// An input value matched no candidate adapter.
    Conversion,
    /// Input shape does not match the declared tree.
    Structural,
    /// Export selector names an undeclared child.
    Lookup,
    /// Namespace value cannot be rendered by its item.
    Export,
}

impl ErrorKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Construction => "construction",
            Self::Conversion => "conversion",
            Self::Structural => "structural",
            Self::Lookup => "lookup",
            Self::Export => "export",
        }
    }
}

// ============================================================================
// SECTION: Schema Error
// ============================================================================

/// Errors raised while building, parsing against, or exporting a schema.
///
/// # Invariants
/// - `table` fields hold a dotted table name, or `root` for the root table.
/// - `field` fields hold the full dotted name of an item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Schema definition is invalid.
    #[error("schema construction error: {0}")]
    Construction(String),
    /// Input value could not be converted by any adapter of the item.
    #[error(
        "{field} in {table} table cannot convert '{value}' to an appropriate \
         value.\n\nHelp:\n{help}"
    )]
    Conversion {
        /// Full dotted name of the item.
        field: String,
        /// Table owning the item.
        table: String,
        /// Rejected raw input.
        value: Primitive,
        /// Item help text.
        help: String,
    },
    /// A subtable key holds something other than a mapping.
    #[error("schema expects table \"{table}\" to be a mapping")]
    NotATable {
        /// Full dotted name of the subtable.
        table: String,
    },
    /// Input holds keys the schema does not declare.
    #[error("unexpected keys in {table} table: {}", keys.join(", "))]
    UnexpectedKeys {
        /// Table that received the keys.
        table: String,
        /// Undeclared keys, sorted.
        keys: Vec<String>,
    },
    /// Export selector names a child the table does not declare.
    #[error("schema table {table} does not have a child '{key}'")]
    Lookup {
        /// Table that was searched.
        table: String,
        /// Selector that failed to resolve.
        key: String,
    },
    /// Namespace value cannot be exported by its item.
    #[error("cannot export {field}: {reason}")]
    Export {
        /// Full dotted name of the item.
        field: String,
        /// Why the value could not be rendered.
        reason: String,
    },
}

impl SchemaError {
    /// Creates a construction error with a custom message.
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction(message.into())
    }

    /// Returns the coarse kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Construction(_) => ErrorKind::Construction,
            Self::Conversion {
                ..
            } => ErrorKind::Conversion,
            Self::NotATable {
                ..
            }
            | Self::UnexpectedKeys {
                ..
            } => ErrorKind::Structural,
            Self::Lookup {
                ..
            } => ErrorKind::Lookup,
            Self::Export {
                ..
            } => ErrorKind::Export,
        }
    }

    /// Returns true when an [`crate::ErrorMode`] other than `Fail` could have
    /// recovered from this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Conversion)
    }
}

// ============================================================================
// SECTION: Result Alias
// ============================================================================

/// Convenient Result type for schema operations.
pub type SchemaResult<T = ()> = Result<T, SchemaError>;
