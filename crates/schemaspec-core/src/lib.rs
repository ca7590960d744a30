// crates/schemaspec-core/src/lib.rs
// ============================================================================
// Module: Schemaspec Core
// Description: Recursive configuration schema engine.
// Purpose: Bind typed configuration trees to untyped documents and back.
// Dependencies: crate::{adapter, builder, engine, error, item, primitive, table, text, value}
// ============================================================================

//! ## Overview
//! A schema is a tree of [`SchemaTable`]s whose leaves are [`SchemaItem`]s.
//! Each item lists candidate [`TypeAdapter`]s, a default, and a description.
//! [`SchemaTable::parse_data`] validates and merges an untyped
//! [`PrimitiveMap`] into a [`Namespace`] under an [`ErrorMode`], and
//! [`SchemaTable::format_export`] renders a namespace back to documented TOML
//! that reloads to the same values.
//!
//! The crate performs no I/O; see `schemaspec-config` for document loading.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod adapter;
pub mod builder;
pub mod engine;
pub mod error;
pub mod item;
pub mod primitive;
pub mod table;
pub mod value;

mod text;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use adapter::AdapterRef;
pub use adapter::BoolAdapter;
pub use adapter::ChoiceAdapter;
pub use adapter::FloatAdapter;
pub use adapter::IntAdapter;
pub use adapter::ListAdapter;
pub use adapter::PathAdapter;
pub use adapter::Scalar;
pub use adapter::StringAdapter;
pub use adapter::TypeAdapter;
pub use builder::TableBuilder;
pub use engine::ErrorMode;
pub use engine::ExportOptions;
pub use error::ErrorKind;
pub use error::SchemaError;
pub use error::SchemaResult;
pub use item::SchemaItem;
pub use primitive::Primitive;
pub use primitive::PrimitiveMap;
pub use table::RecordFactory;
pub use table::SchemaTable;
pub use value::Namespace;
pub use value::Record;
pub use value::Value;
