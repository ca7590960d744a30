// crates/schemaspec-config/src/lib.rs
// ============================================================================
// Module: Schemaspec Config Library
// Description: Document loading and generated artifacts for schema tables.
// Purpose: Connect schemaspec-core tables to files on disk.
// Dependencies: schemaspec-core, serde_json, toml
// ============================================================================

//! ## Overview
//! `schemaspec-config` reads TOML and JSON documents into the primitive tree
//! that [`schemaspec_core::SchemaTable::parse_data`] consumes, and generates
//! default configuration files with drift verification.
//!
//! Security posture: documents are untrusted; loading fails closed on size,
//! path, encoding and schema violations.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifacts;
pub mod load;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use artifacts::ArtifactError;
pub use artifacts::render_default_config;
pub use artifacts::render_help;
pub use artifacts::verify_default_config;
pub use artifacts::write_default_config;
pub use load::LoadError;
pub use load::load_fresh;
pub use load::load_toml;
pub use load::parse_json_str;
pub use load::parse_toml_str;
pub use load::primitive_from_json;
pub use load::primitive_from_toml;
pub use load::read_document;
