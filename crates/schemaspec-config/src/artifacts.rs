// crates/schemaspec-config/src/artifacts.rs
// ============================================================================
// Module: Default Config Artifacts
// Description: Generated default configuration files and help text.
// Purpose: Keep committed default configs in sync with the schema.
// Dependencies: schemaspec-core, thiserror, tracing
// ============================================================================

//! ## Overview
//! A schema's defaults rendered through `format_export` form a complete,
//! reloadable configuration file. This module writes that file and verifies a
//! committed copy against a fresh rendering, so schema changes that are not
//! reflected in the committed file surface as drift.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use schemaspec_core::ExportOptions;
use schemaspec_core::SchemaError;
use schemaspec_core::SchemaTable;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when generating or verifying default config artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// IO failure while reading or writing the artifact.
    #[error("artifact io error: {0}")]
    Io(String),
    /// The schema could not render its own defaults.
    #[error("artifact schema error: {0}")]
    Schema(#[from] SchemaError),
    /// Generated artifact does not match the committed file.
    #[error("artifact drift: {0}")]
    Drift(String),
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Renders the table's defaults as a configuration file.
///
/// # Errors
///
/// Returns [`ArtifactError::Schema`] when a selector is unknown or a default
/// cannot be rendered.
pub fn render_default_config(
    table: &SchemaTable,
    options: &ExportOptions,
) -> Result<String, ArtifactError> {
    let mut out = table.export_with(&table.defaults(), options)?;
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Renders the table's help text with a trailing newline.
#[must_use]
pub fn render_help(table: &SchemaTable) -> String {
    let mut out = table.help_str();
    out.push('\n');
    out
}

/// Writes the rendered defaults to `path`.
///
/// # Errors
///
/// Returns [`ArtifactError`] when rendering or file output fails.
pub fn write_default_config(
    table: &SchemaTable,
    path: &Path,
    options: &ExportOptions,
) -> Result<(), ArtifactError> {
    let content = render_default_config(table, options)?;
    fs::write(path, content.as_bytes()).map_err(|err| ArtifactError::Io(err.to_string()))?;
    debug!(path = %path.display(), bytes = content.len(), "wrote default configuration");
    Ok(())
}

/// Verifies the file at `path` matches the rendered defaults.
///
/// # Errors
///
/// Returns [`ArtifactError::Drift`] when the file differs.
pub fn verify_default_config(
    table: &SchemaTable,
    path: &Path,
    options: &ExportOptions,
) -> Result<(), ArtifactError> {
    let content = render_default_config(table, options)?;
    let existing = fs::read_to_string(path).map_err(|err| ArtifactError::Io(err.to_string()))?;
    if existing != content {
        return Err(ArtifactError::Drift(format!("default config mismatch: {}", path.display())));
    }
    Ok(())
}
