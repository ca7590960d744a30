// crates/schemaspec-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and schema fixtures for core tests.
// ============================================================================
//! ## Overview
//! Shared test helpers for Result-based assertions plus the schemas most
//! integration tests exercise.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]
#![allow(dead_code, reason = "Each test binary uses a subset of the shared helpers.")]

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use schemaspec_core::BoolAdapter;
use schemaspec_core::IntAdapter;
use schemaspec_core::PathAdapter;
use schemaspec_core::PrimitiveMap;
use schemaspec_core::Record;
use schemaspec_core::SchemaResult;
use schemaspec_core::SchemaTable;
use schemaspec_core::StringAdapter;
use schemaspec_core::TableBuilder;
use schemaspec_core::adapters;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across core integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl TestError {
    /// Creates a new test error with the provided message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition { Ok(()) } else { Err(Box::new(TestError::new(message))) }
}

// ========================================================================
// Documents
// ========================================================================

/// Parses TOML text straight into primitives through serde.
pub fn toml_map(text: &str) -> TestResult<PrimitiveMap> {
    Ok(toml::from_str::<PrimitiveMap>(text)?)
}

// ========================================================================
// Fixtures
// ========================================================================

/// Long description used to exercise wrapping.
pub fn alpha_description() -> String {
    format!("blurd blahd\nbloo blow\n{}", "word ".repeat(30))
}

/// Default install path of the preset game.
pub fn strive_path() -> PathBuf {
    PathBuf::from("~/.steam/root/steamapps/common/GUILTY GEAR STRIVE/")
}

/// Launcher settings: paths, strings, nested tables, a preset factory, and an
/// item accepting either `false` or a path.
pub fn settings_schema() -> SchemaResult<SchemaTable> {
    let disabled = BoolAdapter::with_choices([false])?;
    TableBuilder::root("")
        .item("mods_home", adapters![PathAdapter::new()], PathBuf::from("mods/home"), "")
        .item("alpha", adapters![StringAdapter::new()], "enabled", alpha_description())
        .table("default_game", "", |game| {
            game.item("name", adapters![StringAdapter::new()], "Guilty Gear Strive", "")
                .item("enabled", adapters![BoolAdapter::new()], true, "")
        })
        .table("games", "", |games| {
            games.table_with_factory(
                "guilty_gear_strive",
                "",
                || Record::new().with("name", "guilty_gear_strive"),
                |strive| {
                    strive
                        .item("name", adapters![StringAdapter::new()], "Guilty Gear Strive", "")
                        .item(
                            "game_path",
                            adapters![disabled, PathAdapter::new()],
                            strive_path(),
                            "",
                        )
                },
            )
        })
        .build()
}

/// Small documented schema: one root item and one table with a restricted
/// string.
pub fn demo_schema() -> SchemaResult<SchemaTable> {
    let level = StringAdapter::with_choices(["info", "debug"])?;
    TableBuilder::root("Demo settings")
        .item("port", adapters![IntAdapter::new()], 8080, "Port to listen on.")
        .table("log", "Logging", |log| log.item("level", adapters![level], "info", ""))
        .build()
}
