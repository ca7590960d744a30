// crates/schemaspec-config/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and schema fixtures for config tests.
// ============================================================================
//! ## Overview
//! Shared test helpers for Result-based assertions and a sample schema.

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
use schemaspec_core::FloatAdapter;
use schemaspec_core::IntAdapter;
use schemaspec_core::ListAdapter;
use schemaspec_core::PathAdapter;
use schemaspec_core::SchemaResult;
use schemaspec_core::SchemaTable;
use schemaspec_core::StringAdapter;
use schemaspec_core::TableBuilder;
use schemaspec_core::Value;
use schemaspec_core::adapters;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across config integration tests.
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
// Fixtures
// ========================================================================

/// Service schema covering every adapter kind.
pub fn service_schema() -> SchemaResult<SchemaTable> {
    let mode = StringAdapter::with_choices(["fast", "safe"])?;
    TableBuilder::root("Service configuration")
        .item("name", adapters![StringAdapter::new()], "svc", "Service name.")
        .item("workers", adapters![IntAdapter::new()], 4, "Worker threads.")
        .item("ratio", adapters![FloatAdapter::new()], 0.5, "")
        .table("storage", "Storage backend", |storage| {
            storage
                .item("root", adapters![PathAdapter::new()], PathBuf::from("data"), "")
                .item("mode", adapters![mode], "safe", "Durability mode.")
                .item("compress", adapters![BoolAdapter::new()], false, "")
        })
        .table("peers", "", |peers| {
            peers.item(
                "hosts",
                adapters![ListAdapter::new(StringAdapter::new())],
                Value::List(Vec::new()),
                "",
            )
        })
        .build()
}
