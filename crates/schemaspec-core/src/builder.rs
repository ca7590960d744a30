// crates/schemaspec-core/src/builder.rs
// ============================================================================
// Module: Schema Builders
// Description: Fluent construction of schema table trees.
// Purpose: Declare whole schemas as one expression with deferred error checks.
// Dependencies: crate::{adapter, error, table, value}
// ============================================================================

//! ## Overview
//! [`TableBuilder`] chains `item` and `table` calls and reports the first
//! construction error from [`TableBuilder::build`]. Nested tables are declared
//! with a closure that receives a builder for the child, so the source layout
//! mirrors the configuration layout.
//!
//! ```
//! use schemaspec_core::{adapters, IntAdapter, StringAdapter, TableBuilder};
//!
//! let table = TableBuilder::root("Server settings")
//!     .item("host", adapters![StringAdapter::new()], "localhost", "Bind address.")
//!     .table("limits", "Resource limits", |limits| {
//!         limits.item("connections", adapters![IntAdapter::new()], 64, "")
//!     })
//!     .build()?;
//! assert_eq!(table.subtables().len(), 1);
//! # Ok::<(), schemaspec_core::SchemaError>(())
//! ```

use std::sync::Arc;

use crate::adapter::AdapterRef;
use crate::error::SchemaError;
use crate::error::SchemaResult;
use crate::table::SchemaTable;
use crate::value::Record;
use crate::value::Value;

// ============================================================================
// SECTION: Table Builder
// ============================================================================

/// Fluent builder for [`SchemaTable`] trees.
///
/// Calls after the first failure are skipped; the failure is returned by
/// [`TableBuilder::build`].
#[derive(Debug)]
pub struct TableBuilder {
    /// Table under construction.
    table: SchemaTable,
    /// First construction error, if any.
    error: Option<SchemaError>,
}

impl TableBuilder {
    /// Starts a root table.
    #[must_use]
    pub fn root(description: impl Into<String>) -> Self {
        Self::from_table(SchemaTable::new(description))
    }

    /// Wraps a table for further population.
    const fn from_table(table: SchemaTable) -> Self {
        Self {
            table,
            error: None,
        }
    }

    /// Sets the record factory of the table under construction.
    #[must_use]
    pub fn factory(mut self, factory: impl Fn() -> Record + Send + Sync + 'static) -> Self {
        self.table.set_factory(Arc::new(factory));
        self
    }

    /// Declares an item.
    #[must_use]
    pub fn item(
        mut self,
        name: &str,
        possible_values: Vec<AdapterRef>,
        default: impl Into<Value>,
        description: impl Into<String>,
    ) -> Self {
        if self.error.is_none() {
            let result = self.table.add_item(name, possible_values, default, description);
            self.record(result);
        }
        self
    }

    /// Declares a subtable populated by `build`.
    #[must_use]
    pub fn table(
        self,
        name: &str,
        description: impl Into<String>,
        build: impl FnOnce(Self) -> Self,
    ) -> Self {
        self.table_with_factory(name, description, Record::new, build)
    }

    /// Declares a subtable with a custom record factory.
    #[must_use]
    pub fn table_with_factory(
        mut self,
        name: &str,
        description: impl Into<String>,
        factory: impl Fn() -> Record + Send + Sync + 'static,
        build: impl FnOnce(Self) -> Self,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        let child = self.table.child(name, description, Arc::new(factory));
        let result = build(Self::from_table(child))
            .build()
            .and_then(|child| self.table.attach(child).map(|_| ()));
        self.record(result);
        self
    }

    /// Finishes the table.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError::Construction`] raised by any call.
    pub fn build(self) -> SchemaResult<SchemaTable> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.table),
        }
    }

    /// Keeps the first error.
    fn record(&mut self, result: SchemaResult<()>) {
        if let Err(error) = result
            && self.error.is_none()
        {
            self.error = Some(error);
        }
    }
}
