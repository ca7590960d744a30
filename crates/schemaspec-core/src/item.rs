// crates/schemaspec-core/src/item.rs
// ============================================================================
// Module: Schema Items
// Description: Named, typed, defaulted, documented configuration leaves.
// Purpose: Apply first-match-wins adapter dispatch and render item help.
// Dependencies: crate::{adapter, error, primitive, text, value}
// ============================================================================

//! ## Overview
//! A [`SchemaItem`] owns an ordered list of candidate adapters. Conversion and
//! export try each adapter in order and the first success wins, so the list
//! doubles as a priority list when more than one adapter could accept a value.

use crate::adapter::AdapterRef;
use crate::error::SchemaError;
use crate::error::SchemaResult;
use crate::primitive::Primitive;
use crate::text;
use crate::value::Value;

// ============================================================================
// SECTION: Schema Item
// ============================================================================

/// Configuration leaf: candidate adapters, default value, description.
///
/// # Invariants
/// - `default_value` is exportable by at least one adapter.
#[derive(Debug, Clone)]
pub struct SchemaItem {
    /// Name of this item, excluding parent tables.
    short_name: String,
    /// Candidate adapters in priority order.
    possible_values: Vec<AdapterRef>,
    /// Value applied when input and namespace are both silent.
    default_value: Value,
    /// Human description rendered in help text.
    description: String,
}

impl SchemaItem {
    /// Creates an item, checking that the default can be exported.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Construction`] when no adapter is given or when
    /// none of them can export `default_value`.
    pub fn new(
        short_name: impl Into<String>,
        possible_values: Vec<AdapterRef>,
        default_value: impl Into<Value>,
        description: impl Into<String>,
    ) -> SchemaResult<Self> {
        let item = Self {
            short_name: short_name.into(),
            possible_values,
            default_value: default_value.into(),
            description: description.into(),
        };
        if item.possible_values.is_empty() {
            return Err(SchemaError::construction(format!(
                "item '{}' declares no possible values",
                item.short_name
            )));
        }
        if item.export(&item.default_value).is_none() {
            return Err(SchemaError::construction(format!(
                "default value of item '{}' cannot be exported as {}",
                item.short_name,
                item.type_specs()
            )));
        }
        Ok(item)
    }

    /// Returns the item name, excluding parent tables.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Returns the candidate adapters in priority order.
    #[must_use]
    pub fn possible_values(&self) -> &[AdapterRef] {
        &self.possible_values
    }

    /// Returns the default value.
    #[must_use]
    pub const fn default_value(&self) -> &Value {
        &self.default_value
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Renders `value` with the first adapter able to export it.
    ///
    /// Returns `None` when no adapter accepts the value, which means the value
    /// does not match this item's own declaration.
    #[must_use]
    pub fn export(&self, value: &Value) -> Option<String> {
        self.possible_values.iter().find_map(|adapter| adapter.export(value))
    }

    /// Converts `primitive` with the first adapter able to convert it.
    #[must_use]
    pub fn convert(&self, primitive: &Primitive) -> Option<Value> {
        self.possible_values.iter().find_map(|adapter| adapter.convert(primitive))
    }

    /// Returns true when any adapter accepts `value`.
    #[must_use]
    pub fn is_valid(&self, value: &Value) -> bool {
        self.possible_values.iter().any(|adapter| adapter.is_valid(value))
    }

    /// Joined grammar fragments of every adapter.
    #[must_use]
    pub fn type_specs(&self) -> String {
        self.possible_values
            .iter()
            .map(|adapter| adapter.type_spec())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// One-line usage: `name = spec | spec`.
    #[must_use]
    pub fn usage_str(&self) -> String {
        format!("{} = {}", self.short_name, self.type_specs())
    }

    /// Usage line followed by the wrapped description and the default value,
    /// indented beneath the usage line.
    #[must_use]
    pub fn help_str(&self) -> String {
        let mut lines = vec![self.usage_str()];
        for line in text::wrap_paragraphs(&self.description, text::WRAP_WIDTH) {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{}{line}", text::HELP_INDENT));
            }
        }
        let default = self.export(&self.default_value).unwrap_or_default();
        lines.push(format!("{}Default: {default}", text::HELP_INDENT));
        lines.join("\n")
    }
}
