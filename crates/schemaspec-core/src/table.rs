// crates/schemaspec-core/src/table.rs
// ============================================================================
// Module: Schema Tables
// Description: Named nodes holding ordered items and child tables.
// Purpose: Structural construction API, help rendering, inline-table adapter.
// Dependencies: crate::{adapter, error, item, primitive, text, value}
// ============================================================================

//! ## Overview
//! A [`SchemaTable`] owns its items and subtables in declaration order. Tables
//! are built once through [`SchemaTable::add_item`] and
//! [`SchemaTable::add_subtable`] (or [`crate::TableBuilder`]) and are then
//! read-only: parsing and export never mutate the schema, so one table can
//! serve any number of independent calls.
//!
//! A table is also a [`TypeAdapter`] over a whole record, which lets a table be
//! used as an inline value of an item.

use std::fmt;
use std::sync::Arc;

use crate::adapter::AdapterRef;
use crate::adapter::TypeAdapter;
use crate::engine::ErrorMode;
use crate::error::SchemaError;
use crate::error::SchemaResult;
use crate::item::SchemaItem;
use crate::primitive::Primitive;
use crate::text;
use crate::value::Namespace;
use crate::value::Record;
use crate::value::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name used for the root table in diagnostics.
pub(crate) const ROOT_NAME: &str = "root";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Shared constructor for fresh records of a table.
///
/// Must be side-effect free; it runs whenever a fresh instance is needed.
pub type RecordFactory = Arc<dyn Fn() -> Record + Send + Sync>;

/// Named node of items and nested tables.
///
/// # Invariants
/// - `full_name` is `parent.full_name + "." + name`, or `name` under the root;
///   the root has an empty name.
/// - Item and subtable names are disjoint, non-empty and contain no dot.
/// - Items and subtables keep declaration order.
#[derive(Clone)]
pub struct SchemaTable {
    /// Name within the parent table; empty for the root.
    name: String,
    /// Dotted path from the root; empty for the root.
    full_name: String,
    /// Human description rendered in help text.
    description: String,
    /// Items in declaration order.
    items: Vec<SchemaItem>,
    /// Subtables in declaration order.
    subtables: Vec<SchemaTable>,
    /// Constructor for fresh records.
    factory: RecordFactory,
}

impl SchemaTable {
    // ========================================================================
    // SECTION: Construction
    // ========================================================================

    /// Creates a root table whose fresh records start empty.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_factory(description, Record::new)
    }

    /// Creates a root table with a custom record factory.
    #[must_use]
    pub fn with_factory(
        description: impl Into<String>,
        factory: impl Fn() -> Record + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: String::new(),
            full_name: String::new(),
            description: description.into(),
            items: Vec::new(),
            subtables: Vec::new(),
            factory: Arc::new(factory),
        }
    }

    /// Creates a detached child table of `self` named `name`.
    pub(crate) fn child(
        &self,
        name: &str,
        description: impl Into<String>,
        factory: RecordFactory,
    ) -> Self {
        Self {
            name: name.to_string(),
            full_name: self.fullname_of(name),
            description: description.into(),
            items: Vec::new(),
            subtables: Vec::new(),
            factory,
        }
    }

    /// Replaces the record factory.
    pub(crate) fn set_factory(&mut self, factory: RecordFactory) {
        self.factory = factory;
    }

    /// Registers an item, replacing any item of the same name in place.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Construction`] when the name is invalid, already
    /// names a subtable, or the default cannot be exported.
    pub fn add_item(
        &mut self,
        name: &str,
        possible_values: Vec<AdapterRef>,
        default: impl Into<Value>,
        description: impl Into<String>,
    ) -> SchemaResult<()> {
        self.check_name(name)?;
        if self.subtable(name).is_some() {
            return Err(SchemaError::construction(format!(
                "'{}' is already a subtable",
                self.fullname_of(name)
            )));
        }
        let item = SchemaItem::new(name, possible_values, default, description)?;
        match self.items.iter_mut().find(|existing| existing.short_name() == name) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        Ok(())
    }

    /// Creates a child table with an empty-record factory and returns it for
    /// further population.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Construction`] when the name is invalid or
    /// already names an item.
    pub fn add_subtable(
        &mut self,
        name: &str,
        description: impl Into<String>,
    ) -> SchemaResult<&mut Self> {
        self.add_subtable_with_factory(name, description, Record::new)
    }

    /// Creates a child table with a custom record factory.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Construction`] when the name is invalid or
    /// already names an item.
    pub fn add_subtable_with_factory(
        &mut self,
        name: &str,
        description: impl Into<String>,
        factory: impl Fn() -> Record + Send + Sync + 'static,
    ) -> SchemaResult<&mut Self> {
        let child = self.child(name, description, Arc::new(factory));
        self.attach(child)
    }

    /// Registers a child built with [`SchemaTable::child`], replacing any
    /// subtable of the same name in place.
    pub(crate) fn attach(&mut self, child: Self) -> SchemaResult<&mut Self> {
        self.check_name(&child.name)?;
        if self.item(&child.name).is_some() {
            return Err(SchemaError::construction(format!(
                "'{}' is already an item",
                child.full_name
            )));
        }
        let index = match self.subtables.iter().position(|existing| existing.name == child.name) {
            Some(index) => {
                self.subtables[index] = child;
                index
            }
            None => {
                self.subtables.push(child);
                self.subtables.len() - 1
            }
        };
        Ok(&mut self.subtables[index])
    }

    /// Rejects names that cannot be addressed by a dotted selector.
    fn check_name(&self, name: &str) -> SchemaResult<()> {
        if name.is_empty() || name.contains('.') {
            return Err(SchemaError::construction(format!(
                "invalid name '{name}' in {} table: names must be non-empty and dot-free",
                self.display_name()
            )));
        }
        Ok(())
    }

    // ========================================================================
    // SECTION: Accessors
    // ========================================================================

    /// Returns the name within the parent table (empty for the root).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the dotted path from the root (empty for the root).
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns true for the root table.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.full_name.is_empty()
    }

    /// Looks up an item by name.
    #[must_use]
    pub fn item(&self, name: &str) -> Option<&SchemaItem> {
        self.items.iter().find(|item| item.short_name() == name)
    }

    /// Looks up a subtable by name.
    #[must_use]
    pub fn subtable(&self, name: &str) -> Option<&Self> {
        self.subtables.iter().find(|table| table.name == name)
    }

    /// Items in declaration order.
    #[must_use]
    pub fn items(&self) -> &[SchemaItem] {
        &self.items
    }

    /// Subtables in declaration order.
    #[must_use]
    pub fn subtables(&self) -> &[Self] {
        &self.subtables
    }

    /// Dotted name of a child of this table.
    #[must_use]
    pub fn fullname_of(&self, name: &str) -> String {
        if self.full_name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.full_name)
        }
    }

    /// Table name used in diagnostics: the full name, or `root`.
    pub(crate) fn display_name(&self) -> &str {
        if self.full_name.is_empty() { ROOT_NAME } else { &self.full_name }
    }

    // ========================================================================
    // SECTION: Instances
    // ========================================================================

    /// Returns a fresh record from the factory.
    #[must_use]
    pub fn instantiate(&self) -> Record {
        (self.factory)()
    }

    /// Returns a fresh record with every unset field filled with its default,
    /// recursively.
    #[must_use]
    pub fn defaults(&self) -> Record {
        let mut record = self.instantiate();
        self.fill_defaults(&mut record);
        record
    }

    /// Sets every unset item to its default and recurses into subtables.
    fn fill_defaults(&self, namespace: &mut dyn Namespace) {
        for item in &self.items {
            if !namespace.contains(item.short_name()) {
                namespace.set(item.short_name(), item.default_value().clone());
            }
        }
        for subtable in &self.subtables {
            let mut record = match namespace.get(&subtable.name) {
                Some(Value::Table(record)) => record,
                _ => subtable.instantiate(),
            };
            subtable.fill_defaults(&mut record);
            namespace.set(&subtable.name, Value::Table(record));
        }
    }

    // ========================================================================
    // SECTION: Help
    // ========================================================================

    /// Header and description, then every item's help, then every subtable's
    /// help, with blank lines between sections.
    #[must_use]
    pub fn help_str(&self) -> String {
        let mut sections = Vec::new();
        let mut top = Vec::new();
        if !self.full_name.is_empty() {
            top.push(format!("[{}]", self.full_name));
        }
        if !self.description.is_empty() {
            top.push(self.description.clone());
        }
        if !top.is_empty() {
            sections.push(top.join("\n"));
        }
        let items = self.items.iter().map(SchemaItem::help_str).collect::<Vec<_>>().join("\n\n");
        if !items.is_empty() {
            sections.push(items);
        }
        let subtables = self.subtables.iter().map(Self::help_str).collect::<Vec<_>>().join("\n\n");
        if !subtables.is_empty() {
            sections.push(subtables);
        }
        sections.join("\n\n")
    }
}

impl fmt::Debug for SchemaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaTable")
            .field("full_name", &self.full_name)
            .field("description", &self.description)
            .field("items", &self.items)
            .field("subtables", &self.subtables)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SchemaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.help_str())
    }
}

// ============================================================================
// SECTION: Inline Table Adapter
// ============================================================================

impl TypeAdapter for SchemaTable {
    fn type_spec(&self) -> String {
        let entries = self
            .items
            .iter()
            .map(|item| format!("{} = {}", text::key(item.short_name()), item.type_specs()))
            .chain(
                self.subtables
                    .iter()
                    .map(|table| format!("{} = {}", text::key(&table.name), table.type_spec())),
            )
            .collect::<Vec<_>>();
        if entries.is_empty() { "{}".to_string() } else { format!("{{ {} }}", entries.join(", ")) }
    }

    fn is_valid(&self, value: &Value) -> bool {
        let Some(record) = value.as_table() else {
            return false;
        };
        record.len() == self.items.len() + self.subtables.len()
            && self.items.iter().all(|item| {
                record.field(item.short_name()).is_some_and(|field| item.is_valid(field))
            })
            && self.subtables.iter().all(|table| {
                record.field(&table.name).is_some_and(|field| table.is_valid(field))
            })
    }

    fn export(&self, value: &Value) -> Option<String> {
        if !self.is_valid(value) {
            return None;
        }
        let record = value.as_table()?;
        let mut entries = Vec::with_capacity(self.items.len() + self.subtables.len());
        for item in &self.items {
            let rendered = item.export(record.field(item.short_name())?)?;
            entries.push(format!("{} = {rendered}", text::key(item.short_name())));
        }
        for table in &self.subtables {
            let rendered = table.export(record.field(&table.name)?)?;
            entries.push(format!("{} = {rendered}", text::key(&table.name)));
        }
        if entries.is_empty() {
            Some("{}".to_string())
        } else {
            Some(format!("{{ {} }}", entries.join(", ")))
        }
    }

    fn convert(&self, primitive: &Primitive) -> Option<Value> {
        let data = primitive.as_table()?.clone();
        self.parse_data(data, self.instantiate(), ErrorMode::Fail).ok().map(Value::Table)
    }
}
