// crates/schemaspec-core/src/engine.rs
// ============================================================================
// Module: Parse and Export Engine
// Description: Merge input into namespaces; render namespaces as TOML text.
// Purpose: The two whole-tree operations of a schema table.
// Dependencies: serde, tracing, crate::{error, item, primitive, table, value}
// ============================================================================

//! ## Overview
//! [`SchemaTable::parse_data`] walks a table top-down: items first, then
//! subtables, in declaration order. Input keys are consumed as they are
//! matched, so anything left over is an undeclared key and the parse fails.
//! Conversion failures are routed through an [`ErrorMode`]; structural
//! failures are always fatal.
//!
//! [`SchemaTable::format_export`] is the inverse: it renders the selected part
//! of a namespace as TOML that reloads to the same values, optionally with the
//! schema help embedded as comments.
//!
//! Security posture: input documents are untrusted; every key is matched
//! against the declared tree and nothing undeclared is accepted.

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::error::SchemaError;
use crate::error::SchemaResult;
use crate::item::SchemaItem;
use crate::primitive::Primitive;
use crate::primitive::PrimitiveMap;
use crate::table::SchemaTable;
use crate::text;
use crate::value::Namespace;
use crate::value::Record;
use crate::value::Value;

// ============================================================================
// SECTION: Error Mode
// ============================================================================

/// Policy applied when an input value matches none of an item's adapters.
///
/// Structural errors (non-table subtable input, undeclared keys) ignore the
/// mode and always fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Abort with [`SchemaError::Conversion`].
    #[default]
    Fail,
    /// Leave the field exactly as it was, set or unset.
    Ignore,
    /// Set the field to [`Value::None`].
    SetNone,
    /// Set the field to the item default.
    SetDefault,
    /// Remove the field if present.
    Remove,
}

impl ErrorMode {
    /// Returns a stable label for the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Ignore => "ignore",
            Self::SetNone => "set_none",
            Self::SetDefault => "set_default",
            Self::Remove => "remove",
        }
    }
}

// ============================================================================
// SECTION: Export Options
// ============================================================================

/// Options for [`SchemaTable::export_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Dotted selectors; empty exports the whole table.
    pub keys: Vec<String>,
    /// Write items with their full dotted names and no table headers.
    pub use_fullname: bool,
    /// Embed item and table help as comments.
    pub show_help: bool,
}

impl ExportOptions {
    /// Returns options that export only `keys`.
    #[must_use]
    pub fn keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Returns options with full dotted item names.
    #[must_use]
    pub fn use_fullname(mut self, enabled: bool) -> Self {
        self.use_fullname = enabled;
        self
    }

    /// Returns options with embedded help comments.
    #[must_use]
    pub fn show_help(mut self, enabled: bool) -> Self {
        self.show_help = enabled;
        self
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

impl SchemaTable {
    /// Merges `data` into `namespace` and returns the namespace.
    ///
    /// Input values override existing fields; fields absent from the input are
    /// defaulted only when the namespace does not already hold them.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Conversion`] under [`ErrorMode::Fail`],
    /// [`SchemaError::NotATable`] when a subtable key holds a non-mapping, and
    /// [`SchemaError::UnexpectedKeys`] when input keys are not declared. The
    /// namespace is consumed either way; use [`SchemaTable::parse_into`] to
    /// keep it on failure.
    pub fn parse_data<N: Namespace>(
        &self,
        data: PrimitiveMap,
        mut namespace: N,
        mode: ErrorMode,
    ) -> SchemaResult<N> {
        self.parse_into(data, &mut namespace, mode)?;
        Ok(namespace)
    }

    /// Merges `data` into a borrowed namespace.
    ///
    /// On error the namespace keeps every field merged before the failing
    /// one; nothing is rolled back.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaTable::parse_data`].
    pub fn parse_into(
        &self,
        mut data: PrimitiveMap,
        namespace: &mut dyn Namespace,
        mode: ErrorMode,
    ) -> SchemaResult<()> {
        self.merge(&mut data, namespace, mode)
    }

    /// Parses `data` into a fresh record from this table's factory.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaTable::parse_data`].
    pub fn parse_fresh(&self, data: PrimitiveMap, mode: ErrorMode) -> SchemaResult<Record> {
        self.parse_data(data, self.instantiate(), mode)
    }

    /// One level of the parse; consumes matched keys from `data`.
    fn merge(
        &self,
        data: &mut PrimitiveMap,
        namespace: &mut dyn Namespace,
        mode: ErrorMode,
    ) -> SchemaResult<()> {
        debug!(table = self.display_name(), keys = data.len(), "parsing table");
        for item in self.items() {
            let name = item.short_name();
            match data.remove(name) {
                Some(raw) => match item.convert(&raw) {
                    Some(value) => namespace.set(name, value),
                    None => self.recover(item, raw, namespace, mode)?,
                },
                None if !namespace.contains(name) => {
                    debug!(field = %self.fullname_of(name), "applying default");
                    namespace.set(name, item.default_value().clone());
                }
                None => {}
            }
        }
        for subtable in self.subtables() {
            let name = subtable.name();
            let mut subdata = match data.remove(name) {
                None => PrimitiveMap::new(),
                Some(Primitive::Table(map)) => map,
                Some(_) => {
                    return Err(SchemaError::NotATable {
                        table: subtable.full_name().to_string(),
                    });
                }
            };
            let mut record = match namespace.get(name) {
                Some(Value::Table(record)) => record,
                _ => subtable.instantiate(),
            };
            subtable.merge(&mut subdata, &mut record, mode)?;
            namespace.set(name, Value::Table(record));
        }
        if !data.is_empty() {
            return Err(SchemaError::UnexpectedKeys {
                table: self.display_name().to_string(),
                keys: data.keys().cloned().collect(),
            });
        }
        Ok(())
    }

    /// Applies `mode` to an item whose input matched no adapter.
    fn recover(
        &self,
        item: &SchemaItem,
        raw: Primitive,
        namespace: &mut dyn Namespace,
        mode: ErrorMode,
    ) -> SchemaResult<()> {
        let name = item.short_name();
        let field = self.fullname_of(name);
        match mode {
            ErrorMode::Fail => {
                return Err(SchemaError::Conversion {
                    field,
                    table: self.display_name().to_string(),
                    value: raw,
                    help: item.help_str(),
                });
            }
            ErrorMode::Ignore => {}
            ErrorMode::SetNone => namespace.set(name, Value::None),
            ErrorMode::SetDefault => namespace.set(name, item.default_value().clone()),
            ErrorMode::Remove => {
                namespace.remove(name);
            }
        }
        warn!(
            field = %field,
            table = self.display_name(),
            mode = mode.as_str(),
            value = %raw,
            "recovered from conversion failure"
        );
        Ok(())
    }
}

// ============================================================================
// SECTION: Export
// ============================================================================

impl SchemaTable {
    /// Renders the selected part of `namespace` as TOML.
    ///
    /// `keys` holds dotted selectors relative to this table; an empty slice
    /// selects every item and then every subtable.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Lookup`] when a selector names an undeclared
    /// child or continues past an item, and [`SchemaError::Export`] when a
    /// selected field is unset, `None`, or not exportable by its item.
    pub fn format_export<K: AsRef<str>>(
        &self,
        namespace: &dyn Namespace,
        keys: &[K],
        use_fullname: bool,
        show_help: bool,
    ) -> SchemaResult<String> {
        let selectors = keys.iter().map(AsRef::as_ref).collect::<Vec<_>>();
        let layout = Layout {
            use_fullname,
            show_help,
        };
        self.render(namespace, &selectors, layout)
    }

    /// [`SchemaTable::format_export`] driven by [`ExportOptions`].
    ///
    /// # Errors
    ///
    /// Same as [`SchemaTable::format_export`].
    pub fn export_with(
        &self,
        namespace: &dyn Namespace,
        options: &ExportOptions,
    ) -> SchemaResult<String> {
        self.format_export(namespace, &options.keys, options.use_fullname, options.show_help)
    }

    /// Renders one table level.
    fn render(
        &self,
        namespace: &dyn Namespace,
        selectors: &[&str],
        layout: Layout,
    ) -> SchemaResult<String> {
        let everything;
        let selectors = if selectors.is_empty() {
            everything = self
                .items()
                .iter()
                .map(SchemaItem::short_name)
                .chain(self.subtables().iter().map(Self::name))
                .collect::<Vec<_>>();
            everything.as_slice()
        } else {
            selectors
        };

        let selection = self.select(selectors)?;
        let mut entries = Vec::with_capacity(selection.items.len());
        for item in selection.items {
            entries.push(self.render_item(item, namespace, layout)?);
        }
        let mut blocks = Vec::with_capacity(selection.tables.len());
        for (subtable, nested) in selection.tables {
            let record = match namespace.get(subtable.name()) {
                Some(Value::Table(record)) => record,
                _ => {
                    return Err(SchemaError::Export {
                        field: subtable.full_name().to_string(),
                        reason: "table is not set".to_string(),
                    });
                }
            };
            let nested = nested.as_deref().unwrap_or(&[]);
            blocks.push(subtable.render(&record, nested, layout)?);
        }

        let separator = if layout.show_help { "\n\n" } else { "\n" };
        let mut sections = Vec::new();
        if !entries.is_empty() {
            sections.push(entries.join(separator));
        }
        sections.extend(blocks.into_iter().filter(|block| !block.is_empty()));
        let body = sections.join("\n\n");

        let mut out = if layout.use_fullname || self.is_root() {
            String::new()
        } else {
            format!("[{}]", text::dotted(self.full_name()))
        };
        let described = layout.show_help && !self.description().trim().is_empty();
        if described {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&text::comment(self.description()));
        }
        if !body.is_empty() {
            if !out.is_empty() {
                out.push_str(if described { "\n\n" } else { "\n" });
            }
            out.push_str(&body);
        }
        Ok(out)
    }

    /// Renders one `key = value` entry, with help comments when requested.
    fn render_item(
        &self,
        item: &SchemaItem,
        namespace: &dyn Namespace,
        layout: Layout,
    ) -> SchemaResult<String> {
        let name = item.short_name();
        let field = self.fullname_of(name);
        let rendered = match namespace.get(name) {
            None => Err("field is not set".to_string()),
            Some(Value::None) => Err("field is set to none".to_string()),
            Some(value) => item
                .export(&value)
                .ok_or_else(|| format!("value does not match {}", item.type_specs())),
        };
        let rendered = rendered.map_err(|reason| SchemaError::Export {
            field: field.clone(),
            reason,
        })?;
        let key = if layout.use_fullname { text::dotted(&field) } else { text::key(name) };
        let line = format!("{key} = {rendered}");
        if layout.show_help {
            Ok(format!("{}\n{line}", text::comment(&item.help_str())))
        } else {
            Ok(line)
        }
    }

    /// Groups selectors by their first segment, in first-seen order.
    ///
    /// Repeated items collapse to one entry and every selector sharing a
    /// subtable head lands in one group, so each header is written once.
    fn select<'a>(&'a self, selectors: &[&'a str]) -> SchemaResult<Selection<'a>> {
        let mut selection = Selection::default();
        for &selector in selectors {
            let (head, rest) = match selector.split_once('.') {
                Some((head, rest)) => (head, Some(rest)),
                None => (selector, None),
            };
            if let Some(item) = self.item(head) {
                if rest.is_some() {
                    return Err(self.lookup_error(selector));
                }
                if !selection.items.iter().any(|seen| seen.short_name() == head) {
                    selection.items.push(item);
                }
            } else if let Some(subtable) = self.subtable(head) {
                match selection.tables.iter_mut().find(|(seen, _)| seen.name() == head) {
                    Some((_, nested)) => match rest {
                        None => *nested = None,
                        Some(rest) => {
                            if let Some(paths) = nested {
                                paths.push(rest);
                            }
                        }
                    },
                    None => selection.tables.push((subtable, rest.map(|rest| vec![rest]))),
                }
            } else {
                return Err(self.lookup_error(head));
            }
        }
        Ok(selection)
    }

    /// Lookup error for a selector of this table.
    fn lookup_error(&self, key: &str) -> SchemaError {
        SchemaError::Lookup {
            table: self.display_name().to_string(),
            key: key.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Internals
// ============================================================================

/// Selectors of one table level, grouped by first segment.
#[derive(Default)]
struct Selection<'a> {
    /// Selected items, each once.
    items: Vec<&'a SchemaItem>,
    /// Selected subtables with their nested selectors; `None` selects the
    /// whole subtable.
    tables: Vec<(&'a SchemaTable, Option<Vec<&'a str>>)>,
}

/// Rendering switches threaded through the export recursion.
#[derive(Debug, Clone, Copy)]
struct Layout {
    /// Dotted item names, no headers.
    use_fullname: bool,
    /// Help comments.
    show_help: bool,
}
