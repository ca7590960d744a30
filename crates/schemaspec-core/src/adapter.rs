// crates/schemaspec-core/src/adapter.rs
// ============================================================================
// Module: Type Adapters
// Description: Validate, export, and convert values of one concrete type.
// Purpose: Provide the leaf capability every schema item is built from.
// Dependencies: crate::{error, primitive, text, value}
// ============================================================================

//! ## Overview
//! A [`TypeAdapter`] converts between a wire [`Primitive`] and a typed
//! [`Value`], validates values, and renders them as TOML surface syntax.
//! Scalar adapters ([`BoolAdapter`], [`IntAdapter`], [`FloatAdapter`],
//! [`StringAdapter`]) share [`ChoiceAdapter`], which can restrict the accepted
//! values to an enumerated set. [`PathAdapter`] and [`ListAdapter`] cover the
//! remaining leaf types; [`crate::SchemaTable`] is the adapter for inline
//! tables.
//!
//! Contract: for every value `v` with `is_valid(v)`, converting the primitive
//! parsed from `export(v)` yields `v` again. `export` must be pure.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::SchemaError;
use crate::error::SchemaResult;
use crate::primitive::Primitive;
use crate::text;
use crate::value::Value;

// ============================================================================
// SECTION: Adapter Contract
// ============================================================================

/// Converts values of one concrete type to and from the wire format.
pub trait TypeAdapter: fmt::Debug + Send + Sync {
    /// Short grammar fragment describing accepted input, e.g. `<integer>`.
    fn type_spec(&self) -> String;

    /// Returns true when `value` is an acceptable instance of this type.
    fn is_valid(&self, value: &Value) -> bool;

    /// Renders `value` as TOML surface syntax, or `None` when it is invalid.
    fn export(&self, value: &Value) -> Option<String>;

    /// Converts a primitive, or returns `None` on type mismatch or invalid value.
    fn convert(&self, primitive: &Primitive) -> Option<Value>;
}

/// Shared, type-erased adapter handle.
pub type AdapterRef = Arc<dyn TypeAdapter>;

/// Builds a `Vec<AdapterRef>` from adapter expressions, in priority order.
///
/// ```
/// use schemaspec_core::{adapters, BoolAdapter, PathAdapter};
///
/// let candidates = adapters![BoolAdapter::with_choices([false])?, PathAdapter::new()];
/// assert_eq!(candidates.len(), 2);
/// # Ok::<(), schemaspec_core::SchemaError>(())
/// ```
#[macro_export]
macro_rules! adapters {
    ($($adapter:expr),* $(,)?) => {
        vec![$(::std::sync::Arc::new($adapter) as $crate::AdapterRef),*]
    };
}

// ============================================================================
// SECTION: Scalar Types
// ============================================================================

/// Scalar type that can back a [`ChoiceAdapter`].
pub trait Scalar: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Grammar fragment used when no choices are configured.
    const TYPE_SPEC: &'static str;

    /// Borrows the scalar out of a value of the matching variant.
    fn from_value(value: &Value) -> Option<&Self>;

    /// Reads the scalar out of a primitive of the matching variant.
    fn from_primitive(primitive: &Primitive) -> Option<Self>;

    /// Wraps the scalar in its value variant.
    fn into_value(self) -> Value;

    /// Renders the scalar as a TOML literal.
    fn render(&self) -> String;
}

impl Scalar for bool {
    const TYPE_SPEC: &'static str = "true | false";

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Bool(inner) => Some(inner),
            _ => None,
        }
    }

    fn from_primitive(primitive: &Primitive) -> Option<Self> {
        match primitive {
            Primitive::Boolean(inner) => Some(*inner),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn render(&self) -> String {
        if *self { "true".to_string() } else { "false".to_string() }
    }
}

impl Scalar for i64 {
    const TYPE_SPEC: &'static str = "<integer>";

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Int(inner) => Some(inner),
            _ => None,
        }
    }

    fn from_primitive(primitive: &Primitive) -> Option<Self> {
        match primitive {
            Primitive::Integer(inner) => Some(*inner),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Scalar for f64 {
    const TYPE_SPEC: &'static str = "<float>";

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Float(inner) => Some(inner),
            _ => None,
        }
    }

    fn from_primitive(primitive: &Primitive) -> Option<Self> {
        match primitive {
            Primitive::Float(inner) => Some(*inner),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn render(&self) -> String {
        text::float(*self)
    }
}

impl Scalar for String {
    const TYPE_SPEC: &'static str = "\"<string>\"";

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::String(inner) => Some(inner),
            _ => None,
        }
    }

    fn from_primitive(primitive: &Primitive) -> Option<Self> {
        match primitive {
            Primitive::String(inner) => Some(inner.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn render(&self) -> String {
        text::quote(self)
    }
}

// ============================================================================
// SECTION: Choice Adapter
// ============================================================================

/// Scalar adapter optionally restricted to an enumerated set of choices.
///
/// # Invariants
/// - Every choice exports successfully (checked at construction).
/// - Empty `choices` accepts any value of the scalar type.
#[derive(Debug, Clone)]
pub struct ChoiceAdapter<T: Scalar> {
    /// Accepted values; empty means unconstrained.
    choices: Vec<T>,
    /// Grammar fragment computed at construction.
    type_spec: String,
}

/// Boolean adapter.
pub type BoolAdapter = ChoiceAdapter<bool>;
/// Integer adapter.
pub type IntAdapter = ChoiceAdapter<i64>;
/// Float adapter.
pub type FloatAdapter = ChoiceAdapter<f64>;
/// String adapter.
pub type StringAdapter = ChoiceAdapter<String>;

impl<T: Scalar> ChoiceAdapter<T> {
    /// Creates an adapter accepting any value of the scalar type.
    #[must_use]
    pub fn new() -> Self {
        Self {
            choices: Vec::new(),
            type_spec: T::TYPE_SPEC.to_string(),
        }
    }

    /// Creates an adapter accepting only the given choices.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Construction`] when a choice cannot be exported
    /// by the adapter itself (for example a NaN float).
    pub fn with_choices<I, V>(choices: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        let mut adapter = Self {
            choices: choices.into_iter().map(Into::into).collect(),
            type_spec: T::TYPE_SPEC.to_string(),
        };
        if adapter.choices.is_empty() {
            return Ok(adapter);
        }
        let mut specs = Vec::with_capacity(adapter.choices.len());
        for choice in &adapter.choices {
            let rendered = adapter.export(&choice.clone().into_value()).ok_or_else(|| {
                SchemaError::construction(format!(
                    "choice {} is not a valid {}",
                    choice.render(),
                    T::TYPE_SPEC
                ))
            })?;
            specs.push(rendered);
        }
        adapter.type_spec = specs.join(" | ");
        Ok(adapter)
    }

    /// Returns the configured choices; empty means unconstrained.
    #[must_use]
    pub fn choices(&self) -> &[T] {
        &self.choices
    }

    /// Returns true when `value` passes the choice restriction.
    fn allows(&self, value: &T) -> bool {
        self.choices.is_empty() || self.choices.contains(value)
    }
}

impl<T: Scalar> Default for ChoiceAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> TypeAdapter for ChoiceAdapter<T> {
    fn type_spec(&self) -> String {
        self.type_spec.clone()
    }

    fn is_valid(&self, value: &Value) -> bool {
        T::from_value(value).is_some_and(|inner| self.allows(inner))
    }

    fn export(&self, value: &Value) -> Option<String> {
        T::from_value(value).filter(|inner| self.allows(inner)).map(T::render)
    }

    fn convert(&self, primitive: &Primitive) -> Option<Value> {
        T::from_primitive(primitive).filter(|inner| self.allows(inner)).map(T::into_value)
    }
}

// ============================================================================
// SECTION: Path Adapter
// ============================================================================

/// String-backed filesystem path adapter.
///
/// # Invariants
/// - Only UTF-8 paths are valid, so every valid path round-trips.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathAdapter;

impl PathAdapter {
    /// Creates a path adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TypeAdapter for PathAdapter {
    fn type_spec(&self) -> String {
        "\"<path>\"".to_string()
    }

    fn is_valid(&self, value: &Value) -> bool {
        value.as_path().is_some_and(|path| path.to_str().is_some())
    }

    fn export(&self, value: &Value) -> Option<String> {
        value.as_path().and_then(|path| path.to_str()).map(text::quote)
    }

    fn convert(&self, primitive: &Primitive) -> Option<Value> {
        match primitive {
            Primitive::String(path) => Some(Value::Path(PathBuf::from(path))),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: List Adapter
// ============================================================================

/// Homogeneous list adapter delegating element-wise to a wrapped adapter.
#[derive(Debug, Clone)]
pub struct ListAdapter {
    /// Element adapter.
    element: AdapterRef,
}

impl ListAdapter {
    /// Creates a list adapter over `element`.
    pub fn new(element: impl TypeAdapter + 'static) -> Self {
        Self {
            element: Arc::new(element),
        }
    }

    /// Creates a list adapter over an already shared element adapter.
    #[must_use]
    pub const fn from_ref(element: AdapterRef) -> Self {
        Self {
            element,
        }
    }
}

impl TypeAdapter for ListAdapter {
    fn type_spec(&self) -> String {
        format!("[{},]", self.element.type_spec())
    }

    fn is_valid(&self, value: &Value) -> bool {
        value.as_list().is_some_and(|items| items.iter().all(|item| self.element.is_valid(item)))
    }

    fn export(&self, value: &Value) -> Option<String> {
        let items = value.as_list()?;
        let rendered =
            items.iter().map(|item| self.element.export(item)).collect::<Option<Vec<_>>>()?;
        Some(format!("[{}]", rendered.join(", ")))
    }

    fn convert(&self, primitive: &Primitive) -> Option<Value> {
        match primitive {
            Primitive::Array(items) => items
                .iter()
                .map(|item| self.element.convert(item))
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            _ => None,
        }
    }
}
