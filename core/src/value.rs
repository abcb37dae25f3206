//! `PropertyValue`: the closed set of expected-value kinds.
//!
//! Matching compares values structurally; description renders them as CQL
//! literals. The two concerns pull in different directions: everything in
//! the closed set can be compared, but only the non-`Opaque` kinds can be
//! rendered. [`PropertyValue::render`] is the single exhaustive function
//! encoding that distinction.
//!
//! # Extensibility via `Opaque`
//!
//! Domain values outside the literal kinds implement [`OpaqueValue`] and
//! wrap in `PropertyValue::Opaque(Arc::new(value))`. Opaque values compare
//! by pointer identity (same allocation means equal) and never render.

use crate::cql;
use std::any::Any;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::Arc;

/// Extension trait for property values outside the literal kinds.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; values are shared freely between
/// matcher instances and threads.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use std::sync::Arc;
/// use credql::{OpaqueValue, PropertyValue};
///
/// #[derive(Debug)]
/// struct KeyPair {
///     fingerprint: String,
/// }
///
/// impl OpaqueValue for KeyPair {
///     fn opaque_type_name(&self) -> &'static str {
///         "key_pair"
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let value = PropertyValue::Opaque(Arc::new(KeyPair {
///     fingerprint: "ab:cd".into(),
/// }));
/// assert_eq!(value.kind(), "key_pair");
/// assert_eq!(value.render("key"), None);
/// ```
pub trait OpaqueValue: Send + Sync + Debug {
    /// A human-readable type identifier, used in diagnostics.
    ///
    /// Convention: `snake_case`, for example `"key_pair"`.
    fn opaque_type_name(&self) -> &'static str;

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// An expected or actual property value.
///
/// # Variants
///
/// - `Null`: the absent value. Null-safe equality holds: `Null == Null`.
/// - `String` / `Char` / `Int` / `Float` / `Bool`: literal kinds, all
///   renderable as CQL.
/// - `Enum`: a labeled constant of a named type, rendered as
///   `type_name.label`.
/// - `Opaque`: anything else; comparable, never renderable.
///
/// # Equality and hashing
///
/// Structural, with two deliberate choices: floats compare by bit pattern
/// (so equality and hashing agree, and `NaN == NaN`), and `Opaque` compares
/// by `Arc` pointer identity.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// The absent value.
    Null,
    /// String data.
    String(String),
    /// A single character.
    Char(char),
    /// Integer data.
    Int(i64),
    /// Floating-point data.
    Float(f64),
    /// Boolean data.
    Bool(bool),
    /// A labeled constant of a named type.
    Enum {
        /// The qualified name of the type the label belongs to.
        type_name: String,
        /// The constant's label.
        label: String,
    },
    /// A value outside the literal kinds. Never renderable.
    Opaque(Arc<dyn OpaqueValue>),
}

impl PropertyValue {
    /// Create an [`Enum`](Self::Enum) value.
    pub fn enumeration(type_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Enum {
            type_name: type_name.into(),
            label: label.into(),
        }
    }

    /// Wrap an [`OpaqueValue`] implementation.
    pub fn opaque(value: impl OpaqueValue + 'static) -> Self {
        Self::Opaque(Arc::new(value))
    }

    /// Returns `true` if this is the `Null` variant.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is the `Opaque` variant.
    #[inline]
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as an opaque reference.
    ///
    /// Use [`OpaqueValue::as_any`] to downcast to the concrete type.
    #[inline]
    #[must_use]
    pub fn as_opaque(&self) -> Option<&dyn OpaqueValue> {
        match self {
            Self::Opaque(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    /// A string describing the kind of this value.
    ///
    /// For `Opaque`, delegates to [`OpaqueValue::opaque_type_name`].
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String(_) => "string",
            Self::Char(_) => "char",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Enum { .. } => "enum",
            Self::Opaque(v) => v.opaque_type_name(),
        }
    }

    /// Render an equality comparison of `property` against this value as a
    /// CQL fragment, or `None` when the value is not representable.
    ///
    /// Booleans render bare (`true` / `false`) rather than wrapped in a
    /// comparison; everything else renders as `(property == literal)`.
    /// String and char literals share one escaping discipline, see
    /// [`cql::escape`].
    #[must_use]
    pub fn render(&self, property: &str) -> Option<String> {
        match self {
            Self::Null => Some(format!("({property} == null)")),
            Self::String(s) => Some(format!("({property} == \"{}\")", cql::escape(s))),
            Self::Char(c) => Some(format!("({property} == '{}')", cql::escape_char(*c))),
            Self::Int(i) => Some(format!("({property} == {i})")),
            Self::Float(v) => Some(format!("({property} == {v})")),
            Self::Bool(b) => Some(b.to_string()),
            Self::Enum { type_name, label } => Some(format!("({property} == {type_name}.{label})")),
            Self::Opaque(_) => None,
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (
                Self::Enum { type_name, label },
                Self::Enum {
                    type_name: other_type,
                    label: other_label,
                },
            ) => type_name == other_type && label == other_label,
            (Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for PropertyValue {}

impl Hash for PropertyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::String(s) => s.hash(state),
            Self::Char(c) => c.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Bool(b) => b.hash(state),
            Self::Enum { type_name, label } => {
                type_name.hash(state);
                label.hash(state);
            }
            Self::Opaque(v) => (Arc::as_ptr(v) as *const () as usize).hash(state),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<char> for PropertyValue {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T> From<Option<T>> for PropertyValue
where
    T: Into<PropertyValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}
