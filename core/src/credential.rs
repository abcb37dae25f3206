//! `Credential`: the capability contract candidate objects implement.
//!
//! The engine never defines concrete credential types. It consumes
//! candidates through two narrow capabilities:
//!
//! - named property access ([`Credential::read_property`]), answered with an
//!   explicit [`PropertyRead`] result instead of a panic or an error path;
//! - the username capability ([`Credential::as_username_bearing`]), the
//!   runtime type test used by [`UsernameMatcher`](crate::UsernameMatcher).
//!
//! Domain types with a fixed shape register their properties in a static
//! [`PropertyTable`] and delegate `read_property` to it. The table replaces
//! ad-hoc introspection: a name that is not registered reads as `Missing`,
//! a registered name without a readable accessor reads as `Unreadable`, and
//! an accessor that reports an error reads as `Failed`. All three evaluate
//! to "does not match".

use crate::PropertyValue;
use std::fmt;

/// A candidate object that matchers can interrogate.
///
/// Both methods have defaults, so the minimal credential exposes nothing:
/// no properties, no username. Such a credential never matches a
/// [`PropertyMatcher`](crate::PropertyMatcher) or
/// [`UsernameMatcher`](crate::UsernameMatcher), and that is the point:
/// lacking a capability is indistinguishable from not matching.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Credential`",
    label = "this type cannot be matched against",
    note = "implement `Credential` for your domain type; override `read_property` (usually via a static `PropertyTable`) and `as_username_bearing` for the capabilities it carries"
)]
pub trait Credential: Send + Sync + fmt::Debug {
    /// Read a named property.
    ///
    /// The default exposes no properties at all.
    fn read_property(&self, name: &str) -> PropertyRead {
        let _ = name;
        PropertyRead::Missing
    }

    /// The username capability check.
    ///
    /// Credentials that carry a username return `Some(self)`; everything
    /// else returns `None` and can never satisfy a username criterion.
    fn as_username_bearing(&self) -> Option<&dyn UsernameBearing> {
        None
    }
}

/// Capability of credentials that carry a username.
pub trait UsernameBearing: Credential {
    /// The username this credential is identified by.
    fn username(&self) -> &str;
}

/// Outcome of reading a named property from a credential.
///
/// Only the `Value` arm can ever produce a match; the other three arms all
/// normalize to `false` during evaluation. They stay distinct here so that
/// trace output can tell a typo'd property name apart from a genuinely
/// unreadable one.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyRead {
    /// The property was read successfully.
    Value(PropertyValue),

    /// No property with the requested name exists.
    Missing,

    /// The property exists but has no readable accessor.
    Unreadable,

    /// The accessor exists but reported an error while reading.
    Failed(ReadError),
}

/// Error reported by a property accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError {
    message: String,
}

impl ReadError {
    /// Create a new read error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ReadError {}

/// A property accessor registered in a [`PropertyTable`].
pub enum Accessor<C> {
    /// A readable accessor. Errors map to [`PropertyRead::Failed`].
    Read(ReadAccessor<C>),

    /// The property exists but cannot be read (for example a secret that is
    /// only ever written). Maps to [`PropertyRead::Unreadable`].
    WriteOnly,
}

/// Accessor function type for [`Accessor::Read`].
pub type ReadAccessor<C> = fn(&C) -> Result<PropertyValue, ReadError>;

impl<C> Clone for Accessor<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Accessor<C> {}

impl<C> fmt::Debug for Accessor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(_) => f.write_str("Read"),
            Self::WriteOnly => f.write_str("WriteOnly"),
        }
    }
}

/// Static name-to-accessor registration for a credential type.
///
/// This is the compile-time replacement for accessor discovery by
/// introspection: the credential type declares, once, which property names
/// it answers and how. Lookup is a linear scan; tables are small.
///
/// # Example
///
/// ```
/// use credql::{Accessor, Credential, PropertyRead, PropertyTable, PropertyValue};
///
/// #[derive(Debug)]
/// struct Token {
///     active: bool,
/// }
///
/// static TOKEN_PROPERTIES: PropertyTable<Token> = PropertyTable::new(&[
///     ("active", Accessor::Read(|t: &Token| Ok(PropertyValue::Bool(t.active)))),
/// ]);
///
/// impl Credential for Token {
///     fn read_property(&self, name: &str) -> PropertyRead {
///         TOKEN_PROPERTIES.read(self, name)
///     }
/// }
///
/// let token = Token { active: true };
/// assert_eq!(
///     token.read_property("active"),
///     PropertyRead::Value(PropertyValue::Bool(true))
/// );
/// assert_eq!(token.read_property("missing"), PropertyRead::Missing);
/// ```
pub struct PropertyTable<C> {
    entries: &'static [(&'static str, Accessor<C>)],
}

impl<C> PropertyTable<C> {
    /// Create a table from a static list of `(name, accessor)` entries.
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, Accessor<C>)]) -> Self {
        Self { entries }
    }

    /// Read the named property from the given credential.
    pub fn read(&self, credential: &C, name: &str) -> PropertyRead {
        for (entry_name, accessor) in self.entries {
            if *entry_name == name {
                return match accessor {
                    Accessor::Read(read) => match read(credential) {
                        Ok(value) => PropertyRead::Value(value),
                        Err(e) => PropertyRead::Failed(e),
                    },
                    Accessor::WriteOnly => PropertyRead::Unreadable,
                };
            }
        }
        PropertyRead::Missing
    }

    /// Iterate over the registered property names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

impl<C> fmt::Debug for PropertyTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter().map(|(n, _)| n)).finish()
    }
}
