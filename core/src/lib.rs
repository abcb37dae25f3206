//! credql: credential criterion matching with CQL rendering
//!
//! A small predicate engine over credential objects. Callers build a tree
//! of matchers, then either evaluate it against a candidate credential or
//! render it as a fragment of CQL, a restricted textual criterion query
//! language consumed by search and persistence layers.
//!
//! # Architecture
//!
//! - [`Credential`]: the capability contract candidates implement (named
//!   property access, username capability). The engine defines no concrete
//!   credential types.
//! - [`PropertyValue`]: the closed set of expected-value kinds, from `Null`
//!   through literals to the non-renderable `Opaque` escape hatch.
//! - [`CredentialMatcher`]: the dual contract: `matches` evaluates, and
//!   `describe` renders CQL or reports that the criterion has no textual
//!   form.
//! - Leaf matchers ([`UsernameMatcher`], [`PropertyMatcher`],
//!   [`ConstantMatcher`]) and combinators ([`AllOfMatcher`],
//!   [`AnyOfMatcher`], [`NotMatcher`]).
//! - [`TraceSink`]: an explicit, optional diagnostic observer for
//!   evaluation; never part of the functional contract.
//!
//! # Key Design Decisions
//!
//! 1. **Evaluation never fails.** A candidate that lacks a capability, or
//!    whose property cannot be read, simply does not match. The accessor
//!    boundary returns an explicit [`PropertyRead`] and every non-value arm
//!    normalizes to `false`.
//!
//! 2. **Description is optional and poisoning.** `describe()` returns
//!    `Option<String>`. Combinators refuse to render partially: one
//!    non-describable part makes the whole tree non-describable.
//!
//! 3. **No introspection.** Domain types register their readable
//!    properties in a static [`PropertyTable`]; an unregistered name reads
//!    as missing and evaluates to `false`.
//!
//! # Example
//!
//! ```
//! use credql::prelude::*;
//!
//! #[derive(Debug)]
//! struct Login {
//!     user: String,
//! }
//!
//! impl Credential for Login {
//!     fn as_username_bearing(&self) -> Option<&dyn UsernameBearing> {
//!         Some(self)
//!     }
//! }
//!
//! impl UsernameBearing for Login {
//!     fn username(&self) -> &str {
//!         &self.user
//!     }
//! }
//!
//! let filter = all_of(vec![
//!     Box::new(with_username("alice")),
//!     Box::new(with_property("active", true)),
//! ]);
//!
//! // `Login` exposes no properties, so the property criterion fails.
//! assert!(!filter.matches(&Login { user: "alice".into() }));
//!
//! // The whole tree renders as one CQL fragment.
//! assert_eq!(
//!     filter.describe().as_deref(),
//!     Some("((username == \"alice\") && true)")
//! );
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod all_of;
mod any_of;
mod constant;
pub mod cql;
mod credential;
mod matcher;
mod not;
mod property;
mod trace;
mod username;
mod value;

#[cfg(feature = "config")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core contracts
pub use credential::{
    Accessor, Credential, PropertyRead, PropertyTable, ReadAccessor, ReadError, UsernameBearing,
};
pub use matcher::CredentialMatcher;
pub use value::{OpaqueValue, PropertyValue};

// Concrete matchers
pub use all_of::AllOfMatcher;
pub use any_of::AnyOfMatcher;
pub use constant::ConstantMatcher;
pub use not::NotMatcher;
pub use property::PropertyMatcher;
pub use username::UsernameMatcher;

// Trace types
pub use trace::{CollectingSink, TraceLevel, TraceRecord, TraceSink};

// Config types (feature-gated)
#[cfg(feature = "config")]
pub use config::{MatcherSpec, ValueSpec};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use credql::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        all_of,
        always,
        any_of,
        never,
        not,
        with_property,
        with_username,
        Accessor,
        AllOfMatcher,
        AnyOfMatcher,
        CollectingSink,
        ConstantMatcher,
        Credential,
        CredentialMatcher,
        MatcherError,
        NotMatcher,
        OpaqueValue,
        PropertyMatcher,
        PropertyRead,
        PropertyTable,
        PropertyValue,
        ReadError,
        TraceLevel,
        TraceRecord,
        TraceSink,
        UsernameBearing,
        UsernameMatcher,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Convenience constructors
// ═══════════════════════════════════════════════════════════════════════════════

/// Criterion on the username capability. See [`UsernameMatcher`].
pub fn with_username(username: impl Into<String>) -> UsernameMatcher {
    UsernameMatcher::new(username)
}

/// Criterion on a named property. See [`PropertyMatcher`].
pub fn with_property(
    name: impl Into<String>,
    expected: impl Into<PropertyValue>,
) -> PropertyMatcher {
    PropertyMatcher::new(name, expected)
}

/// Conjunction of the given matchers. See [`AllOfMatcher`].
#[must_use]
pub fn all_of(matchers: Vec<Box<dyn CredentialMatcher>>) -> AllOfMatcher {
    AllOfMatcher::new(matchers)
}

/// Disjunction of the given matchers. See [`AnyOfMatcher`].
#[must_use]
pub fn any_of(matchers: Vec<Box<dyn CredentialMatcher>>) -> AnyOfMatcher {
    AnyOfMatcher::new(matchers)
}

/// Negation of the given matcher. See [`NotMatcher`].
pub fn not(matcher: impl CredentialMatcher + 'static) -> NotMatcher {
    NotMatcher::new(Box::new(matcher))
}

/// The criterion that accepts every credential.
#[must_use]
pub fn always() -> ConstantMatcher {
    ConstantMatcher::always()
}

/// The criterion that rejects every credential.
#[must_use]
pub fn never() -> ConstantMatcher {
    ConstantMatcher::never()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from matcher construction.
///
/// These surface at config build time, never during evaluation: a built
/// matcher tree cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    /// A property criterion was configured with an empty property name.
    EmptyPropertyName,

    /// A serialized criterion failed to deserialize or construct.
    InvalidSpec {
        /// The underlying error message.
        source: String,
    },
}

impl std::fmt::Display for MatcherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPropertyName => {
                write!(
                    f,
                    "property criterion has an empty property name; no credential can satisfy it"
                )
            }
            Self::InvalidSpec { source } => {
                write!(f, "invalid matcher spec: {source}")
            }
        }
    }
}

impl std::error::Error for MatcherError {}
