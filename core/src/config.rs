//! Config types for building matcher trees from serialized criteria.
//!
//! These types mirror the runtime matchers but are serde-deserializable,
//! so filters can be loaded from JSON or YAML documents and then built
//! into live matchers via [`MatcherSpec::build`].
//!
//! # Relationship to runtime types
//!
//! | Config variant | Runtime type |
//! |----------------|--------------|
//! | `username` | [`UsernameMatcher`](crate::UsernameMatcher) |
//! | `property` | [`PropertyMatcher`](crate::PropertyMatcher) |
//! | `all_of` | [`AllOfMatcher`](crate::AllOfMatcher) |
//! | `any_of` | [`AnyOfMatcher`](crate::AnyOfMatcher) |
//! | `not` | [`NotMatcher`](crate::NotMatcher) |
//! | `constant` | [`ConstantMatcher`](crate::ConstantMatcher) |
//!
//! Opaque expected values are deliberately not expressible here: a config
//! document can only describe criteria that CQL can render.

use crate::{
    AllOfMatcher, AnyOfMatcher, ConstantMatcher, CredentialMatcher, MatcherError, NotMatcher,
    PropertyMatcher, PropertyValue, UsernameMatcher,
};
use serde::Deserialize;

/// Configuration for one matcher in a criterion tree.
///
/// Uses `#[serde(tag = "type")]` for discriminated union deserialization:
///
/// ```json
/// { "type": "username", "username": "alice" }
/// { "type": "property", "name": "active", "value": { "bool": true } }
/// { "type": "all_of", "matchers": [...] }
/// { "type": "not", "matcher": { ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatcherSpec {
    /// Exact match on the username capability.
    Username {
        /// The expected username.
        username: String,
    },

    /// Structural equality on a named property.
    Property {
        /// The property name to read.
        name: String,
        /// The expected value. Omitted means `null`.
        #[serde(default)]
        value: ValueSpec,
    },

    /// Conjunction: all sub-matchers must match.
    AllOf {
        /// Sub-matchers in evaluation order.
        #[serde(default)]
        matchers: Vec<MatcherSpec>,
    },

    /// Disjunction: any sub-matcher must match.
    AnyOf {
        /// Sub-matchers in evaluation order.
        #[serde(default)]
        matchers: Vec<MatcherSpec>,
    },

    /// Negation of one matcher.
    Not {
        /// The matcher to negate.
        matcher: Box<MatcherSpec>,
    },

    /// Fixed outcome.
    Constant {
        /// Whether the matcher accepts everything or nothing.
        outcome: bool,
    },
}

impl MatcherSpec {
    /// Parse a spec from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidSpec`] when the document does not
    /// deserialize.
    pub fn from_json(json: &str) -> Result<Self, MatcherError> {
        serde_json::from_str(json).map_err(|e| MatcherError::InvalidSpec {
            source: e.to_string(),
        })
    }

    /// Build the runtime matcher this spec describes.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::EmptyPropertyName`] if a `property` entry
    /// has an empty name. An empty name can never be satisfied by any
    /// credential, so it is almost certainly a config mistake; rejecting it
    /// here is the one place the engine fails loudly instead of silently
    /// evaluating to `false`.
    pub fn build(&self) -> Result<Box<dyn CredentialMatcher>, MatcherError> {
        Ok(match self {
            Self::Username { username } => Box::new(UsernameMatcher::new(username.clone())),
            Self::Property { name, value } => {
                if name.is_empty() {
                    return Err(MatcherError::EmptyPropertyName);
                }
                Box::new(PropertyMatcher::new(name.clone(), value.to_value()))
            }
            Self::AllOf { matchers } => Box::new(AllOfMatcher::new(Self::build_all(matchers)?)),
            Self::AnyOf { matchers } => Box::new(AnyOfMatcher::new(Self::build_all(matchers)?)),
            Self::Not { matcher } => Box::new(NotMatcher::new(matcher.build()?)),
            Self::Constant { outcome } => Box::new(ConstantMatcher::new(*outcome)),
        })
    }

    fn build_all(specs: &[MatcherSpec]) -> Result<Vec<Box<dyn CredentialMatcher>>, MatcherError> {
        specs.iter().map(MatcherSpec::build).collect()
    }
}

/// Configuration for an expected property value.
///
/// Externally tagged by kind:
///
/// ```yaml
/// value: "null"        # or omit the key entirely
/// value: { string: "alice" }
/// value: { char: "a" }
/// value: { int: 42 }
/// value: { float: 2.5 }
/// value: { bool: true }
/// value: { enum: { type_name: "acme::Scope", label: "Global" } }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSpec {
    /// The absent value.
    #[default]
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
}

impl ValueSpec {
    /// Convert into the runtime value.
    #[must_use]
    pub fn to_value(&self) -> PropertyValue {
        match self {
            Self::Null => PropertyValue::Null,
            Self::String(s) => PropertyValue::String(s.clone()),
            Self::Char(c) => PropertyValue::Char(*c),
            Self::Int(i) => PropertyValue::Int(*i),
            Self::Float(v) => PropertyValue::Float(*v),
            Self::Bool(b) => PropertyValue::Bool(*b),
            Self::Enum { type_name, label } => {
                PropertyValue::enumeration(type_name.clone(), label.clone())
            }
        }
    }
}
