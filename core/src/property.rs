//! `PropertyMatcher`: structural equality on a named property.

use crate::{
    Credential, CredentialMatcher, PropertyRead, PropertyValue, TraceRecord, TraceSink,
};
use std::any::Any;
use std::hash::{Hash, Hasher};

/// Matches credentials whose named property reads as exactly the expected
/// value.
///
/// # Failure normalizes to false
///
/// This matcher's defining policy: it never fails just because a candidate
/// cannot answer the question. A missing property, a write-only property
/// and a failing accessor all evaluate to `false`, indistinguishable from
/// an honest mismatch. The only arm that can match is a successful read
/// producing an equal value. Equality is null-safe: expecting
/// [`PropertyValue::Null`] matches a property that reads as `Null`.
///
/// The trace sink does distinguish the failure arms, so a typo'd property
/// name can be diagnosed without changing the contract.
///
/// # Description
///
/// `describe()` delegates to [`PropertyValue::render`]: every literal kind
/// renders as a comparison, while an [`Opaque`](PropertyValue::Opaque)
/// expected value makes this matcher non-describable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyMatcher {
    name: String,
    expected: PropertyValue,
}

impl PropertyMatcher {
    /// Create a matcher for the given property name and expected value.
    pub fn new(name: impl Into<String>, expected: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            expected: expected.into(),
        }
    }

    /// The property name this matcher reads.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The expected value.
    #[must_use]
    pub fn expected(&self) -> &PropertyValue {
        &self.expected
    }
}

impl CredentialMatcher for PropertyMatcher {
    fn matches(&self, item: &dyn Credential) -> bool {
        match item.read_property(&self.name) {
            PropertyRead::Value(actual) => actual == self.expected,
            PropertyRead::Missing | PropertyRead::Unreadable | PropertyRead::Failed(_) => false,
        }
    }

    fn matches_traced(&self, item: &dyn Credential, sink: &dyn TraceSink) -> bool {
        sink.record(TraceRecord::fine(self, item, "matches"));
        let matched = match item.read_property(&self.name) {
            PropertyRead::Value(actual) => {
                let matched = actual == self.expected;
                sink.record(TraceRecord::fine(
                    self,
                    item,
                    format!("read {actual:?}, expected {:?}: {matched}", self.expected),
                ));
                matched
            }
            PropertyRead::Missing => {
                sink.record(TraceRecord::fine(self, item, "no such property"));
                false
            }
            PropertyRead::Unreadable => {
                sink.record(TraceRecord::fine(self, item, "property is not readable"));
                false
            }
            PropertyRead::Failed(e) => {
                sink.record(TraceRecord::fine(self, item, format!("read failed: {e}")));
                false
            }
        };
        sink.record(TraceRecord::summary(self, item, format!("matches: {matched}")));
        matched
    }

    fn describe(&self) -> Option<String> {
        self.expected.render(&self.name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn CredentialMatcher) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|o| self == o)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}
