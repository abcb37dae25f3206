//! `AnyOfMatcher`: ordered disjunction of matchers.

use crate::{Credential, CredentialMatcher, TraceRecord, TraceSink};
use std::any::Any;
use std::hash::{Hash, Hasher};

/// Matches when at least one sub-matcher matches.
///
/// The dual of [`AllOfMatcher`](crate::AllOfMatcher): evaluation walks the
/// stored order and short-circuits on the first `true`; an empty
/// disjunction never matches and describes as `false`. Description renders
/// `(d1 || d2 || ... || dn)` and is poisoned by any non-describable
/// sub-matcher, exactly like the conjunction.
#[derive(PartialEq, Eq, Hash)]
pub struct AnyOfMatcher {
    matchers: Vec<Box<dyn CredentialMatcher>>,
}

impl std::fmt::Debug for AnyOfMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyOfMatcher")
            .field("len", &self.matchers.len())
            .finish()
    }
}

impl AnyOfMatcher {
    /// Create a disjunction of the given sub-matchers.
    #[must_use]
    pub fn new(matchers: Vec<Box<dyn CredentialMatcher>>) -> Self {
        Self { matchers }
    }

    /// The sub-matchers in evaluation order.
    #[must_use]
    pub fn matchers(&self) -> &[Box<dyn CredentialMatcher>] {
        &self.matchers
    }

    /// Returns the number of sub-matchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns `true` if there are no sub-matchers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl CredentialMatcher for AnyOfMatcher {
    fn matches(&self, item: &dyn Credential) -> bool {
        self.matchers.iter().any(|m| m.matches(item))
    }

    fn matches_traced(&self, item: &dyn Credential, sink: &dyn TraceSink) -> bool {
        sink.record(TraceRecord::fine(self, item, "matches"));
        for matcher in &self.matchers {
            if matcher.matches_traced(item, sink) {
                sink.record(TraceRecord::summary(
                    self,
                    item,
                    format!("sub-matcher {matcher:?}: true"),
                ));
                return true;
            }
        }
        sink.record(TraceRecord::summary(self, item, "matches: false"));
        false
    }

    fn describe(&self) -> Option<String> {
        if self.matchers.is_empty() {
            return Some("false".to_string());
        }
        let mut parts = Vec::with_capacity(self.matchers.len());
        for matcher in &self.matchers {
            parts.push(matcher.describe()?);
        }
        Some(format!("({})", parts.join(" || ")))
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
