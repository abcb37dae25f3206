//! `AllOfMatcher`: ordered conjunction of matchers.

use crate::{Credential, CredentialMatcher, TraceRecord, TraceSink};
use std::any::Any;
use std::hash::{Hash, Hasher};

/// Matches when every sub-matcher matches.
///
/// Sub-matchers are evaluated in their stored order with short-circuiting:
/// the first `false` ends the evaluation. Order cannot change the boolean
/// result, only how much work (and trace output) happens before the answer.
/// An empty conjunction is vacuously true.
///
/// # Description poisoning
///
/// `describe()` renders `(d1 && d2 && ... && dn)` only when every
/// sub-matcher produces a description. A single non-describable sub-matcher
/// makes the whole conjunction non-describable; a conjunction is never
/// partially rendered. The empty conjunction describes as `true`.
///
/// # Example
///
/// ```
/// use credql::{AllOfMatcher, CredentialMatcher, PropertyMatcher, UsernameMatcher};
///
/// let filter = AllOfMatcher::new(vec![
///     Box::new(UsernameMatcher::new("alice")),
///     Box::new(PropertyMatcher::new("active", true)),
/// ]);
/// assert_eq!(
///     filter.describe().as_deref(),
///     Some("((username == \"alice\") && true)")
/// );
/// ```
#[derive(PartialEq, Eq, Hash)]
pub struct AllOfMatcher {
    matchers: Vec<Box<dyn CredentialMatcher>>,
}

impl std::fmt::Debug for AllOfMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllOfMatcher")
            .field("len", &self.matchers.len())
            .finish()
    }
}

impl AllOfMatcher {
    /// Create a conjunction of the given sub-matchers.
    ///
    /// The vector is owned by the new matcher; the stored order is the
    /// evaluation and rendering order.
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

impl CredentialMatcher for AllOfMatcher {
    fn matches(&self, item: &dyn Credential) -> bool {
        self.matchers.iter().all(|m| m.matches(item))
    }

    fn matches_traced(&self, item: &dyn Credential, sink: &dyn TraceSink) -> bool {
        sink.record(TraceRecord::fine(self, item, "matches"));
        for matcher in &self.matchers {
            if !matcher.matches_traced(item, sink) {
                sink.record(TraceRecord::summary(
                    self,
                    item,
                    format!("sub-matcher {matcher:?}: false"),
                ));
                return false;
            }
        }
        sink.record(TraceRecord::summary(self, item, "matches: true"));
        true
    }

    fn describe(&self) -> Option<String> {
        if self.matchers.is_empty() {
            return Some("true".to_string());
        }
        let mut parts = Vec::with_capacity(self.matchers.len());
        for matcher in &self.matchers {
            parts.push(matcher.describe()?);
        }
        Some(format!("({})", parts.join(" && ")))
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
