//! `NotMatcher`: negation of one matcher.

use crate::{Credential, CredentialMatcher, TraceRecord, TraceSink};
use std::any::Any;
use std::hash::{Hash, Hasher};

/// Matches when the inner matcher does not.
///
/// Description renders `!(d)` around the inner description and is absent
/// whenever the inner description is.
#[derive(PartialEq, Eq, Hash)]
pub struct NotMatcher {
    matcher: Box<dyn CredentialMatcher>,
}

impl std::fmt::Debug for NotMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NotMatcher").finish()
    }
}

impl NotMatcher {
    /// Create a negation of the given matcher.
    #[must_use]
    pub fn new(matcher: Box<dyn CredentialMatcher>) -> Self {
        Self { matcher }
    }

    /// The negated matcher.
    #[must_use]
    pub fn matcher(&self) -> &dyn CredentialMatcher {
        &*self.matcher
    }
}

impl CredentialMatcher for NotMatcher {
    fn matches(&self, item: &dyn Credential) -> bool {
        !self.matcher.matches(item)
    }

    fn matches_traced(&self, item: &dyn Credential, sink: &dyn TraceSink) -> bool {
        sink.record(TraceRecord::fine(self, item, "matches"));
        let matched = !self.matcher.matches_traced(item, sink);
        sink.record(TraceRecord::summary(self, item, format!("matches: {matched}")));
        matched
    }

    fn describe(&self) -> Option<String> {
        self.matcher.describe().map(|d| format!("!({d})"))
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
