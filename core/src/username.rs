//! `UsernameMatcher`: exact match on the username capability.

use crate::{cql, Credential, CredentialMatcher, TraceRecord, TraceSink};
use std::any::Any;
use std::hash::{Hash, Hasher};

/// Matches credentials that carry the username capability with exactly the
/// expected username.
///
/// Credentials without the capability never match; that is an ordinary
/// non-match, not an error. The expected username is fixed at construction
/// and cannot be absent.
///
/// # Example
///
/// ```
/// use credql::{Credential, CredentialMatcher, UsernameBearing, UsernameMatcher};
///
/// #[derive(Debug)]
/// struct Login {
///     user: String,
/// }
///
/// impl Credential for Login {
///     fn as_username_bearing(&self) -> Option<&dyn UsernameBearing> {
///         Some(self)
///     }
/// }
///
/// impl UsernameBearing for Login {
///     fn username(&self) -> &str {
///         &self.user
///     }
/// }
///
/// let matcher = UsernameMatcher::new("alice");
/// assert!(matcher.matches(&Login { user: "alice".into() }));
/// assert!(!matcher.matches(&Login { user: "bob".into() }));
/// assert_eq!(matcher.describe().as_deref(), Some("(username == \"alice\")"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsernameMatcher {
    username: String,
}

impl UsernameMatcher {
    /// Create a matcher for the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// The expected username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl CredentialMatcher for UsernameMatcher {
    fn matches(&self, item: &dyn Credential) -> bool {
        item.as_username_bearing()
            .is_some_and(|u| u.username() == self.username)
    }

    fn matches_traced(&self, item: &dyn Credential, sink: &dyn TraceSink) -> bool {
        sink.record(TraceRecord::fine(self, item, "matches"));
        let matched = match item.as_username_bearing() {
            Some(bearer) => {
                let matched = bearer.username() == self.username;
                sink.record(TraceRecord::fine(
                    self,
                    item,
                    format!("username {:?}: {matched}", bearer.username()),
                ));
                matched
            }
            None => {
                sink.record(TraceRecord::fine(self, item, "no username capability"));
                false
            }
        };
        sink.record(TraceRecord::summary(self, item, format!("matches: {matched}")));
        matched
    }

    /// Always succeeds: the expected value is a plain string.
    fn describe(&self) -> Option<String> {
        Some(format!("(username == \"{}\")", cql::escape(&self.username)))
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
