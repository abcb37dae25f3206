//! `CredentialMatcher`: the dual contract every matcher implements.
//!
//! A matcher answers two questions about a criterion:
//!
//! - `matches(item)`: does this credential satisfy the criterion?
//! - `describe()`: can the criterion be rendered as a CQL fragment, and if
//!   so, what does it look like?
//!
//! Description is optional. A matcher that cannot render itself returns
//! `None`, and combinators propagate that absence: a composite criterion is
//! only describable when every part of it is.

use crate::{Credential, TraceRecord, TraceSink};
use std::any::Any;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

/// A predicate over credentials, with optional CQL self-description.
///
/// # Evaluation never fails
///
/// `matches` returns `bool`, not `Result`. A candidate that cannot even be
/// asked the question (missing capability, unreadable property) simply does
/// not match. See [`Credential`] for the capability contract.
///
/// # Equality behind trait objects
///
/// Matchers compare and hash behind `dyn CredentialMatcher` via
/// [`dyn_eq`](Self::dyn_eq) / [`dyn_hash`](Self::dyn_hash). Implementations
/// follow a fixed recipe (downcast, then delegate to the derived impls):
///
/// ```ignore
/// fn as_any(&self) -> &dyn Any {
///     self
/// }
///
/// fn dyn_eq(&self, other: &dyn CredentialMatcher) -> bool {
///     other.as_any().downcast_ref::<Self>().is_some_and(|o| self == o)
/// }
///
/// fn dyn_hash(&self, mut state: &mut dyn Hasher) {
///     self.hash(&mut state);
/// }
/// ```
///
/// Two matchers of different concrete types are never equal.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Matchers are immutable after
/// construction, so concurrent evaluation against the same instance needs
/// no synchronization.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `CredentialMatcher`",
    label = "this type cannot be used as a credential criterion",
    note = "implement `matches(&self, &dyn Credential) -> bool` plus the `as_any`/`dyn_eq`/`dyn_hash` equality hooks, or compose the built-in matchers (UsernameMatcher, PropertyMatcher, AllOfMatcher, ...)"
)]
pub trait CredentialMatcher: Send + Sync + Debug {
    /// Check whether the given credential satisfies this criterion.
    fn matches(&self, item: &dyn Credential) -> bool;

    /// Like [`matches`](Self::matches), but emitting diagnostic records to
    /// the given sink.
    ///
    /// The returned value always equals `matches(item)`; the sink is purely
    /// observational. The default emits a fine-grained record on entry and
    /// a summary record with the outcome; combinators override this to
    /// forward the sink into their sub-matchers.
    fn matches_traced(&self, item: &dyn Credential, sink: &dyn TraceSink) -> bool {
        sink.record(TraceRecord::fine(self, item, "matches"));
        let matched = self.matches(item);
        sink.record(TraceRecord::summary(self, item, format!("matches: {matched}")));
        matched
    }

    /// Render this criterion as a CQL fragment.
    ///
    /// Returns `None` when the criterion cannot be expressed in CQL. That
    /// is a documented outcome, not an error: callers that need text must
    /// fall back to a non-textual representation. The default is `None`,
    /// so a matcher is non-describable unless it opts in.
    fn describe(&self) -> Option<String> {
        None
    }

    /// Upcast for [`dyn_eq`](Self::dyn_eq) downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Type-aware equality behind a trait object.
    fn dyn_eq(&self, other: &dyn CredentialMatcher) -> bool;

    /// Type-aware hashing behind a trait object. Must be consistent with
    /// [`dyn_eq`](Self::dyn_eq).
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl PartialEq for dyn CredentialMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}

impl Eq for dyn CredentialMatcher {}

impl Hash for dyn CredentialMatcher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dyn_hash(state);
    }
}

// Blanket implementation for boxed matchers
#[diagnostic::do_not_recommend]
impl CredentialMatcher for Box<dyn CredentialMatcher> {
    fn matches(&self, item: &dyn Credential) -> bool {
        (**self).matches(item)
    }

    fn matches_traced(&self, item: &dyn Credential, sink: &dyn TraceSink) -> bool {
        (**self).matches_traced(item, sink)
    }

    fn describe(&self) -> Option<String> {
        (**self).describe()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn dyn_eq(&self, other: &dyn CredentialMatcher) -> bool {
        (**self).dyn_eq(other)
    }

    fn dyn_hash(&self, state: &mut dyn Hasher) {
        (**self).dyn_hash(state);
    }
}
