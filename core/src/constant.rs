//! `ConstantMatcher`: a fixed outcome.

use crate::{Credential, CredentialMatcher};
use std::any::Any;
use std::hash::{Hash, Hasher};

/// Matches everything or nothing, regardless of the candidate.
///
/// Useful as an explicit always/never criterion and as a neutral element
/// when assembling matcher trees. Describes as the bare boolean literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstantMatcher {
    outcome: bool,
}

impl ConstantMatcher {
    /// Create a matcher with the given fixed outcome.
    #[must_use]
    pub fn new(outcome: bool) -> Self {
        Self { outcome }
    }

    /// The matcher that accepts every credential.
    #[must_use]
    pub fn always() -> Self {
        Self::new(true)
    }

    /// The matcher that rejects every credential.
    #[must_use]
    pub fn never() -> Self {
        Self::new(false)
    }
}

impl CredentialMatcher for ConstantMatcher {
    fn matches(&self, _item: &dyn Credential) -> bool {
        self.outcome
    }

    fn describe(&self) -> Option<String> {
        Some(self.outcome.to_string())
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
