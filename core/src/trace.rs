//! Diagnostic trace records for matcher evaluation.
//!
//! Tracing is an explicit, optional collaborator: evaluation through
//! [`matches_traced`](crate::CredentialMatcher::matches_traced) takes a
//! [`TraceSink`] and emits level-tagged [`TraceRecord`]s into it. Plain
//! [`matches`](crate::CredentialMatcher::matches) emits nothing. Records
//! never influence the match result.
//!
//! Records carry Debug renderings of the matcher and the candidate item, so
//! a sink can correlate the records of one evaluation without holding
//! references into the matcher tree.

use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};

/// How detailed a trace record is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceLevel {
    /// Fine-grained, per-step detail: entry into an evaluation, individual
    /// property reads, sub-matcher outcomes.
    Fine,

    /// One record per evaluation summarizing inputs and outcome.
    Summary,
}

/// One diagnostic record emitted during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    /// Detail level of this record.
    pub level: TraceLevel,
    /// Debug rendering of the matcher that emitted the record.
    pub matcher: String,
    /// Debug rendering of the candidate item.
    pub item: String,
    /// What happened.
    pub message: String,
}

impl TraceRecord {
    /// Create a record at the given level.
    pub fn new<M, I>(level: TraceLevel, matcher: &M, item: &I, message: impl Into<String>) -> Self
    where
        M: Debug + ?Sized,
        I: Debug + ?Sized,
    {
        Self {
            level,
            matcher: format!("{matcher:?}"),
            item: format!("{item:?}"),
            message: message.into(),
        }
    }

    /// Create a [`TraceLevel::Fine`] record.
    pub fn fine<M, I>(matcher: &M, item: &I, message: impl Into<String>) -> Self
    where
        M: Debug + ?Sized,
        I: Debug + ?Sized,
    {
        Self::new(TraceLevel::Fine, matcher, item, message)
    }

    /// Create a [`TraceLevel::Summary`] record.
    pub fn summary<M, I>(matcher: &M, item: &I, message: impl Into<String>) -> Self
    where
        M: Debug + ?Sized,
        I: Debug + ?Sized,
    {
        Self::new(TraceLevel::Summary, matcher, item, message)
    }
}

/// Receiver for trace records.
///
/// Sinks must be `Send + Sync`: a single sink may observe concurrent
/// evaluations from multiple threads.
pub trait TraceSink: Send + Sync {
    /// Accept one record.
    fn record(&self, record: TraceRecord);
}

/// A sink that stores records in memory.
///
/// Intended for tests and interactive debugging.
///
/// # Example
///
/// ```
/// use credql::{CollectingSink, Credential, CredentialMatcher, UsernameMatcher};
///
/// #[derive(Debug)]
/// struct Anonymous;
/// impl Credential for Anonymous {}
///
/// let sink = CollectingSink::new();
/// let matched = UsernameMatcher::new("alice").matches_traced(&Anonymous, &sink);
/// assert!(!matched);
/// assert!(!sink.records().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CollectingSink {
    records: Mutex<Vec<TraceRecord>>,
}

impl CollectingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the records collected so far.
    #[must_use]
    pub fn records(&self) -> Vec<TraceRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Discard all collected records.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl TraceSink for CollectingSink {
    fn record(&self, record: TraceRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}
