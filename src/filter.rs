//! Accept/reject predicates and the per-sink filter chain.
//!
//! A [`FilterChain`] is owned by exactly one sink, but the [`Filter`] objects
//! inside it are shared: the same predicate instance may sit in several
//! chains at once, so chain membership is identity-based (`Arc::ptr_eq`),
//! not value-based.

use regex::Regex;
use std::sync::Arc;

use crate::record::{Level, LogRecord};

/// A predicate over log records.
pub trait Filter: Send + Sync {
    /// Returns true if the record should be emitted.
    fn accepts(&self, record: &LogRecord) -> bool;
}

/// A filter shared across one or more chains.
pub type SharedFilter = Arc<dyn Filter>;

/// Ordered AND-combination of shared filters.
///
/// An empty chain accepts every record.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<SharedFilter>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter to the end of the chain.
    pub fn add_filter(&mut self, filter: SharedFilter) {
        self.filters.push(filter);
    }

    /// Remove every occurrence of `filter`, compared by object identity.
    /// Removing a filter that is not present is a no-op.
    pub fn remove_filter(&mut self, filter: &SharedFilter) {
        self.filters.retain(|f| !Arc::ptr_eq(f, filter));
    }

    /// True iff every filter in the chain accepts the record.
    /// Short-circuits on the first rejection.
    pub fn accepts(&self, record: &LogRecord) -> bool {
        self.filters.iter().all(|f| f.accepts(record))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Accepts records at or above a minimum severity.
#[derive(Debug, Clone, Copy)]
pub struct LevelFilter {
    min: Level,
}

impl LevelFilter {
    pub fn new(min: Level) -> Self {
        Self { min }
    }
}

impl Filter for LevelFilter {
    fn accepts(&self, record: &LogRecord) -> bool {
        record.level >= self.min
    }
}

/// Accepts records emitted from a logger subtree.
///
/// The prefix is matched against the record's full source path, so
/// `SourceFilter::new("/app")` accepts `/app` and everything beneath it.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    prefix: String,
}

impl SourceFilter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Filter for SourceFilter {
    fn accepts(&self, record: &LogRecord) -> bool {
        record.source.starts_with(&self.prefix)
    }
}

/// Accepts records whose message matches a regular expression.
///
/// The pattern is compiled once at construction; an invalid pattern fails
/// there rather than at logging time.
#[derive(Debug, Clone)]
pub struct PatternFilter {
    pattern: Regex,
}

impl PatternFilter {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Filter for PatternFilter {
    fn accepts(&self, record: &LogRecord) -> bool {
        self.pattern.is_match(&record.message)
    }
}
