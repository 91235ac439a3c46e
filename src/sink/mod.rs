//! Sink capability interface and the token-based sink table.
//!
//! Sinks are owned by the [`LogTree`](crate::tree::LogTree) that registered
//! them; the logger nodes themselves hold only [`SinkId`] tokens. A token
//! does not keep its sink alive — removing the sink from the tree leaves any
//! subscriptions dangling, and broadcast prunes them lazily the next time
//! the token fails to resolve.

use std::collections::HashMap;

use thiserror::Error;

use crate::filter::FilterChain;
use crate::record::LogRecord;

pub mod console;
pub mod file;
#[cfg(feature = "zmq")]
pub mod zmq;

pub use console::ConsoleSink;
pub use file::FileSink;
#[cfg(feature = "zmq")]
pub use zmq::ZmqPubSink;

/// Errors surfaced from sink construction.
///
/// Logging calls themselves never fail; backend trouble after construction
/// is each sink's own concern.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open log file: {0}")]
    FileOpen(#[from] std::io::Error),
    #[cfg(feature = "zmq")]
    #[error("failed to bind publish socket: {0}")]
    Bind(#[from] ::zmq::Error),
}

/// Non-owning handle to a registered sink.
///
/// Ids are never reused within a tree, so two tokens compare equal iff they
/// denote the same registration, whether or not that sink still exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(pub(crate) u64);

/// A log record consumer.
///
/// Implementations provide the backend write and expose their filter chain;
/// the provided [`handle`](Sink::handle) applies the chain before every
/// write, so backends cannot forget to honor their filters.
///
/// Sinks must not call back into the owning tree from `write` — delivery
/// runs inline under the tree lock.
pub trait Sink: Send {
    /// The chain consulted before every write.
    fn chain(&self) -> &FilterChain;

    /// Mutable access for attaching and detaching filters.
    fn chain_mut(&mut self) -> &mut FilterChain;

    /// Backend-specific output. Only called for accepted records.
    fn write(&mut self, record: &LogRecord);

    /// Consume one record: apply the chain, then write if accepted.
    fn handle(&mut self, record: &LogRecord) {
        if self.chain().accepts(record) {
            self.write(record);
        }
    }
}

/// Owns registered sinks and maps tokens to them.
pub(crate) struct SinkTable {
    entries: HashMap<u64, Box<dyn Sink>>,
    next_id: u64,
}

impl SinkTable {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_id: 0,
        }
    }

    pub(crate) fn insert(&mut self, sink: Box<dyn Sink>) -> SinkId {
        let id = SinkId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id.0, sink);
        id
    }

    pub(crate) fn remove(&mut self, id: SinkId) -> Option<Box<dyn Sink>> {
        self.entries.remove(&id.0)
    }

    /// Resolve a token to its live sink, or `None` if the sink was removed.
    pub(crate) fn get_mut(&mut self, id: SinkId) -> Option<&mut (dyn Sink + '_)> {
        self.entries.get_mut(&id.0).map(|s| &mut **s as &mut dyn Sink)
    }

    pub(crate) fn contains(&self, id: SinkId) -> bool {
        self.entries.contains_key(&id.0)
    }

    pub(crate) fn with_chain_mut<R>(
        &mut self,
        id: SinkId,
        f: impl FnOnce(&mut FilterChain) -> R,
    ) -> Option<R> {
        self.entries.get_mut(&id.0).map(|s| f(s.chain_mut()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::LevelFilter;
    use crate::record::Level;
    use std::sync::Arc;

    struct CountingSink {
        chain: FilterChain,
        written: usize,
    }

    impl CountingSink {
        fn new() -> Self {
            Self {
                chain: FilterChain::new(),
                written: 0,
            }
        }
    }

    impl Sink for CountingSink {
        fn chain(&self) -> &FilterChain {
            &self.chain
        }

        fn chain_mut(&mut self) -> &mut FilterChain {
            &mut self.chain
        }

        fn write(&mut self, _record: &LogRecord) {
            self.written += 1;
        }
    }

    fn record(level: Level) -> LogRecord {
        LogRecord::new("/app", 0.0, level, "msg")
    }

    #[test]
    fn test_handle_applies_chain_before_write() {
        let mut sink = CountingSink::new();
        sink.chain_mut()
            .add_filter(Arc::new(LevelFilter::new(Level::Warning)));

        sink.handle(&record(Level::Debug));
        assert_eq!(sink.written, 0);

        sink.handle(&record(Level::Error));
        assert_eq!(sink.written, 1);
    }

    #[test]
    fn test_table_ids_are_never_reused() {
        let mut table = SinkTable::new();
        let first = table.insert(Box::new(CountingSink::new()));
        assert!(table.remove(first).is_some());

        let second = table.insert(Box::new(CountingSink::new()));
        assert_ne!(first, second);
        assert!(!table.contains(first));
        assert!(table.contains(second));
    }

    #[test]
    fn test_table_resolution_fails_after_removal() {
        let mut table = SinkTable::new();
        let id = table.insert(Box::new(CountingSink::new()));
        assert!(table.get_mut(id).is_some());

        table.remove(id);
        assert!(table.get_mut(id).is_none());
        assert!(table.remove(id).is_none());
    }
}
