//! logtree — hierarchical logger tree with subscribable sinks.
//!
//! Named loggers form a tree mirroring an application's module structure.
//! Records emitted at any node broadcast to the sinks subscribed there; each
//! sink gates the record through its own filter chain before writing to its
//! backend.
//!
//! # Design
//!
//! - **Routing, not transport**: the tree delivers records inline on the
//!   caller's thread and guarantees per-node insertion order, nothing more.
//!   No durability, no backpressure, no cross-sink ordering.
//! - **Token subscriptions**: sinks are owned by the [`LogTree`] that
//!   registered them; logger nodes hold only [`SinkId`] tokens. Removing a
//!   sink leaves its subscriptions dangling, and broadcast prunes them
//!   lazily — a dead subscription is a normal condition, never an error.
//! - **Snapshot propagation**: subscribing at a node also attaches to every
//!   descendant that exists at that moment. Nodes created afterwards do not
//!   inherit the subscription.
//! - **Infallible logging**: path resolution creates missing nodes instead
//!   of failing, and backend write trouble stays inside the sink. The only
//!   caller-visible errors come from sink construction.
//!
//! # Example
//!
//! ```
//! use logtree::{ConsoleSink, Level, LevelFilter, LogTree};
//! use std::sync::Arc;
//!
//! let tree = LogTree::new();
//! let console = tree.add_sink(Box::new(ConsoleSink::new(false)));
//! tree.add_filter(console, Arc::new(LevelFilter::new(Level::Info)));
//! tree.subscribe(console, "app");
//!
//! tree.get("app").info("starting up");
//! tree.get("app").debug("dropped by the level filter");
//! ```

pub mod builder;
pub mod filter;
pub mod record;
pub mod sink;
pub mod tree;

pub use builder::LogTreeBuilder;
pub use filter::{Filter, FilterChain, LevelFilter, PatternFilter, SharedFilter, SourceFilter};
pub use record::{Level, LogRecord};
pub use sink::{ConsoleSink, FileSink, Sink, SinkError, SinkId};
#[cfg(feature = "zmq")]
pub use sink::ZmqPubSink;
pub use tree::{LogTree, Logger};
