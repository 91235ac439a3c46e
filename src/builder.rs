//! Fluent assembly of a tree with pre-wired sinks.
//!
//! The builder is the crate's configuration surface: declare where each
//! backend subscribes and its minimum level, then `build()` a ready tree.
//!
//! ```no_run
//! use logtree::{Level, LogTreeBuilder};
//!
//! let tree = LogTreeBuilder::new()
//!     .with_console("app", Level::Info, true)
//!     .with_file("app", "logs/app.log", Level::Debug)
//!     .build()?;
//! tree.get("app").info("up");
//! # Ok::<(), logtree::SinkError>(())
//! ```
//!
//! Subscription is a snapshot: the builder subscribes each sink before any
//! of your child loggers exist, so a sink attached at `app` covers `app`
//! itself, not children created later. Subscribe explicitly for deeper
//! coverage.

use std::path::PathBuf;
use std::sync::Arc;

use crate::filter::LevelFilter;
use crate::record::Level;
use crate::sink::{ConsoleSink, FileSink, Sink, SinkError};
use crate::tree::LogTree;

enum SinkSpec {
    Console {
        subscribe_at: String,
        min: Level,
        color: bool,
    },
    File {
        subscribe_at: String,
        file: PathBuf,
        min: Level,
    },
    #[cfg(feature = "zmq")]
    Zmq {
        subscribe_at: String,
        host: String,
        port: u16,
        topic: String,
        min: Level,
    },
}

/// Builder for a [`LogTree`] with threshold-filtered sinks.
#[derive(Default)]
pub struct LogTreeBuilder {
    specs: Vec<SinkSpec>,
}

impl LogTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a console sink subscribed at `subscribe_at`, dropping records
    /// below `min`.
    pub fn with_console(mut self, subscribe_at: &str, min: Level, color: bool) -> Self {
        self.specs.push(SinkSpec::Console {
            subscribe_at: subscribe_at.to_string(),
            min,
            color,
        });
        self
    }

    /// Add a file sink subscribed at `subscribe_at`, dropping records below
    /// `min`.
    pub fn with_file(mut self, subscribe_at: &str, file: impl Into<PathBuf>, min: Level) -> Self {
        self.specs.push(SinkSpec::File {
            subscribe_at: subscribe_at.to_string(),
            file: file.into(),
            min,
        });
        self
    }

    /// Add a ZeroMQ publish sink subscribed at `subscribe_at`.
    #[cfg(feature = "zmq")]
    pub fn with_zmq(
        mut self,
        subscribe_at: &str,
        host: &str,
        port: u16,
        topic: &str,
        min: Level,
    ) -> Self {
        self.specs.push(SinkSpec::Zmq {
            subscribe_at: subscribe_at.to_string(),
            host: host.to_string(),
            port,
            topic: topic.to_string(),
            min,
        });
        self
    }

    /// Construct the tree. Fails if any backend fails to construct (file
    /// open, socket bind); a builder with no sinks yields a valid tree that
    /// routes to nothing.
    pub fn build(self) -> Result<LogTree, SinkError> {
        let tree = LogTree::new();

        for spec in self.specs {
            let (subscribe_at, min, sink) = match spec {
                SinkSpec::Console {
                    subscribe_at,
                    min,
                    color,
                } => (
                    subscribe_at,
                    min,
                    Box::new(ConsoleSink::new(color)) as Box<dyn Sink>,
                ),
                SinkSpec::File {
                    subscribe_at,
                    file,
                    min,
                } => (
                    subscribe_at,
                    min,
                    Box::new(FileSink::new(file)?) as Box<dyn Sink>,
                ),
                #[cfg(feature = "zmq")]
                SinkSpec::Zmq {
                    subscribe_at,
                    host,
                    port,
                    topic,
                    min,
                } => (
                    subscribe_at,
                    min,
                    Box::new(crate::sink::ZmqPubSink::new(&host, port, topic)?) as Box<dyn Sink>,
                ),
            };

            let id = tree.add_sink(sink);
            if min > Level::Any {
                tree.add_filter(id, Arc::new(LevelFilter::new(min)));
            }
            tree.subscribe(id, &subscribe_at);
        }

        Ok(tree)
    }
}
