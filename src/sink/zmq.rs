//! ZeroMQ publish backend.
//!
//! Publishes each accepted record as a two-frame message (topic, then the
//! JSON-encoded record) on a PUB socket bound to `tcp://host:port`.
//! Subscribers filter on the topic frame.

use tracing::warn;

use crate::filter::FilterChain;
use crate::record::LogRecord;
use crate::sink::{Sink, SinkError};

pub struct ZmqPubSink {
    // Sockets keep their context alive, but holding it makes teardown
    // order explicit.
    _ctx: zmq::Context,
    socket: zmq::Socket,
    topic: String,
    chain: FilterChain,
}

impl ZmqPubSink {
    /// Bind a PUB socket to `tcp://host:port`.
    ///
    /// Bind failures surface here; send failures after construction are
    /// logged and swallowed.
    pub fn new(host: &str, port: u16, topic: impl Into<String>) -> Result<Self, SinkError> {
        let ctx = zmq::Context::new();
        let socket = ctx.socket(zmq::PUB)?;
        socket.bind(&format!("tcp://{}:{}", host, port))?;
        Ok(Self {
            _ctx: ctx,
            socket,
            topic: topic.into(),
            chain: FilterChain::new(),
        })
    }
}

impl Sink for ZmqPubSink {
    fn chain(&self) -> &FilterChain {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut FilterChain {
        &mut self.chain
    }

    fn write(&mut self, record: &LogRecord) {
        let payload = match serde_json::to_vec(record) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "log record serialization failed");
                return;
            }
        };

        let sent = self
            .socket
            .send(self.topic.as_bytes(), zmq::SNDMORE)
            .and_then(|()| self.socket.send(payload, 0));
        if let Err(e) = sent {
            warn!(error = %e, topic = %self.topic, "log publish failed");
        }
    }
}
