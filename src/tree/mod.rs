//! The logger tree: node arena, registry, and broadcast.
//!
//! [`LogTree`] is an explicit value owning the whole hierarchy — the node
//! arena, the sink table, and the timestamp epoch. There is no process-wide
//! singleton: construct a tree at startup, pass [`Logger`] handles around,
//! and dropping the tree tears everything down.
//!
//! Delivery is synchronous and inline: a logging call runs every matching
//! sink's `handle` on the caller's thread before returning, under a single
//! tree-wide lock. Sinks must therefore not call back into the tree from
//! their `write`.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::filter::{FilterChain, SharedFilter};
use crate::record::{Level, LogRecord};
use crate::sink::{Sink, SinkId, SinkTable};

/// Index into the tree's node arena. Nodes are never removed, so an id
/// stays valid for the life of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

struct Node {
    name: String,
    path: String,
    /// Back-reference to the parent; `None` only for the root. Broadcast
    /// does not walk this — delivery targets the emitting node's own sinks
    /// only.
    parent: Option<NodeId>,
    /// Stored at construction but not consulted during broadcast. Kept so
    /// the question of parent-forwarding stays visible in the data model.
    propagate: bool,
    children: BTreeMap<String, NodeId>,
    /// Subscription tokens in insertion order. A token may outlive its
    /// sink; stale entries are pruned during publish.
    sinks: Vec<SinkId>,
}

struct TreeInner {
    nodes: Vec<Node>,
    sinks: SinkTable,
    epoch: Instant,
}

impl TreeInner {
    fn new() -> Self {
        let root = Node {
            name: String::new(),
            path: String::new(),
            parent: None,
            propagate: true,
            children: BTreeMap::new(),
            sinks: Vec::new(),
        };
        Self {
            nodes: vec![root],
            sinks: SinkTable::new(),
            epoch: Instant::now(),
        }
    }

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a child named `name` under `parent` if it does not exist.
    fn ensure_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        if let Some(&existing) = self.nodes[parent.0].children.get(name) {
            return existing;
        }

        let path = format!("{}/{}", self.nodes[parent.0].path, name);
        trace!(path = %path, "created logger node");
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            path,
            parent: Some(parent),
            propagate: true,
            children: BTreeMap::new(),
            sinks: Vec::new(),
        });
        self.nodes[parent.0].children.insert(name.to_string(), id);
        id
    }

    /// Head/tail path resolution, creating every missing node along the way.
    /// Idempotent: the same path always lands on the same node. Empty
    /// segments (including the empty path) materialize empty-named nodes
    /// rather than erroring.
    fn resolve(&mut self, from: NodeId, path: &str) -> NodeId {
        let mut current = from;
        for segment in path.split('/') {
            current = self.ensure_child(current, segment);
        }
        current
    }

    /// Attach a token to `node` and, depth-first, to every child that
    /// exists right now. Children created later do not inherit the
    /// subscription. Duplicate subscriptions stack: no deduplication.
    fn attach(&mut self, node: NodeId, id: SinkId) {
        self.nodes[node.0].sinks.push(id);
        let children: Vec<NodeId> = self.nodes[node.0].children.values().copied().collect();
        for child in children {
            self.attach(child, id);
        }
    }

    /// Remove every occurrence of the token from `node` and all current
    /// children. Token equality is independent of sink liveness, so this
    /// works for already-removed sinks too. Absent tokens are a no-op.
    fn detach(&mut self, node: NodeId, id: SinkId) {
        self.nodes[node.0].sinks.retain(|&s| s != id);
        let children: Vec<NodeId> = self.nodes[node.0].children.values().copied().collect();
        for child in children {
            self.detach(child, id);
        }
    }

    /// Broadcast to this node's own sinks, in insertion order. Tokens that
    /// no longer resolve are pruned as a side effect.
    fn publish(&mut self, node: NodeId, record: &LogRecord) {
        let TreeInner { nodes, sinks, .. } = self;
        let subs = &mut nodes[node.0].sinks;

        let mut i = 0;
        while i < subs.len() {
            let id = subs[i];
            match sinks.get_mut(id) {
                Some(sink) => {
                    sink.handle(record);
                    i += 1;
                }
                None => {
                    trace!(sink = ?id, "pruned stale subscription");
                    subs.remove(i);
                }
            }
        }
    }
}

/// The registry: root of the logger hierarchy and owner of all sinks.
///
/// Cheap to share — [`Logger`] handles and clones of the tree refer to the
/// same state through a single tree-wide lock.
#[derive(Clone)]
pub struct LogTree {
    inner: Arc<Mutex<TreeInner>>,
}

impl LogTree {
    /// Create an empty tree. The timestamp epoch is captured here: every
    /// record's `timestamp` is seconds elapsed since this call.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TreeInner::new())),
        }
    }

    /// Resolve `path` from the root, creating missing nodes. Never fails;
    /// calling twice with the same path yields handles to the same node.
    pub fn get(&self, path: &str) -> Logger {
        let mut inner = self.inner.lock();
        let root = inner.root();
        let node = inner.resolve(root, path);
        Logger {
            inner: self.inner.clone(),
            node,
        }
    }

    /// Register a sink, transferring ownership to the tree. The returned
    /// token is the only way to refer to it afterwards.
    pub fn add_sink(&self, sink: Box<dyn Sink>) -> SinkId {
        let id = self.inner.lock().sinks.insert(sink);
        debug!(sink = ?id, "sink registered");
        id
    }

    /// Drop a sink. Returns false if the token was already dead. Any
    /// remaining subscriptions dangle and are pruned on later publishes.
    pub fn remove_sink(&self, id: SinkId) -> bool {
        let removed = self.inner.lock().sinks.remove(id).is_some();
        if removed {
            debug!(sink = ?id, "sink removed");
        }
        removed
    }

    /// True if the token still resolves to a live sink.
    pub fn sink_alive(&self, id: SinkId) -> bool {
        self.inner.lock().sinks.contains(id)
    }

    /// Mutate a registered sink's filter chain in place. Returns `None` if
    /// the sink no longer exists.
    pub fn with_sink_chain<R>(
        &self,
        id: SinkId,
        f: impl FnOnce(&mut FilterChain) -> R,
    ) -> Option<R> {
        self.inner.lock().sinks.with_chain_mut(id, f)
    }

    /// Append a filter to a registered sink's chain. Returns false if the
    /// sink no longer exists.
    pub fn add_filter(&self, id: SinkId, filter: SharedFilter) -> bool {
        self.with_sink_chain(id, |chain| chain.add_filter(filter))
            .is_some()
    }

    /// Remove a filter from a registered sink's chain, by object identity.
    /// Returns false if the sink no longer exists.
    pub fn remove_filter(&self, id: SinkId, filter: &SharedFilter) -> bool {
        self.with_sink_chain(id, |chain| chain.remove_filter(filter))
            .is_some()
    }

    /// Subscribe a sink at `path` (created if missing) and every currently
    /// existing descendant.
    pub fn subscribe(&self, id: SinkId, path: &str) {
        self.get(path).subscribe(id);
    }

    /// Remove the sink's subscriptions from `path` (created if missing) and
    /// every currently existing descendant.
    pub fn unsubscribe(&self, id: SinkId, path: &str) {
        self.get(path).unsubscribe(id);
    }
}

impl Default for LogTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one node in the tree. Cloning is cheap and clones refer to the
/// same node.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Mutex<TreeInner>>,
    node: NodeId,
}

impl Logger {
    /// Full path of this node. The root's path is empty; children are
    /// `parent-path + "/" + name`.
    pub fn path(&self) -> String {
        self.inner.lock().nodes[self.node.0].path.clone()
    }

    /// Local name segment of this node (empty for the root).
    pub fn name(&self) -> String {
        self.inner.lock().nodes[self.node.0].name.clone()
    }

    /// Handle to the parent node; `None` at the root.
    pub fn parent(&self) -> Option<Logger> {
        let parent = self.inner.lock().nodes[self.node.0].parent;
        parent.map(|node| Logger {
            inner: self.inner.clone(),
            node,
        })
    }

    /// Whether records should forward to ancestor sinks. Stored but not
    /// consulted by broadcast; see the module docs.
    pub fn propagate(&self) -> bool {
        self.inner.lock().nodes[self.node.0].propagate
    }

    /// Resolve `path` relative to this node, creating missing nodes.
    pub fn get(&self, path: &str) -> Logger {
        let mut inner = self.inner.lock();
        let node = inner.resolve(self.node, path);
        Logger {
            inner: self.inner.clone(),
            node,
        }
    }

    /// Attach `sink` here and to every currently existing descendant.
    pub fn subscribe(&self, id: SinkId) {
        let mut inner = self.inner.lock();
        inner.attach(self.node, id);
        debug!(sink = ?id, node = %inner.nodes[self.node.0].path, "sink subscribed");
    }

    /// Detach `sink` from here and every currently existing descendant.
    pub fn unsubscribe(&self, id: SinkId) {
        let mut inner = self.inner.lock();
        inner.detach(self.node, id);
        debug!(sink = ?id, node = %inner.nodes[self.node.0].path, "sink unsubscribed");
    }

    /// Number of subscription entries currently attached to this node,
    /// stale tokens included. Duplicates count separately.
    pub fn subscription_count(&self) -> usize {
        self.inner.lock().nodes[self.node.0].sinks.len()
    }

    /// Build a record at `level` and broadcast it to this node's sinks.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        let mut inner = self.inner.lock();
        let record = LogRecord::new(
            inner.nodes[self.node.0].path.clone(),
            inner.epoch.elapsed().as_secs_f64(),
            level,
            message,
        );
        inner.publish(self.node, &record);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(Level::Critical, message);
    }

    /// True if this handle and `other` denote the same node of the same
    /// tree.
    pub fn same_node(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) && self.node == other.node
    }
}
