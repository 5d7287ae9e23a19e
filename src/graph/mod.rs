//! The graph model: node instances, the connections between their pins, and
//! the variable table. Pure data plus change notifications; no code
//! generation happens here.

pub mod connection;
pub mod events;
pub mod node;
pub mod variable;

pub use connection::*;
pub use events::*;
pub use node::*;
pub use variable::*;

use crate::definition::BEGIN_NODE_ID;
use crate::value::Value;
use ahash::AHashMap;

/// Owns every node and connection of one blueprint.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: AHashMap<String, Node>,
    connections: Vec<Connection>,
    pending: Option<PendingConnection>,
    listeners: Listeners,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.subscribe(listener);
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Inserts a node as-is. Type validation is the caller's job.
    pub fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
        self.listeners.emit(GraphEvent::NodesChanged);
    }

    /// Removes a node and every connection touching it.
    ///
    /// The entry node is protected and this is a no-op for its id.
    pub fn remove_node(&mut self, node_id: &str) {
        if node_id == BEGIN_NODE_ID {
            tracing::debug!("Refusing to remove the entry node");
            return;
        }
        if !self.nodes.contains_key(node_id) {
            return;
        }

        let before = self.connections.len();
        self.connections
            .retain(|c| c.from_node_id != node_id && c.to_node_id != node_id);
        if self.connections.len() != before {
            self.listeners.emit(GraphEvent::ConnectionsChanged);
        }

        self.nodes.remove(node_id);
        self.listeners.emit(GraphEvent::NodesChanged);
    }

    pub fn set_node_data(&mut self, node_id: &str, key: &str, value: impl Into<Value>) {
        let Some(node) = self.nodes.get_mut(node_id) else {
            tracing::warn!("Node \"{}\" not found", node_id);
            return;
        };
        node.data.insert(key.to_string(), value.into());
        self.listeners
            .emit(GraphEvent::NodeDataChanged(node_id.to_string()));
    }

    pub fn update_node_position(&mut self, node_id: &str, position: Position) {
        let Some(node) = self.nodes.get_mut(node_id) else {
            tracing::warn!("Node \"{}\" not found", node_id);
            return;
        };
        node.position = position;
        self.listeners
            .emit(GraphEvent::NodePositionChanged(node_id.to_string()));
    }

    pub fn move_node(&mut self, node_id: &str, dx: f64, dy: f64) {
        let Some(position) = self.nodes.get(node_id).map(|n| n.position) else {
            tracing::warn!("Node \"{}\" not found", node_id);
            return;
        };
        self.update_node_position(node_id, position.offset(dx, dy));
    }

    /// Drops every node and connection, including the entry node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
        self.pending = None;
        self.listeners.emit(GraphEvent::ConnectionsChanged);
        self.listeners.emit(GraphEvent::NodesChanged);
    }

    /// A fresh id not used by any node in this graph.
    pub(crate) fn fresh_node_id(&self) -> String {
        loop {
            let id = generate_id();
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }
}

pub(crate) fn generate_id() -> String {
    format!("{:08x}", rand::random::<u32>())
}
