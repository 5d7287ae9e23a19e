use super::{generate_id, Graph, GraphEvent};
use crate::definition::PinKind;
use serde::{Deserialize, Serialize};

/// A directed link from an output-shaped pin to an input-shaped pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub from_node_id: String,
    pub from_pin_name: String,
    pub to_node_id: String,
    pub to_pin_name: String,
}

impl Connection {
    fn same_endpoints(&self, other: &Connection) -> bool {
        self.from_node_id == other.from_node_id
            && self.from_pin_name == other.from_pin_name
            && self.to_node_id == other.to_node_id
            && self.to_pin_name == other.to_pin_name
    }

    pub fn touches(&self, node_id: &str, pin_name: &str) -> bool {
        (self.from_node_id == node_id && self.from_pin_name == pin_name)
            || (self.to_node_id == node_id && self.to_pin_name == pin_name)
    }
}

/// Which role of a pin the user grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinSide {
    Output,
    Input,
}

/// The half-made connection while the user drags from a pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConnection {
    pub node_id: String,
    pub pin_name: String,
    pub kind: PinKind,
    pub side: PinSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    SameNode,
    SameSide,
    KindMismatch,
}

/// What `end_connect` did with the pending connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A new connection with this id was inserted.
    Connected(String),
    /// An identical connection already existed; nothing was inserted.
    AlreadyConnected,
    Rejected(RejectReason),
    /// There was no pending connection to complete.
    Idle,
}

impl Graph {
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, connection_id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == connection_id)
    }

    /// The connection feeding an input pin, if any.
    pub fn incoming(&self, node_id: &str, pin_name: &str) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.to_node_id == node_id && c.to_pin_name == pin_name)
    }

    /// Every connection leaving an output pin.
    pub fn outgoing(&self, node_id: &str, pin_name: &str) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|c| c.from_node_id == node_id && c.from_pin_name == pin_name)
            .collect()
    }

    pub fn connections_for_node(&self, node_id: &str) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|c| c.from_node_id == node_id || c.to_node_id == node_id)
            .collect()
    }

    pub fn pending(&self) -> Option<&PendingConnection> {
        self.pending.as_ref()
    }

    /// Begins dragging a connection from a pin. Ignored while another
    /// connection is already pending.
    pub fn start_connect(
        &mut self,
        node_id: &str,
        pin_name: &str,
        kind: PinKind,
        side: PinSide,
    ) {
        if self.pending.is_some() {
            return;
        }
        self.pending = Some(PendingConnection {
            node_id: node_id.to_string(),
            pin_name: pin_name.to_string(),
            kind,
            side,
        });
        self.listeners.emit(GraphEvent::PendingConnectionChanged);
    }

    /// Completes the pending connection against a target pin.
    ///
    /// Whatever the outcome, the graph is back to idle afterwards.
    pub fn end_connect(
        &mut self,
        node_id: &str,
        pin_name: &str,
        kind: PinKind,
        side: PinSide,
    ) -> ConnectOutcome {
        let Some(pending) = self.pending.clone() else {
            return ConnectOutcome::Idle;
        };

        let rejection = if node_id == pending.node_id {
            Some(RejectReason::SameNode)
        } else if side == pending.side {
            Some(RejectReason::SameSide)
        } else if kind != pending.kind {
            Some(RejectReason::KindMismatch)
        } else {
            None
        };
        if let Some(reason) = rejection {
            tracing::debug!(?reason, "Connection rejected");
            self.cancel_connect();
            return ConnectOutcome::Rejected(reason);
        }

        let candidate = match pending.side {
            PinSide::Output => Connection {
                id: String::new(),
                from_node_id: pending.node_id,
                from_pin_name: pending.pin_name,
                to_node_id: node_id.to_string(),
                to_pin_name: pin_name.to_string(),
            },
            PinSide::Input => Connection {
                id: String::new(),
                from_node_id: node_id.to_string(),
                from_pin_name: pin_name.to_string(),
                to_node_id: pending.node_id,
                to_pin_name: pending.pin_name,
            },
        };

        let already_connected = self.connections.iter().any(|c| c.same_endpoints(&candidate));

        let outcome = if already_connected {
            ConnectOutcome::AlreadyConnected
        } else {
            match kind {
                // Exec pins are one-to-one on both ends.
                PinKind::Exec => self.connections.retain(|c| {
                    !(c.from_node_id == candidate.from_node_id
                        && c.from_pin_name == candidate.from_pin_name)
                        && !(c.to_node_id == candidate.to_node_id
                            && c.to_pin_name == candidate.to_pin_name)
                }),
                // Data outputs fan out, data inputs take a single writer.
                PinKind::Data => self.connections.retain(|c| {
                    !(c.to_node_id == candidate.to_node_id
                        && c.to_pin_name == candidate.to_pin_name)
                }),
            }

            let id = self.fresh_connection_id();
            self.connections.push(Connection {
                id: id.clone(),
                ..candidate
            });
            ConnectOutcome::Connected(id)
        };

        self.cancel_connect();
        self.listeners.emit(GraphEvent::ConnectionsChanged);
        outcome
    }

    pub fn cancel_connect(&mut self) {
        self.pending = None;
        self.listeners.emit(GraphEvent::PendingConnectionChanged);
    }

    /// True if any connection touches the pin, or if the pending connection
    /// starts from it.
    pub fn is_connected(&self, node_id: &str, pin_name: &str) -> bool {
        if let Some(pending) = &self.pending {
            if pending.node_id == node_id && pending.pin_name == pin_name {
                return true;
            }
        }
        self.connections.iter().any(|c| c.touches(node_id, pin_name))
    }

    pub fn remove_connection(&mut self, connection_id: &str) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c.id != connection_id);
        let removed = self.connections.len() != before;
        if removed {
            self.listeners.emit(GraphEvent::ConnectionsChanged);
        }
        removed
    }

    pub fn clear_connections(&mut self) {
        self.connections.clear();
        self.listeners.emit(GraphEvent::ConnectionsChanged);
    }

    /// Appends a connection without enforcing any cardinality rule. Used when
    /// restoring a saved graph verbatim.
    pub(crate) fn insert_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    fn fresh_connection_id(&self) -> String {
        loop {
            let id = generate_id();
            if self.connection(&id).is_none() {
                return id;
            }
        }
    }
}
