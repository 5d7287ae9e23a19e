use std::fmt;
use std::sync::Arc;

/// Change notifications fired synchronously after each mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent {
    NodesChanged,
    NodePositionChanged(String),
    NodeDataChanged(String),
    ConnectionsChanged,
    PendingConnectionChanged,
    VariablesChanged,
}

pub type Listener = Arc<dyn Fn(&GraphEvent) + Send + Sync>;

/// The set of callbacks a store notifies. Listeners are shared handles so the
/// same callback can watch several stores.
#[derive(Default, Clone)]
pub struct Listeners {
    listeners: Vec<Listener>,
}

impl Listeners {
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: GraphEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
