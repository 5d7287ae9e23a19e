use thiserror::Error;

/// Errors raised by mutations of the graph model and the variable table.
///
/// These are refusals, not corruption: the graph is left untouched and the
/// caller decides whether to surface the message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node type '{0}' is not registered")]
    UnknownNodeType(String),

    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Pin '{pin}' not found on node '{node_id}'")]
    PinNotFound { node_id: String, pin: String },

    #[error("Variable '{0}' already exists")]
    VariableExists(String),

    #[error("Variable '{0}' not found")]
    VariableNotFound(String),
}

/// Errors that abort a whole `generate()` call.
///
/// Local resolution failures (a dangling node, a missing pin definition) never
/// show up here; they resolve to "unset" and the compile carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("No Begin node found")]
    NoEntryNode,

    #[error("Multiple Begin nodes found ({count})")]
    MultipleEntryNodes { count: usize },

    #[error(
        "Node \"{label}\" (ID: {node_id}) has multiple exec connections from pin \"{pin}\". Each execution pin can only have one outgoing connection"
    )]
    AmbiguousExecFanout {
        node_id: String,
        label: String,
        pin: String,
    },

    #[error("Execution flow loops back into node '{node_id}'")]
    CyclicExecutionGraph { node_id: String },

    #[error("Data pin '{pin}' of node '{node_id}' depends on its own value")]
    CyclicDataDependency { node_id: String, pin: String },
}

/// Errors that can occur while loading a serialized blueprint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("Failed to parse blueprint JSON: {0}")]
    JsonParseError(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
