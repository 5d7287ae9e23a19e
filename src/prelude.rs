//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the codeck crate:
//! the blueprint, the compiler and its options, node definitions and the
//! graph model.

// Document and compilation
pub use crate::compiler::{
    CodeCompiler, CompilerOptions, Dialect, ModuleType, ResolutionContext, ScriptType,
};
pub use crate::document::{Blueprint, BlueprintSnapshot};

// Node definitions
pub use crate::definition::{
    FnBehavior, ImportMember, NodeBehavior, NodeDefinition, NodeKind, NodeRegistry,
    PinDefinition, PinKind, PrepareItem, BEGIN_NODE_ID, STANDARD_PIN_EXEC_IN,
    STANDARD_PIN_EXEC_OUT,
};

// Graph model
pub use crate::graph::{ConnectOutcome, Graph, GraphEvent, Node, Position, VariableType};
pub use crate::value::{DataType, Value};

// Error types
pub use crate::error::{CompileError, GraphError, SnapshotError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
