//! Node definitions: the pin shapes, category and code-generation behavior
//! shared by every instance of a node type.

mod behavior;
pub mod pin;
pub mod prepare;
pub mod registry;

pub use behavior::*;
pub use pin::*;
pub use prepare::*;
pub use registry::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Id of the protected entry node created by `reset_graph`.
pub const BEGIN_NODE_ID: &str = "$begin";
pub const BEGIN_TYPE: &str = "begin";
/// Variable-getter nodes resolve to the bare variable name.
pub const VARGET_TYPE: &str = "varget";
pub const VARSET_TYPE: &str = "varset";

pub const DEFAULT_CORE_CATEGORY: &str = "Core";
pub const DEFAULT_LOGIC_CATEGORY: &str = "Logic";
pub const LODASH_CATEGORY: &str = "Lodash";

/// Semantic category of a node type. Only `Begin` changes compiler behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Begin,
    Function,
    Logic,
    Call,
    Return,
}

#[derive(Clone)]
pub struct NodeDefinition {
    pub name: String,
    pub label: String,
    pub kind: NodeKind,
    pub category: String,
    /// Hidden types never show up in the palette.
    pub hidden: bool,
    pub inputs: Vec<PinDefinition>,
    pub outputs: Vec<PinDefinition>,
    pub prepare: Vec<PrepareItem>,
    pub behavior: Arc<dyn NodeBehavior>,
}

impl NodeDefinition {
    pub fn new(name: &str, label: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            category: DEFAULT_CORE_CATEGORY.to_string(),
            hidden: false,
            inputs: Vec::new(),
            outputs: Vec::new(),
            prepare: Vec::new(),
            behavior: Arc::new(PassThrough),
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn input(mut self, pin: PinDefinition) -> Self {
        self.inputs.push(pin);
        self
    }

    pub fn output(mut self, pin: PinDefinition) -> Self {
        self.outputs.push(pin);
        self
    }

    pub fn prepare(mut self, item: PrepareItem) -> Self {
        self.prepare.push(item);
        self
    }

    pub fn behavior(mut self, behavior: impl NodeBehavior + 'static) -> Self {
        self.behavior = Arc::new(behavior);
        self
    }

    pub fn input_pin(&self, name: &str) -> Option<&PinDefinition> {
        self.inputs.iter().find(|p| p.name == name)
    }

    pub fn output_pin(&self, name: &str) -> Option<&PinDefinition> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Looks a pin up among inputs first, then outputs.
    pub fn pin(&self, name: &str) -> Option<&PinDefinition> {
        self.input_pin(name).or_else(|| self.output_pin(name))
    }
}

impl fmt::Debug for NodeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDefinition")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("category", &self.category)
            .field("hidden", &self.hidden)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("prepare", &self.prepare)
            .finish_non_exhaustive()
    }
}
