use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canvas coordinates of a node. Only stored and round-tripped, never read by
/// the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A node instance in the blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    /// Name of the `NodeDefinition` this node instantiates.
    pub type_name: String,
    #[serde(default)]
    pub position: Position,
    /// Literal values used when the matching input pin is unconnected.
    #[serde(default)]
    pub data: BTreeMap<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, type_name: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            position,
            data: BTreeMap::new(),
        }
    }

    pub fn with_data(mut self, data: BTreeMap<String, Value>) -> Self {
        self.data = data;
        self
    }
}
