use super::{GraphEvent, Listener, Listeners};
use crate::error::GraphError;
use crate::value::{DataType, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl VariableType {
    pub fn data_type(self) -> DataType {
        match self {
            VariableType::String => DataType::Text,
            VariableType::Number => DataType::Number,
            VariableType::Boolean => DataType::Boolean,
            VariableType::Object => DataType::Object,
            VariableType::Array => DataType::Array,
        }
    }
}

/// A blueprint variable. Nodes refer to it by name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    #[serde(default)]
    pub default_value: Value,
}

/// The variables of one blueprint, kept in creation order.
#[derive(Debug, Default)]
pub struct VariableTable {
    variables: Vec<Variable>,
    listeners: Listeners,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.subscribe(listener);
    }

    pub fn create(
        &mut self,
        name: &str,
        var_type: VariableType,
        default_value: impl Into<Value>,
    ) -> Result<(), GraphError> {
        self.insert(Variable {
            name: name.to_string(),
            var_type,
            default_value: default_value.into(),
        })
    }

    pub fn insert(&mut self, variable: Variable) -> Result<(), GraphError> {
        if self.get(&variable.name).is_some() {
            tracing::warn!("Variable \"{}\" already exists", variable.name);
            return Err(GraphError::VariableExists(variable.name));
        }
        self.variables.push(variable);
        self.listeners.emit(GraphEvent::VariablesChanged);
        Ok(())
    }

    /// Deletes a variable. Nodes still naming it are left alone.
    pub fn delete(&mut self, name: &str) -> Result<Variable, GraphError> {
        let index = self
            .variables
            .iter()
            .position(|v| v.name == name)
            .ok_or_else(|| GraphError::VariableNotFound(name.to_string()))?;
        let removed = self.variables.remove(index);
        self.listeners.emit(GraphEvent::VariablesChanged);
        Ok(removed)
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn all(&self) -> &[Variable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn clear(&mut self) {
        self.variables.clear();
        self.listeners.emit(GraphEvent::VariablesChanged);
    }
}
