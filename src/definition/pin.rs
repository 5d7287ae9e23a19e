use crate::value::{DataType, Value};
use serde::{Deserialize, Serialize};

/// Name of the default exec input every statement node carries.
pub const STANDARD_PIN_EXEC_IN: &str = "$pin_exec_in";
/// Name of the default "next" exec output followed by the straight-line walk.
pub const STANDARD_PIN_EXEC_OUT: &str = "$pin_exec_out";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinKind {
    /// Control flow: "what runs next".
    Exec,
    /// A value port.
    Data,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinDefinition {
    pub name: String,
    pub kind: PinKind,
    /// Only used to coerce the node's stored literal when the pin is unconnected.
    pub data_type: Option<DataType>,
    pub default_value: Value,
    pub label: Option<String>,
}

impl PinDefinition {
    pub fn exec(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: PinKind::Exec,
            data_type: None,
            default_value: Value::Unset,
            label: None,
        }
    }

    pub fn data(name: &str) -> Self {
        Self {
            kind: PinKind::Data,
            ..Self::exec(name)
        }
    }

    pub fn typed(name: &str, data_type: DataType) -> Self {
        Self {
            data_type: Some(data_type),
            ..Self::data(name)
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn is_exec(&self) -> bool {
        self.kind == PinKind::Exec
    }
}

pub fn exec_pin_input() -> PinDefinition {
    PinDefinition::exec(STANDARD_PIN_EXEC_IN)
}

pub fn exec_pin_output() -> PinDefinition {
    PinDefinition::exec(STANDARD_PIN_EXEC_OUT)
}
