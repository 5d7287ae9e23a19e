use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The declared type of a data pin or a variable, used to coerce literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[serde(alias = "string", alias = "textarea", alias = "select")]
    Text,
    Number,
    Boolean,
    Object,
    Array,
}

/// A literal value stored on a node instance or as a variable default.
///
/// Serialized as plain JSON; `null` maps to `Unset`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    #[default]
    Unset,
    Number(f64),
    Bool(bool),
    Text(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The neutral literal for a declared type.
    pub fn zero(data_type: DataType) -> Value {
        match data_type {
            DataType::Text => Value::Text(String::new()),
            DataType::Number => Value::Number(0.0),
            DataType::Boolean => Value::Bool(false),
            DataType::Object => Value::Object(BTreeMap::new()),
            DataType::Array => Value::Array(Vec::new()),
        }
    }

    /// Converts the value to the shape a pin declares.
    ///
    /// Untyped pins keep whatever was stored. Unparseable text on a number pin
    /// falls back to the zero value, unrecognized text on a boolean pin is kept
    /// as text so a node can treat it as a raw condition.
    pub fn coerce(&self, data_type: Option<DataType>) -> Value {
        let Some(data_type) = data_type else {
            return self.clone();
        };

        let coerced = match (data_type, self) {
            (_, Value::Unset) => Value::Unset,
            (DataType::Number, Value::Number(_)) => self.clone(),
            (DataType::Number, Value::Bool(b)) => Value::Number(if *b { 1.0 } else { 0.0 }),
            (DataType::Number, Value::Text(s)) => {
                s.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map_or(Value::Unset, Value::Number)
            }
            (DataType::Boolean, Value::Bool(_)) => self.clone(),
            (DataType::Boolean, Value::Number(n)) => Value::Bool(*n != 0.0),
            (DataType::Boolean, Value::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Value::Bool(true),
                "false" | "no" | "0" | "" => Value::Bool(false),
                _ => self.clone(),
            },
            (DataType::Text, Value::Text(_)) => self.clone(),
            (DataType::Text, Value::Number(_) | Value::Bool(_)) => Value::Text(self.to_string()),
            _ => self.clone(),
        };

        if coerced.is_unset() {
            Value::zero(data_type)
        } else {
            coerced
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unset => Ok(()),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{}", s),
            Value::Array(_) | Value::Object(_) => {
                write!(f, "{}", serde_json::Value::from(self.clone()))
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Unset,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Unset),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Unset => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => {
                // Whole numbers stay integers so `0` does not become `0.0`.
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    serde_json::Value::from(n as i64)
                } else {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            Value::Text(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
