use super::Blueprint;
use crate::error::SnapshotError;
use crate::graph::{Connection, Node, Variable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The saved form of a blueprint.
///
/// Variables are stored as a map keyed by name, but their order in the
/// document is kept since it is the declaration order of the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlueprintSnapshot {
    #[serde(default)]
    pub nodes: BTreeMap<String, Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default, with = "ordered_variables")]
    pub variables: Vec<Variable>,
}

impl BlueprintSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::JsonParseError(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        // Every key is a string and every value a plain JSON value.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl Blueprint {
    /// Replaces the graph and variables with a saved snapshot, verbatim.
    ///
    /// Nodes of unregistered types are kept (and skipped at compile time) so
    /// a document survives a missing plugin.
    pub fn load_snapshot(&mut self, snapshot: BlueprintSnapshot) -> Result<(), SnapshotError> {
        self.graph.clear();
        self.variables.clear();

        for (key, mut node) in snapshot.nodes {
            if !self.registry.contains(&node.type_name) {
                tracing::warn!(
                    "Node {} has unregistered type \"{}\"",
                    node.id,
                    node.type_name
                );
            }
            if node.id.is_empty() {
                node.id = key;
            }
            self.graph.insert_node(node);
        }
        for connection in snapshot.connections {
            self.graph.insert_connection(connection);
        }
        for variable in snapshot.variables {
            self.variables.insert(variable)?;
        }
        Ok(())
    }

    pub fn to_snapshot(&self) -> BlueprintSnapshot {
        BlueprintSnapshot {
            nodes: self
                .graph
                .nodes()
                .map(|node| (node.id.clone(), node.clone()))
                .collect(),
            connections: self.graph.connections().to_vec(),
            variables: self.variables.all().to_vec(),
        }
    }

    pub fn to_json(&self) -> String {
        self.to_snapshot().to_json()
    }

    pub fn from_json(&mut self, json: &str) -> Result<(), SnapshotError> {
        self.load_snapshot(BlueprintSnapshot::from_json(json)?)
    }
}

mod ordered_variables {
    use crate::graph::Variable;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(variables: &[Variable], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(variables.len()))?;
        for variable in variables {
            map.serialize_entry(&variable.name, variable)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Variable>, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = Vec<Variable>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of variable name to variable")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut variables: Vec<Variable> = Vec::new();
                while let Some((_, variable)) = access.next_entry::<String, Variable>()? {
                    variables.push(variable);
                }
                Ok(variables)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}
