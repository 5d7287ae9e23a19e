use super::NodeDefinition;
use ahash::AHashMap;

/// Maps node type names to their definitions, in registration order.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    definitions: Vec<NodeDefinition>,
    index: AHashMap<String, usize>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition. The first registration of a name wins; later
    /// duplicates are dropped with a warning and `false` is returned.
    pub fn register(&mut self, definition: NodeDefinition) -> bool {
        if self.index.contains_key(&definition.name) {
            tracing::warn!("Node \"{}\" is already registered", definition.name);
            return false;
        }
        self.index
            .insert(definition.name.clone(), self.definitions.len());
        self.definitions.push(definition);
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&NodeDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Every definition a user may place from the palette.
    pub fn all_visible(&self) -> Vec<&NodeDefinition> {
        self.definitions.iter().filter(|d| !d.hidden).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
