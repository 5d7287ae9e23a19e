//! One open blueprint: the node registry, the graph and the variable table,
//! owned together so editing and compiling see the same state.

mod snapshot;

pub use snapshot::BlueprintSnapshot;

use crate::compiler::{CodeCompiler, CompilerOptions};
use crate::definition::{
    NodeDefinition, NodeRegistry, PinDefinition, PinKind, BEGIN_NODE_ID, BEGIN_TYPE,
};
use crate::error::{CompileError, GraphError};
use crate::graph::{ConnectOutcome, Graph, Listener, Node, PinSide, Position, VariableTable};
use crate::nodes::register_builtin_nodes;

/// Where `reset_graph` drops the entry node.
pub const BEGIN_POSITION: Position = Position { x: 10.0, y: 10.0 };

#[derive(Debug)]
pub struct Blueprint {
    registry: NodeRegistry,
    graph: Graph,
    variables: VariableTable,
}

impl Default for Blueprint {
    fn default() -> Self {
        Self::new(NodeRegistry::new())
    }
}

impl Blueprint {
    /// A blueprint over the given node types, holding just the entry node.
    pub fn new(registry: NodeRegistry) -> Self {
        let mut blueprint = Self {
            registry,
            graph: Graph::new(),
            variables: VariableTable::new(),
        };
        blueprint.reset_graph();
        blueprint
    }

    pub fn with_builtin_nodes() -> Self {
        let mut registry = NodeRegistry::new();
        register_builtin_nodes(&mut registry);
        Self::new(registry)
    }

    /// Registers another node type. See [`NodeRegistry::register`].
    pub fn register(&mut self, definition: NodeDefinition) -> bool {
        self.registry.register(definition)
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableTable {
        &mut self.variables
    }

    /// Subscribes one listener to both graph and variable changes.
    pub fn subscribe(&mut self, listener: Listener) {
        self.graph.subscribe(listener.clone());
        self.variables.subscribe(listener);
    }

    /// Places a new instance of a registered node type and returns its id.
    pub fn create_node(&mut self, type_name: &str, position: Position) -> Result<String, GraphError> {
        if !self.registry.contains(type_name) {
            tracing::warn!("Node type \"{}\" is not registered", type_name);
            return Err(GraphError::UnknownNodeType(type_name.to_string()));
        }
        let id = self.graph.fresh_node_id();
        self.graph
            .insert_node(Node::new(&id, type_name, position));
        Ok(id)
    }

    /// Clears the graph down to a single entry node with the fixed id.
    pub fn reset_graph(&mut self) {
        self.graph.clear();
        self.graph
            .insert_node(Node::new(BEGIN_NODE_ID, BEGIN_TYPE, BEGIN_POSITION));
    }

    pub fn definition_for(&self, node_id: &str) -> Option<&NodeDefinition> {
        self.graph
            .node(node_id)
            .and_then(|node| self.registry.lookup(&node.type_name))
    }

    pub fn pin_definition(&self, node_id: &str, pin: &str) -> Result<&PinDefinition, GraphError> {
        self.node_definition(node_id)?
            .pin(pin)
            .ok_or_else(|| GraphError::PinNotFound {
                node_id: node_id.to_string(),
                pin: pin.to_string(),
            })
    }

    fn node_definition(&self, node_id: &str) -> Result<&NodeDefinition, GraphError> {
        let node = self
            .graph
            .node(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        self.registry
            .lookup(&node.type_name)
            .ok_or_else(|| GraphError::UnknownNodeType(node.type_name.clone()))
    }

    /// Connects two pins in one go, driving the same pending-connection steps
    /// an editor would. Each pin's side comes from its node definition, so the
    /// arguments may name the input first; two pins on the same side are
    /// rejected.
    pub fn connect(
        &mut self,
        from_node_id: &str,
        from_pin: &str,
        to_node_id: &str,
        to_pin: &str,
    ) -> Result<ConnectOutcome, GraphError> {
        let (from_kind, from_side) = self.pin_role(from_node_id, from_pin, PinSide::Output)?;
        let (to_kind, to_side) = self.pin_role(to_node_id, to_pin, PinSide::Input)?;

        if self.graph.pending().is_some() {
            self.graph.cancel_connect();
        }
        self.graph
            .start_connect(from_node_id, from_pin, from_kind, from_side);
        Ok(self
            .graph
            .end_connect(to_node_id, to_pin, to_kind, to_side))
    }

    /// The kind and side of a pin. A name declared on both sides resolves to
    /// `preferred`.
    fn pin_role(
        &self,
        node_id: &str,
        pin: &str,
        preferred: PinSide,
    ) -> Result<(PinKind, PinSide), GraphError> {
        let definition = self.node_definition(node_id)?;
        let input = definition.input_pin(pin).map(|p| (p.kind, PinSide::Input));
        let output = definition.output_pin(pin).map(|p| (p.kind, PinSide::Output));
        let role = match preferred {
            PinSide::Input => input.or(output),
            PinSide::Output => output.or(input),
        };
        role.ok_or_else(|| GraphError::PinNotFound {
            node_id: node_id.to_string(),
            pin: pin.to_string(),
        })
    }

    /// Compiles the current state with the given options.
    pub fn compile(&self, options: &CompilerOptions) -> Result<String, CompileError> {
        CodeCompiler::builder(self)
            .with_options(options.clone())
            .build()
            .generate()
    }
}
