use super::context::ResolutionContext;
use super::prepare::PrepareList;
use super::text::pin_var_name;
use super::CompilerOptions;
use crate::definition::{NodeKind, NodeRegistry, STANDARD_PIN_EXEC_OUT, VARGET_TYPE};
use crate::error::CompileError;
use crate::graph::{Graph, Node, VariableTable};
use crate::value::Value;
use ahash::AHashSet;

/// Turns one graph into source text. Built fresh for every compile and
/// consumed by `generate`, so nothing carries over between compiles.
pub(crate) struct CodeGenerator<'a> {
    registry: &'a NodeRegistry,
    graph: &'a Graph,
    variables: &'a VariableTable,
    pub(super) options: &'a CompilerOptions,
    prepares: PrepareList,
    /// Nodes on the exec chains currently being walked.
    exec_path: AHashSet<&'a str>,
    /// Data outputs currently being resolved.
    data_path: AHashSet<(&'a str, &'a str)>,
}

impl<'a> CodeGenerator<'a> {
    pub(super) fn new(
        registry: &'a NodeRegistry,
        graph: &'a Graph,
        variables: &'a VariableTable,
        options: &'a CompilerOptions,
    ) -> Self {
        Self {
            registry,
            graph,
            variables,
            options,
            prepares: PrepareList::new(),
            exec_path: AHashSet::new(),
            data_path: AHashSet::new(),
        }
    }

    pub(super) fn generate(mut self) -> Result<String, CompileError> {
        let begin = self.find_begin()?;
        let options = self.options;
        let dialect = &options.dialect;

        let variables = dialect.variable_section(self.variables.all());

        self.exec_path.insert(begin.id.as_str());
        let first = self.exec_next(begin, STANDARD_PIN_EXEC_OUT)?;
        let body = self.walk_from(first)?;

        let prelude = dialect.prelude(&self.prepares);
        tracing::debug!(prepares = self.prepares.len(), "Collected prepare items");

        Ok(format!("{}{}{}", prelude, variables, body))
    }

    pub(super) fn variables(&self) -> &'a VariableTable {
        self.variables
    }

    fn find_begin(&self) -> Result<&'a Node, CompileError> {
        let registry = self.registry;
        let graph = self.graph;
        let mut begins = graph.nodes().filter(|node| {
            registry
                .lookup(&node.type_name)
                .is_some_and(|d| d.kind == NodeKind::Begin)
        });

        let first = begins.next().ok_or(CompileError::NoEntryNode)?;
        let extra = begins.count();
        if extra > 0 {
            return Err(CompileError::MultipleEntryNodes { count: extra + 1 });
        }
        Ok(first)
    }

    /// Walks a straight exec chain, following only the default exec output of
    /// each node. Named branch outputs are left to the nodes themselves.
    pub(super) fn walk_from(&mut self, start: Option<&'a Node>) -> Result<String, CompileError> {
        let registry = self.registry;
        let mut code = String::new();
        let mut entered = Vec::new();
        let mut current = start;

        while let Some(node) = current {
            if !self.exec_path.insert(node.id.as_str()) {
                return Err(CompileError::CyclicExecutionGraph {
                    node_id: node.id.clone(),
                });
            }
            entered.push(node.id.as_str());

            match registry.lookup(&node.type_name) {
                None => {
                    tracing::debug!("Skipping node {} of unknown type \"{}\"", node.id, node.type_name);
                }
                Some(definition) => {
                    self.prepares.extend(&definition.prepare);

                    let contributed = {
                        let mut ctx = ResolutionContext::new(self, node, definition);
                        definition.behavior.contribute(&mut ctx)?
                    };
                    if let Some(text) = contributed {
                        if self.options.print_comment {
                            code.push_str(
                                &self
                                    .options
                                    .dialect
                                    .comment(&format!("{} (node: {})", node.id, definition.name)),
                            );
                        }
                        code.push_str(&text);
                    }
                }
            }

            current = self.exec_next(node, STANDARD_PIN_EXEC_OUT)?;
        }

        // Converging branches may run through the same nodes again.
        for id in entered {
            self.exec_path.remove(id);
        }
        Ok(code)
    }

    /// The expression feeding a data input, or `None` when the caller should
    /// use the node's own literal.
    pub(super) fn resolve_input(
        &mut self,
        node: &'a Node,
        pin: &str,
    ) -> Result<Option<String>, CompileError> {
        let graph = self.graph;
        let registry = self.registry;

        let Some(connection) = graph.incoming(&node.id, pin) else {
            return Ok(None);
        };
        let Some(source) = graph.node(&connection.from_node_id) else {
            tracing::debug!("Input {}.{} points at missing node {}", node.id, pin, connection.from_node_id);
            return Ok(None);
        };

        if source.type_name == VARGET_TYPE {
            let name = source.data.get("name").and_then(Value::as_str).unwrap_or_default();
            if self.variables.get(name).is_none() {
                tracing::debug!("Variable getter {} names unknown variable \"{}\"", source.id, name);
                return Ok(None);
            }
            return Ok(Some(name.to_string()));
        }

        let Some(definition) = registry.lookup(&source.type_name) else {
            tracing::debug!("Input {}.{} reads from unknown type \"{}\"", node.id, pin, source.type_name);
            return Ok(None);
        };
        let Some(output) = definition.output_pin(&connection.from_pin_name) else {
            tracing::debug!(
                "Node type \"{}\" has no output pin \"{}\"",
                definition.name,
                connection.from_pin_name
            );
            return Ok(None);
        };

        let key = (source.id.as_str(), output.name.as_str());
        if !self.data_path.insert(key) {
            return Err(CompileError::CyclicDataDependency {
                node_id: source.id.clone(),
                pin: output.name.clone(),
            });
        }

        self.prepares.extend(&definition.prepare);
        let produced = {
            let mut ctx = ResolutionContext::new(self, source, definition);
            definition.behavior.contribute_output(&output.name, &mut ctx)
        };
        self.data_path.remove(&key);

        Ok(Some(
            produced?.unwrap_or_else(|| pin_var_name(&source.id, &output.name)),
        ))
    }

    /// The full code of the sub-chain hanging off a named exec output.
    pub(super) fn resolve_exec_output(
        &mut self,
        node: &'a Node,
        pin: &str,
    ) -> Result<String, CompileError> {
        match self.exec_next(node, pin)? {
            Some(next) => self.walk_from(Some(next)),
            None => Ok(String::new()),
        }
    }

    fn exec_next(&self, node: &Node, pin: &str) -> Result<Option<&'a Node>, CompileError> {
        let graph = self.graph;
        let outgoing = graph.outgoing(&node.id, pin);

        match outgoing.as_slice() {
            [] => Ok(None),
            [only] => Ok(graph.node(&only.to_node_id)),
            _ => {
                let label = self
                    .registry
                    .lookup(&node.type_name)
                    .map(|d| d.label.clone())
                    .unwrap_or_else(|| node.type_name.clone());
                Err(CompileError::AmbiguousExecFanout {
                    node_id: node.id.clone(),
                    label,
                    pin: pin.to_string(),
                })
            }
        }
    }
}
