use super::dialect::Dialect;
use super::text::{indent_block, pin_var_name};
use super::walker::CodeGenerator;
use crate::definition::NodeDefinition;
use crate::error::CompileError;
use crate::graph::{Node, Variable};
use crate::value::Value;

/// Everything a node behavior may use while producing code for one node
/// instance: its own data, the resolvers for its pins, and the dialect.
///
/// Resolving a pin can recurse into upstream nodes, which is why the context
/// holds the generator mutably.
pub struct ResolutionContext<'g, 'a> {
    generator: &'g mut CodeGenerator<'a>,
    node: &'a Node,
    definition: &'a NodeDefinition,
}

impl<'g, 'a> ResolutionContext<'g, 'a> {
    pub(crate) fn new(
        generator: &'g mut CodeGenerator<'a>,
        node: &'a Node,
        definition: &'a NodeDefinition,
    ) -> Self {
        Self {
            generator,
            node,
            definition,
        }
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn node_id(&self) -> &'a str {
        &self.node.id
    }

    pub fn definition(&self) -> &'a NodeDefinition {
        self.definition
    }

    pub fn dialect(&self) -> &'a Dialect {
        let options = self.generator.options;
        &options.dialect
    }

    /// The variable name standing for one of this node's pins.
    pub fn pin_var_name(&self, pin: &str) -> String {
        pin_var_name(&self.node.id, pin)
    }

    /// The expression connected to a data input, if any.
    pub fn input(&mut self, pin: &str) -> Result<Option<String>, CompileError> {
        self.generator.resolve_input(self.node, pin)
    }

    /// The code of the sub-chain wired to a named exec output. Empty when the
    /// pin is unconnected.
    pub fn exec_output(&mut self, pin: &str) -> Result<String, CompileError> {
        self.generator.resolve_exec_output(self.node, pin)
    }

    /// A raw entry of the node's literal data.
    pub fn data(&self, key: &str) -> Option<&'a Value> {
        self.node.data.get(key)
    }

    pub fn data_str(&self, key: &str) -> &'a str {
        self.data(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// The literal for an input pin: the node's stored value, else the pin's
    /// default, coerced to the pin's declared type.
    pub fn literal(&self, pin: &str) -> Value {
        let pin_def = self.definition.pin(pin);
        let raw = self
            .node
            .data
            .get(pin)
            .filter(|v| !v.is_unset())
            .or_else(|| pin_def.map(|p| &p.default_value))
            .cloned()
            .unwrap_or_default();
        raw.coerce(pin_def.and_then(|p| p.data_type))
    }

    pub fn render_literal(&self, pin: &str) -> String {
        self.dialect().render_literal(&self.literal(pin))
    }

    /// The connected expression when there is one, otherwise the rendered
    /// literal.
    pub fn input_or_literal(&mut self, pin: &str) -> Result<String, CompileError> {
        match self.input(pin)? {
            Some(expr) => Ok(expr),
            None => Ok(self.render_literal(pin)),
        }
    }

    pub fn variable(&self, name: &str) -> Option<&'a Variable> {
        self.generator.variables().get(name)
    }

    /// Re-indents a nested block by one level of the dialect's indentation.
    pub fn indent(&self, code: &str) -> String {
        indent_block(code, self.dialect().indent_width())
    }
}
