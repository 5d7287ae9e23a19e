use crate::compiler::{Dialect, ResolutionContext};
use crate::definition::{
    NodeBehavior, NodeDefinition, NodeKind, PinDefinition, DEFAULT_LOGIC_CATEGORY,
};
use crate::error::CompileError;
use crate::value::DataType;

/// Renders a two-operand expression node; the symbol depends on the dialect.
struct BinaryOperator {
    javascript: &'static str,
    hoi4: &'static str,
}

impl NodeBehavior for BinaryOperator {
    fn contribute_output(
        &self,
        pin: &str,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        if pin != "output" {
            return Ok(None);
        }
        let left = ctx.input_or_literal("input1")?;
        let right = ctx.input_or_literal("input2")?;
        let symbol = match ctx.dialect() {
            Dialect::JavaScript { .. } => self.javascript,
            Dialect::Hoi4 { .. } => self.hoi4,
        };
        Ok(Some(format!("({} {} {})", left, symbol, right)))
    }
}

struct Not;

impl NodeBehavior for Not {
    fn contribute_output(
        &self,
        pin: &str,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        if pin != "output" {
            return Ok(None);
        }
        let operand = ctx.input_or_literal("input")?;
        let code = match ctx.dialect() {
            Dialect::JavaScript { .. } => format!("(!{})", operand),
            Dialect::Hoi4 { .. } => format!("NOT = {{ {} }}", operand),
        };
        Ok(Some(code))
    }
}

macro_rules! define_binary_nodes {
    ( $( ($name:expr, $label:expr, $operand:expr, $js:expr, $hoi4:expr) ),* $(,)? ) => {
        fn binary_definitions() -> Vec<NodeDefinition> {
            vec![
                $(
                    NodeDefinition::new($name, $label, NodeKind::Logic)
                        .category(DEFAULT_LOGIC_CATEGORY)
                        .input(PinDefinition::typed("input1", $operand))
                        .input(PinDefinition::typed("input2", $operand))
                        .output(PinDefinition::data("output"))
                        .behavior(BinaryOperator { javascript: $js, hoi4: $hoi4 }),
                )*
            ]
        }
    };
}

define_binary_nodes! {
    ("add", "Add", DataType::Number, "+", "+"),
    ("subtract", "Subtract", DataType::Number, "-", "-"),
    ("multiply", "Multiply", DataType::Number, "*", "*"),
    ("divide", "Divide", DataType::Number, "/", "/"),
    ("equal", "Equal (==)", DataType::Number, "===", "="),
    ("gt", "Greater Than (>)", DataType::Number, ">", ">"),
    ("lt", "Less Than (<)", DataType::Number, "<", "<"),
    ("and", "And (&&)", DataType::Boolean, "&&", "AND"),
    ("or", "Or (||)", DataType::Boolean, "||", "OR"),
}

pub(super) fn definitions() -> Vec<NodeDefinition> {
    let mut definitions = binary_definitions();
    definitions.push(
        NodeDefinition::new("not", "Not (!)", NodeKind::Logic)
            .category(DEFAULT_LOGIC_CATEGORY)
            .input(PinDefinition::typed("input", DataType::Boolean))
            .output(PinDefinition::data("output"))
            .behavior(Not),
    );
    definitions
}
