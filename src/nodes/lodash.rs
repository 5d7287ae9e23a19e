use crate::compiler::ResolutionContext;
use crate::definition::{
    ImportMember, NodeBehavior, NodeDefinition, NodeKind, PinDefinition, PrepareItem,
    LODASH_CATEGORY,
};
use crate::error::CompileError;
use crate::value::DataType;

const LODASH_MODULE: &str = "lodash";

pub(super) fn definitions() -> Vec<NodeDefinition> {
    vec![
        NodeDefinition::new("uniq", "Uniq", NodeKind::Call)
            .category(LODASH_CATEGORY)
            .input(PinDefinition::typed("array", DataType::Array))
            .output(PinDefinition::data("output"))
            .prepare(PrepareItem::import(LODASH_MODULE, Some(ImportMember::new("uniq"))))
            .behavior(Call {
                function: "uniq",
                arguments: &["array"],
            }),
        NodeDefinition::new("clamp", "Clamp", NodeKind::Call)
            .category(LODASH_CATEGORY)
            .input(PinDefinition::typed("number", DataType::Number))
            .input(PinDefinition::typed("lower", DataType::Number))
            .input(PinDefinition::typed("upper", DataType::Number))
            .output(PinDefinition::data("output"))
            .prepare(PrepareItem::function(
                "clamp",
                &["number", "lower", "upper"],
                "return Math.min(Math.max(number, lower), upper);",
            ))
            .behavior(Call {
                function: "clamp",
                arguments: &["number", "lower", "upper"],
            }),
    ]
}

/// A call to a hoisted function, one argument per input pin.
struct Call {
    function: &'static str,
    arguments: &'static [&'static str],
}

impl NodeBehavior for Call {
    fn contribute_output(
        &self,
        pin: &str,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        if pin != "output" {
            return Ok(None);
        }
        let arguments = self
            .arguments
            .iter()
            .map(|argument| ctx.input_or_literal(argument))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(format!("{}({})", self.function, arguments.join(", "))))
    }
}
