use super::block_body;
use crate::compiler::{indent_block, Dialect, ResolutionContext};
use crate::definition::{
    exec_pin_input, exec_pin_output, NodeBehavior, NodeDefinition, NodeKind, PinDefinition,
};
use crate::error::CompileError;
use crate::value::{DataType, Value};

pub(super) fn definitions() -> Vec<NodeDefinition> {
    vec![
        NodeDefinition::new("if", "If", NodeKind::Logic)
            .input(exec_pin_input())
            .input(PinDefinition::typed("condition", DataType::Boolean))
            .output(exec_pin_output())
            .output(PinDefinition::exec("true"))
            .output(PinDefinition::exec("false"))
            .behavior(If),
        NodeDefinition::new("foreach", "ForEach", NodeKind::Function)
            .input(exec_pin_input())
            .input(PinDefinition::data("array"))
            .output(exec_pin_output())
            .output(PinDefinition::exec("body"))
            .output(PinDefinition::data("item"))
            .output(PinDefinition::data("index"))
            .behavior(ForEach),
        NodeDefinition::new("loop", "Loop", NodeKind::Function)
            .input(exec_pin_input())
            .input(PinDefinition::typed("count", DataType::Number))
            .output(exec_pin_output())
            .output(PinDefinition::exec("body"))
            .output(PinDefinition::data("index"))
            .behavior(Loop),
    ]
}

struct If;

impl If {
    /// A literal condition: booleans become `true`/`false` (or `always`
    /// checks in HOI4), leftover text is taken as a raw expression.
    fn literal_condition(ctx: &ResolutionContext<'_, '_>) -> String {
        match (ctx.dialect(), ctx.literal("condition")) {
            (_, Value::Text(raw)) => raw,
            (Dialect::Hoi4 { .. }, other) => format!("always = {}", ctx.dialect().render_literal(&other)),
            (Dialect::JavaScript { .. }, other) => ctx.dialect().render_literal(&other),
        }
    }
}

impl NodeBehavior for If {
    fn contribute(
        &self,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        let condition = match ctx.input("condition")? {
            Some(expr) => expr,
            None => Self::literal_condition(ctx),
        };
        let true_branch = ctx.exec_output("true")?;
        let false_branch = ctx.exec_output("false")?;
        let true_body = block_body(ctx.indent(&true_branch));
        let false_body = block_body(ctx.indent(&false_branch));

        let code = match ctx.dialect() {
            Dialect::JavaScript { .. } => format!(
                "if ({}) {{\n{}}} else {{\n{}}}\n",
                condition, true_body, false_body
            ),
            Dialect::Hoi4 { .. } => {
                let limit = block_body(indent_block(&condition, ctx.dialect().indent_width() * 2));
                let mut code = format!("if = {{\n    limit = {{\n{}    }}\n{}}}\n", limit, true_body);
                if !false_body.is_empty() {
                    code.push_str(&format!("else = {{\n{}}}\n", false_body));
                }
                code
            }
        };
        Ok(Some(code))
    }
}

struct Loop;

impl NodeBehavior for Loop {
    fn contribute(
        &self,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        let index = ctx.pin_var_name("index");
        let connected = ctx.input("count")?;

        let code = match ctx.dialect() {
            Dialect::JavaScript { .. } => {
                let count = connected.unwrap_or_else(|| ctx.render_literal("count"));
                let body = ctx.exec_output("body")?;
                let body = block_body(ctx.indent(&body));
                format!(
                    "for (let {index} = 0; {index} < {count}; {index}++) {{\n{body}}}\n"
                )
            }
            Dialect::Hoi4 { .. } => {
                let count = match connected {
                    Some(expr) => expr,
                    None => {
                        let literal = ctx.literal("count").as_f64().unwrap_or(0.0).trunc();
                        if literal <= 0.0 {
                            return Ok(Some("# Loop skipped (count = 0)\n".to_string()));
                        }
                        Value::Number(literal).to_string()
                    }
                };
                let body = ctx.exec_output("body")?;
                let body = block_body(ctx.indent(&body));
                format!(
                    "for_loop_effect = {{\n    start = 0\n    end = {count}\n    value = {index}\n{body}}}\n"
                )
            }
        };
        Ok(Some(code))
    }

    fn contribute_output(
        &self,
        pin: &str,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        Ok((pin == "index").then(|| ctx.pin_var_name(pin)))
    }
}

struct ForEach;

impl NodeBehavior for ForEach {
    fn contribute(
        &self,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        let item = ctx.pin_var_name("item");
        let index = ctx.pin_var_name("index");
        let array = ctx.input("array")?;

        let code = match ctx.dialect() {
            Dialect::JavaScript { .. } => {
                let array = array.unwrap_or_else(|| "[]".to_string());
                let body = ctx.exec_output("body")?;
                let body = block_body(ctx.indent(&body));
                format!(
                    "for (let {index} = 0; {index} < {array}.length; {index}++) {{\n  const {item} = {array}[{index}];\n{body}}}\n"
                )
            }
            Dialect::Hoi4 { .. } => {
                let Some(array) = array else {
                    return Ok(Some("# ForEach skipped (no array)\n".to_string()));
                };
                let body = ctx.exec_output("body")?;
                let body = block_body(ctx.indent(&body));
                format!(
                    "for_each_loop = {{\n    array = {array}\n    value = {item}\n    index = {index}\n{body}}}\n"
                )
            }
        };
        Ok(Some(code))
    }

    fn contribute_output(
        &self,
        pin: &str,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        Ok(matches!(pin, "item" | "index").then(|| ctx.pin_var_name(pin)))
    }
}
