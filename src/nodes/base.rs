use crate::compiler::{Dialect, ResolutionContext};
use crate::definition::{
    exec_pin_input, exec_pin_output, NodeBehavior, NodeDefinition, NodeKind, PinDefinition,
    BEGIN_TYPE, VARGET_TYPE, VARSET_TYPE,
};
use crate::error::CompileError;
use crate::value::DataType;

pub(super) fn definitions() -> Vec<NodeDefinition> {
    vec![
        begin_definition(),
        NodeDefinition::new("log", "Log", NodeKind::Function)
            .input(exec_pin_input())
            .input(PinDefinition::typed("message", DataType::Text))
            .output(exec_pin_output())
            .behavior(Log),
        NodeDefinition::new("alert", "Alert", NodeKind::Function)
            .input(exec_pin_input())
            .input(PinDefinition::typed("message", DataType::Text))
            .output(exec_pin_output())
            .behavior(Alert),
        varget_definition(),
        varset_definition(),
    ]
}

/// The entry node. Contributes nothing; the walk starts at its successor.
pub fn begin_definition() -> NodeDefinition {
    NodeDefinition::new(BEGIN_TYPE, "Begin", NodeKind::Begin)
        .hidden()
        .output(exec_pin_output())
}

/// Reads a variable. Resolved by the compiler itself to the variable's name.
pub fn varget_definition() -> NodeDefinition {
    NodeDefinition::new(VARGET_TYPE, "Get Variable", NodeKind::Logic)
        .hidden()
        .output(PinDefinition::data("variable"))
}

pub fn varset_definition() -> NodeDefinition {
    NodeDefinition::new(VARSET_TYPE, "Set Variable", NodeKind::Function)
        .hidden()
        .input(exec_pin_input())
        .input(PinDefinition::data("value").with_default(""))
        .output(exec_pin_output())
        .behavior(VarSet)
}

struct Log;

impl NodeBehavior for Log {
    fn contribute(
        &self,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        let connected = ctx.input("message")?;
        let code = match ctx.dialect() {
            Dialect::JavaScript { .. } => {
                let message = connected.unwrap_or_else(|| ctx.render_literal("message"));
                format!("console.log({});\n", message)
            }
            Dialect::Hoi4 { .. } => match connected {
                Some(expr) => format!("log = \"[?{}]\"\n", expr),
                None => format!("log = {}\n", ctx.render_literal("message")),
            },
        };
        Ok(Some(code))
    }
}

struct Alert;

impl NodeBehavior for Alert {
    fn contribute(
        &self,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        let connected = ctx.input("message")?;
        let code = match ctx.dialect() {
            Dialect::JavaScript { .. } => {
                let message = connected.unwrap_or_else(|| ctx.render_literal("message"));
                format!("alert({});\n", message)
            }
            Dialect::Hoi4 { namespace, .. } => {
                let message = connected.unwrap_or_else(|| ctx.literal("message").to_string());
                format!("# News event: {}\nnews_event = {{ id = {}.1 }}\n", message, namespace)
            }
        };
        Ok(Some(code))
    }
}

struct VarSet;

impl NodeBehavior for VarSet {
    fn contribute(
        &self,
        ctx: &mut ResolutionContext<'_, '_>,
    ) -> Result<Option<String>, CompileError> {
        let name = ctx.data_str("name");
        if name.is_empty() {
            return Ok(Some(ctx.dialect().comment("Variable name not set")));
        }

        let value = ctx.input_or_literal("value")?;
        let code = match ctx.dialect() {
            Dialect::JavaScript { .. } => format!("{} = {};\n", name, value),
            Dialect::Hoi4 { .. } => format!("set_variable = {{ var = {} value = {} }}\n", name, value),
        };
        Ok(Some(code))
    }
}
