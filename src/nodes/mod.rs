//! The built-in node library. Every type renders for both dialects.

mod base;
mod flow;
mod logic;
mod lodash;

pub use self::base::{begin_definition, varget_definition, varset_definition};

use crate::definition::NodeRegistry;

/// Registers every built-in node type, core nodes first.
pub fn register_builtin_nodes(registry: &mut NodeRegistry) {
    for definition in base::definitions()
        .into_iter()
        .chain(flow::definitions())
        .chain(logic::definitions())
        .chain(lodash::definitions())
    {
        registry.register(definition);
    }
}

/// Wraps an already re-indented body so the closing brace lands on its own
/// line. Empty bodies collapse to nothing.
fn block_body(body: String) -> String {
    if body.is_empty() {
        body
    } else {
        format!("{}\n", body)
    }
}
