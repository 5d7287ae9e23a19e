//! Common test utilities for building blueprints and compiling them.
use codeck::prelude::*;

/// Compiles with the default JavaScript dialect and no trace comments.
#[allow(dead_code)]
pub fn compile_plain(blueprint: &Blueprint) -> std::result::Result<String, CompileError> {
    CodeCompiler::builder(blueprint)
        .with_comments(false)
        .build()
        .generate()
}

/// Compiles as an HOI4 event script in the `my_mod` namespace, no comments.
#[allow(dead_code)]
pub fn compile_hoi4(blueprint: &Blueprint) -> std::result::Result<String, CompileError> {
    CodeCompiler::builder(blueprint)
        .with_dialect(Dialect::hoi4())
        .with_comments(false)
        .build()
        .generate()
}

/// Places a node of a built-in type and sets its literal data.
#[allow(dead_code)]
pub fn add_node(blueprint: &mut Blueprint, type_name: &str, data: &[(&str, Value)]) -> String {
    let id = blueprint
        .create_node(type_name, Position::new(0.0, 0.0))
        .expect("node type should be registered");
    for (key, value) in data {
        blueprint.graph_mut().set_node_data(&id, key, value.clone());
    }
    id
}

/// Places a `log` node with a literal message.
#[allow(dead_code)]
pub fn add_log(blueprint: &mut Blueprint, message: &str) -> String {
    add_node(blueprint, "log", &[("message", Value::from(message))])
}

/// Wires an exec output to the next node's exec input.
#[allow(dead_code)]
pub fn link_exec(blueprint: &mut Blueprint, from: &str, from_pin: &str, to: &str) {
    let outcome = blueprint
        .connect(from, from_pin, to, STANDARD_PIN_EXEC_IN)
        .expect("exec pins should exist");
    assert!(matches!(outcome, ConnectOutcome::Connected(_)));
}

/// Chains the given nodes after the entry node through default exec pins.
#[allow(dead_code)]
pub fn chain_from_begin(blueprint: &mut Blueprint, node_ids: &[&str]) {
    let mut previous = BEGIN_NODE_ID.to_string();
    for id in node_ids {
        link_exec(blueprint, &previous, STANDARD_PIN_EXEC_OUT, id);
        previous = id.to_string();
    }
}

/// Wires a data output into a data input.
#[allow(dead_code)]
pub fn link_data(blueprint: &mut Blueprint, from: &str, from_pin: &str, to: &str, to_pin: &str) {
    let outcome = blueprint
        .connect(from, from_pin, to, to_pin)
        .expect("data pins should exist");
    assert!(matches!(outcome, ConnectOutcome::Connected(_)));
}
