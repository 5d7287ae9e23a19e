//! Tests for the graph model, the connection state machine and the variable
//! table.
mod common;
use codeck::graph::{PinSide, RejectReason};
use codeck::prelude::*;
use common::*;
use std::sync::{Arc, Mutex};

fn outgoing_count(blueprint: &Blueprint, node_id: &str, pin: &str) -> usize {
    blueprint.graph().outgoing(node_id, pin).len()
}

#[test]
fn test_new_blueprint_holds_only_the_entry_node() {
    let blueprint = Blueprint::with_builtin_nodes();
    let graph = blueprint.graph();
    assert_eq!(graph.node_count(), 1);
    let begin = graph.node(BEGIN_NODE_ID).unwrap();
    assert_eq!(begin.type_name, "begin");
    assert_eq!(begin.position, Position::new(10.0, 10.0));
}

#[test]
fn test_create_node_rejects_unknown_type() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let result = blueprint.create_node("teleport", Position::default());
    assert_eq!(result, Err(GraphError::UnknownNodeType("teleport".to_string())));
    assert_eq!(blueprint.graph().node_count(), 1);
}

#[test]
fn test_created_nodes_get_distinct_hex_ids() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let a = add_log(&mut blueprint, "a");
    let b = add_log(&mut blueprint, "b");
    assert_ne!(a, b);
    assert_eq!(a.len(), 8);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_entry_node_cannot_be_removed() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let log = add_log(&mut blueprint, "hi");
    chain_from_begin(&mut blueprint, &[&log]);

    blueprint.graph_mut().remove_node(BEGIN_NODE_ID);

    assert!(blueprint.graph().contains_node(BEGIN_NODE_ID));
    assert_eq!(blueprint.graph().connections().len(), 1);
    assert!(compile_plain(&blueprint).is_ok());
}

#[test]
fn test_remove_node_drops_its_connections() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let first = add_log(&mut blueprint, "1");
    let second = add_log(&mut blueprint, "2");
    chain_from_begin(&mut blueprint, &[&first, &second]);
    assert_eq!(blueprint.graph().connections().len(), 2);

    blueprint.graph_mut().remove_node(&first);

    assert!(!blueprint.graph().contains_node(&first));
    assert!(blueprint.graph().connections().is_empty());
}

#[test]
fn test_exec_output_keeps_a_single_connection() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let a = add_log(&mut blueprint, "a");
    let b = add_log(&mut blueprint, "b");

    link_exec(&mut blueprint, BEGIN_NODE_ID, STANDARD_PIN_EXEC_OUT, &a);
    link_exec(&mut blueprint, BEGIN_NODE_ID, STANDARD_PIN_EXEC_OUT, &b);

    let outgoing = blueprint.graph().outgoing(BEGIN_NODE_ID, STANDARD_PIN_EXEC_OUT);
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0].to_node_id, b);
}

#[test]
fn test_exec_input_keeps_a_single_connection() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let a = add_log(&mut blueprint, "a");
    let b = add_log(&mut blueprint, "b");
    let target = add_log(&mut blueprint, "target");

    link_exec(&mut blueprint, &a, STANDARD_PIN_EXEC_OUT, &target);
    link_exec(&mut blueprint, &b, STANDARD_PIN_EXEC_OUT, &target);

    let incoming = blueprint
        .graph()
        .incoming(&target, STANDARD_PIN_EXEC_IN)
        .unwrap();
    assert_eq!(incoming.from_node_id, b);
    assert_eq!(outgoing_count(&blueprint, &a, STANDARD_PIN_EXEC_OUT), 0);
}

#[test]
fn test_data_input_is_replaced_on_rewire() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let first = add_node(&mut blueprint, "add", &[]);
    let second = add_node(&mut blueprint, "multiply", &[]);
    let log = add_log(&mut blueprint, "");

    link_data(&mut blueprint, &first, "output", &log, "message");
    link_data(&mut blueprint, &second, "output", &log, "message");

    let feeding: Vec<_> = blueprint
        .graph()
        .connections()
        .iter()
        .filter(|c| c.to_node_id == log && c.to_pin_name == "message")
        .collect();
    assert_eq!(feeding.len(), 1);
    assert_eq!(feeding[0].from_node_id, second);
}

#[test]
fn test_data_output_fans_out() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let sum = add_node(&mut blueprint, "add", &[]);
    let log1 = add_log(&mut blueprint, "");
    let log2 = add_log(&mut blueprint, "");

    link_data(&mut blueprint, &sum, "output", &log1, "message");
    link_data(&mut blueprint, &sum, "output", &log2, "message");

    assert_eq!(outgoing_count(&blueprint, &sum, "output"), 2);
}

#[test]
fn test_identical_connect_is_idempotent() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let log = add_log(&mut blueprint, "");

    let first = blueprint
        .connect(BEGIN_NODE_ID, STANDARD_PIN_EXEC_OUT, &log, STANDARD_PIN_EXEC_IN)
        .unwrap();
    let second = blueprint
        .connect(BEGIN_NODE_ID, STANDARD_PIN_EXEC_OUT, &log, STANDARD_PIN_EXEC_IN)
        .unwrap();

    let ConnectOutcome::Connected(id) = first else {
        panic!("Expected a new connection, got {:?}", first);
    };
    assert_eq!(second, ConnectOutcome::AlreadyConnected);
    assert_eq!(blueprint.graph().connections().len(), 1);
    assert_eq!(blueprint.graph().connections()[0].id, id);
}

#[test]
fn test_connect_rejects_invalid_pairs() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let log = add_log(&mut blueprint, "");
    let sum = add_node(&mut blueprint, "add", &[]);

    let same_node = blueprint.connect(&sum, "output", &sum, "input1").unwrap();
    assert_eq!(same_node, ConnectOutcome::Rejected(RejectReason::SameNode));

    let mismatch = blueprint
        .connect(BEGIN_NODE_ID, STANDARD_PIN_EXEC_OUT, &log, "message")
        .unwrap();
    assert_eq!(mismatch, ConnectOutcome::Rejected(RejectReason::KindMismatch));

    let graph = blueprint.graph_mut();
    graph.start_connect(&sum, "output", PinKind::Data, PinSide::Output);
    let same_side = graph.end_connect(&log, "message", PinKind::Data, PinSide::Output);
    assert_eq!(same_side, ConnectOutcome::Rejected(RejectReason::SameSide));

    assert!(blueprint.graph().connections().is_empty());
    assert!(blueprint.graph().pending().is_none());
}

#[test]
fn test_connect_reads_pin_sides_from_definitions() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let log = add_log(&mut blueprint, "");
    let sum = add_node(&mut blueprint, "add", &[]);
    let product = add_node(&mut blueprint, "multiply", &[]);

    let reversed = blueprint.connect(&log, "message", &sum, "output").unwrap();
    assert!(matches!(reversed, ConnectOutcome::Connected(_)));
    let stored = &blueprint.graph().connections()[0];
    assert_eq!(stored.from_node_id, sum);
    assert_eq!(stored.from_pin_name, "output");
    assert_eq!(stored.to_node_id, log);
    assert_eq!(stored.to_pin_name, "message");

    let two_inputs = blueprint.connect(&sum, "input1", &product, "input2").unwrap();
    assert_eq!(two_inputs, ConnectOutcome::Rejected(RejectReason::SameSide));

    let two_outputs = blueprint.connect(&sum, "output", &product, "output").unwrap();
    assert_eq!(two_outputs, ConnectOutcome::Rejected(RejectReason::SameSide));

    let reversed_exec = blueprint
        .connect(&log, STANDARD_PIN_EXEC_IN, BEGIN_NODE_ID, STANDARD_PIN_EXEC_OUT)
        .unwrap();
    assert!(matches!(reversed_exec, ConnectOutcome::Connected(_)));
    assert_eq!(
        blueprint
            .graph()
            .incoming(&log, STANDARD_PIN_EXEC_IN)
            .map(|c| c.from_node_id.as_str()),
        Some(BEGIN_NODE_ID)
    );
    assert_eq!(blueprint.graph().connections().len(), 2);
}

#[test]
fn test_connect_reports_missing_pins() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let log = add_log(&mut blueprint, "");

    let result = blueprint.connect(&log, "nowhere", BEGIN_NODE_ID, STANDARD_PIN_EXEC_IN);
    assert_eq!(
        result,
        Err(GraphError::PinNotFound {
            node_id: log.clone(),
            pin: "nowhere".to_string(),
        })
    );

    let result = blueprint.connect("ghost", "output", &log, "message");
    assert_eq!(result, Err(GraphError::NodeNotFound("ghost".to_string())));
}

#[test]
fn test_pending_connection_from_input_side_is_normalized() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let log = add_log(&mut blueprint, "");
    let sum = add_node(&mut blueprint, "add", &[]);
    let graph = blueprint.graph_mut();

    graph.start_connect(&log, "message", PinKind::Data, PinSide::Input);
    assert!(graph.is_connected(&log, "message"));
    assert!(!graph.is_connected(&sum, "output"));

    let outcome = graph.end_connect(&sum, "output", PinKind::Data, PinSide::Output);
    assert!(matches!(outcome, ConnectOutcome::Connected(_)));

    let connection = &graph.connections()[0];
    assert_eq!(connection.from_node_id, sum);
    assert_eq!(connection.from_pin_name, "output");
    assert_eq!(connection.to_node_id, log);
    assert_eq!(connection.to_pin_name, "message");
    assert!(graph.pending().is_none());
}

#[test]
fn test_start_connect_is_ignored_while_pending() {
    let mut graph = Graph::new();
    graph.start_connect("a", "out", PinKind::Exec, PinSide::Output);
    graph.start_connect("b", "out", PinKind::Exec, PinSide::Output);
    assert_eq!(graph.pending().unwrap().node_id, "a");

    graph.cancel_connect();
    assert!(graph.pending().is_none());
    assert_eq!(
        graph.end_connect("c", "in", PinKind::Exec, PinSide::Input),
        ConnectOutcome::Idle
    );
}

#[test]
fn test_remove_and_clear_connections() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let a = add_log(&mut blueprint, "a");
    let b = add_log(&mut blueprint, "b");
    chain_from_begin(&mut blueprint, &[&a, &b]);

    let id = blueprint.graph().connections_for_node(&a)[0].id.clone();
    assert!(blueprint.graph_mut().remove_connection(&id));
    assert!(!blueprint.graph_mut().remove_connection(&id));
    assert_eq!(blueprint.graph().connections().len(), 1);

    blueprint.graph_mut().clear_connections();
    assert!(blueprint.graph().connections().is_empty());
    assert_eq!(blueprint.graph().node_count(), 3);
}

#[test]
fn test_move_and_update_position() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let log = add_log(&mut blueprint, "");
    let graph = blueprint.graph_mut();

    graph.update_node_position(&log, Position::new(5.0, 5.0));
    graph.move_node(&log, 10.0, -2.5);
    assert_eq!(graph.node(&log).unwrap().position, Position::new(15.0, 2.5));

    // Missing nodes are ignored.
    graph.move_node("ghost", 1.0, 1.0);
    assert!(!graph.contains_node("ghost"));
}

#[test]
fn test_reset_graph_keeps_only_the_entry_node() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let log = add_log(&mut blueprint, "");
    chain_from_begin(&mut blueprint, &[&log]);

    blueprint.reset_graph();

    assert_eq!(blueprint.graph().node_count(), 1);
    assert!(blueprint.graph().contains_node(BEGIN_NODE_ID));
    assert!(blueprint.graph().connections().is_empty());
}

#[test]
fn test_variable_table_refuses_duplicates() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let variables = blueprint.variables_mut();

    variables.create("counter", VariableType::Number, 0).unwrap();
    variables.create("name", VariableType::String, "x").unwrap();
    let duplicate = variables.create("counter", VariableType::Boolean, true);

    assert_eq!(duplicate, Err(GraphError::VariableExists("counter".to_string())));
    let names: Vec<&str> = variables.all().iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["counter", "name"]);
    assert_eq!(variables.get("counter").unwrap().var_type, VariableType::Number);
}

#[test]
fn test_variable_delete() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let variables = blueprint.variables_mut();
    variables.create("a", VariableType::Number, 1).unwrap();

    let removed = variables.delete("a").unwrap();
    assert_eq!(removed.default_value, Value::Number(1.0));
    assert!(variables.is_empty());
    assert_eq!(
        variables.delete("a"),
        Err(GraphError::VariableNotFound("a".to_string()))
    );
}

#[test]
fn test_listeners_receive_change_events() {
    let mut blueprint = Blueprint::with_builtin_nodes();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    blueprint.subscribe(Arc::new(move |event: &GraphEvent| {
        sink.lock().unwrap().push(event.clone());
    }));

    let log = add_log(&mut blueprint, "hi");
    blueprint.graph_mut().move_node(&log, 1.0, 1.0);
    blueprint
        .variables_mut()
        .create("v", VariableType::Number, 0)
        .unwrap();
    link_exec(&mut blueprint, BEGIN_NODE_ID, STANDARD_PIN_EXEC_OUT, &log);

    let events = events.lock().unwrap();
    assert_eq!(events[0], GraphEvent::NodesChanged);
    assert_eq!(events[1], GraphEvent::NodeDataChanged(log.clone()));
    assert_eq!(events[2], GraphEvent::NodePositionChanged(log.clone()));
    assert_eq!(events[3], GraphEvent::VariablesChanged);
    assert!(events.contains(&GraphEvent::PendingConnectionChanged));
    assert_eq!(events.last(), Some(&GraphEvent::ConnectionsChanged));
}
