//! Integration tests for the flowchart interpreter state machine.
mod common;

use common::{flow_edge, flow_node, run_to_completion, sum15_chart};
use flowgrid::prelude::*;

#[test]
fn sum15_runs_to_completion() {
    let (nodes, edges) = sum15_chart();
    let mut interp = Interpreter::new(nodes, edges);
    run_to_completion(&mut interp);

    assert_eq!(interp.err_message(), "");
    assert!(interp.done());

    assert_eq!(interp.vars()["sum"], Value::Int(15));
    assert_eq!(interp.vars()["i"], Value::Int(6));

    let output = interp.output().join("\n");
    assert!(output.contains("PROGRAM START"));
    assert!(output.contains("Sum 1..5 = 15"));
    assert!(output.contains("PROGRAM END"));

    assert!(interp.step_count() <= 100, "too many steps: {}", interp.step_count());
}

#[test]
fn no_start_node_errors_on_first_step() {
    let nodes = vec![flow_node(0, NodeKind::Process, "NOPE", "")];
    let mut interp = Interpreter::new(nodes, vec![]);
    interp.step(None);

    assert_eq!(interp.err_message(), "NO START NODE");
    assert_eq!(interp.err(), Some(&RunError::NoStartNode));
    assert!(interp.done());
}

#[test]
fn edge_to_missing_node_is_a_broken_link() {
    let nodes = vec![flow_node(0, NodeKind::Terminal, "START", "")];
    let edges = vec![flow_edge(0, 99, "")];
    let mut interp = Interpreter::new(nodes, edges);
    interp.step(None); // finds START, advances to 99
    interp.step(None); // executing 99 fails

    assert_eq!(interp.err_message(), "BROKEN LINK");
    assert!(interp.done());
}

#[test]
fn runaway_loop_hits_the_step_budget() {
    // START → LOOP → connector → LOOP → ...
    let nodes = vec![
        flow_node(0, NodeKind::Terminal, "START", ""),
        flow_node(1, NodeKind::Process, "LOOP", ""),
        flow_node(2, NodeKind::Connector, "", ""),
    ];
    let edges = vec![flow_edge(0, 1, ""), flow_edge(1, 2, ""), flow_edge(2, 1, "")];
    let mut interp = Interpreter::new(nodes, edges).with_max_steps(20);
    run_to_completion(&mut interp);

    assert_eq!(interp.err_message(), "MAX STEPS EXCEEDED");
    assert!(interp.done());

    // Terminal state absorbs further calls.
    let steps = interp.step_count();
    interp.step(None);
    interp.step(None);
    assert!(interp.done());
    assert_eq!(interp.step_count(), steps);
    assert_eq!(interp.err_message(), "MAX STEPS EXCEEDED");
}

#[test]
fn bad_code_surfaces_the_node_text() {
    let nodes = vec![
        flow_node(0, NodeKind::Terminal, "START", ""),
        flow_node(1, NodeKind::Process, "BAD", "x = ???invalid"),
    ];
    let edges = vec![flow_edge(0, 1, "")];
    let mut interp = Interpreter::new(nodes, edges);
    interp.step(None);
    interp.step(None);

    assert!(interp.err_message().starts_with("ERROR at \"BAD\":"));
    assert!(interp.done());
}

#[test]
fn fatal_errors_leave_a_marker_in_the_output() {
    let nodes = vec![flow_node(0, NodeKind::Process, "NOPE", "")];
    let mut interp = Interpreter::new(nodes, vec![]);
    interp.step(None);

    let last = interp.output().last().cloned().unwrap_or_default();
    assert!(last.contains("NO START NODE"), "marker missing: {:?}", last);
}

#[test]
fn io_node_suspends_and_binds_a_string() {
    let nodes = vec![
        flow_node(0, NodeKind::Terminal, "START", ""),
        flow_node(1, NodeKind::Io, "ASK", r#"input("Name?", name)"#),
        flow_node(2, NodeKind::Terminal, "END", ""),
    ];
    let edges = vec![flow_edge(0, 1, ""), flow_edge(1, 2, "")];
    let mut interp = Interpreter::new(nodes, edges);
    interp.step(None); // start banner, advance to io node
    interp.step(None); // io node requests input

    assert!(interp.wait_input());
    assert_eq!(interp.input_prompt(), "Name?");
    assert!(interp.output().contains(&"Name?".to_string()));

    // Stepping without a value keeps waiting.
    interp.step(None);
    assert!(interp.wait_input());

    interp.step(Some("Alice"));
    assert!(!interp.wait_input());
    assert_eq!(interp.vars()["name"], Value::Str("Alice".to_string()));
    assert!(interp.output().contains(&"> Alice".to_string()));

    run_to_completion(&mut interp);
    assert_eq!(interp.err_message(), "");
}

#[test]
fn io_input_coerces_whole_integers() {
    let nodes = vec![
        flow_node(0, NodeKind::Terminal, "START", ""),
        flow_node(1, NodeKind::Io, "ASK", r#"input("Age?", age)"#),
        flow_node(2, NodeKind::Terminal, "END", ""),
    ];
    let edges = vec![flow_edge(0, 1, ""), flow_edge(1, 2, "")];
    let mut interp = Interpreter::new(nodes, edges);
    interp.step(None);
    interp.step(None);
    interp.step(Some("42"));

    assert_eq!(interp.vars()["age"], Value::Int(42));
}

#[test]
fn io_request_defaults_and_case_insensitive_keyword() {
    let nodes = vec![
        flow_node(0, NodeKind::Terminal, "START", ""),
        flow_node(1, NodeKind::Io, "ASK", "READ()"),
        flow_node(2, NodeKind::Terminal, "END", ""),
    ];
    let edges = vec![flow_edge(0, 1, ""), flow_edge(1, 2, "")];
    let mut interp = Interpreter::new(nodes, edges);
    interp.step(None);
    interp.step(None);

    assert!(interp.wait_input());
    assert_eq!(interp.input_prompt(), "INPUT:");

    interp.step(Some("7"));
    assert_eq!(interp.vars()["x"], Value::Int(7));
}

#[test]
fn io_request_single_argument_forms() {
    // A bare identifier is the variable; a quoted non-identifier is the prompt.
    let chart = |code: &str| {
        let nodes = vec![
            flow_node(0, NodeKind::Terminal, "START", ""),
            flow_node(1, NodeKind::Io, "ASK", code),
            flow_node(2, NodeKind::Terminal, "END", ""),
        ];
        let edges = vec![flow_edge(0, 1, ""), flow_edge(1, 2, "")];
        Interpreter::new(nodes, edges)
    };

    let mut interp = chart("input(name)");
    interp.step(None);
    interp.step(None);
    assert_eq!(interp.input_prompt(), "INPUT:");
    interp.step(Some("Bea"));
    assert_eq!(interp.vars()["name"], Value::Str("Bea".to_string()));

    let mut interp = chart(r#"input("Age:")"#);
    interp.step(None);
    interp.step(None);
    assert_eq!(interp.input_prompt(), "Age:");
    interp.step(Some("30"));
    assert_eq!(interp.vars()["x"], Value::Int(30));
}

#[test]
fn io_node_without_input_request_executes_like_process() {
    let nodes = vec![
        flow_node(0, NodeKind::Terminal, "START", ""),
        flow_node(1, NodeKind::Io, "SAY", r#"print("hi")"#),
        flow_node(2, NodeKind::Terminal, "END", ""),
    ];
    let edges = vec![flow_edge(0, 1, ""), flow_edge(1, 2, "")];
    let mut interp = Interpreter::new(nodes, edges);
    run_to_completion(&mut interp);

    assert_eq!(interp.err_message(), "");
    assert!(interp.output().contains(&"hi".to_string()));
}

#[test]
fn decision_without_label_match_takes_the_first_edge() {
    let nodes = vec![
        flow_node(0, NodeKind::Terminal, "START", ""),
        flow_node(1, NodeKind::Decision, "always", "1 == 1"),
        flow_node(2, NodeKind::Terminal, "END", ""),
    ];
    // No Y/N labels anywhere; the decision falls back to its first edge.
    let edges = vec![flow_edge(0, 1, ""), flow_edge(1, 2, "maybe")];
    let mut interp = Interpreter::new(nodes, edges);
    run_to_completion(&mut interp);

    assert_eq!(interp.err_message(), "");
    let output = interp.output().join("\n");
    assert!(output.contains("PROGRAM END"));
}

#[test]
fn decision_with_no_outgoing_edges_ends_the_run() {
    let nodes = vec![
        flow_node(0, NodeKind::Terminal, "START", ""),
        flow_node(1, NodeKind::Decision, "dead end", "1 == 1"),
    ];
    let edges = vec![flow_edge(0, 1, "")];
    let mut interp = Interpreter::new(nodes, edges);
    run_to_completion(&mut interp);

    assert!(interp.done());
    assert_eq!(interp.err_message(), "");
}

#[test]
fn empty_decision_code_is_false() {
    let nodes = vec![
        flow_node(0, NodeKind::Terminal, "START", ""),
        flow_node(1, NodeKind::Decision, "?", ""),
        flow_node(2, NodeKind::Process, "YES", r#"print("yes")"#),
        flow_node(3, NodeKind::Process, "NO", r#"print("no")"#),
        flow_node(4, NodeKind::Terminal, "END", ""),
    ];
    let edges = vec![
        flow_edge(0, 1, ""),
        flow_edge(1, 2, "Y"),
        flow_edge(1, 3, "N"),
        flow_edge(2, 4, ""),
        flow_edge(3, 4, ""),
    ];
    let mut interp = Interpreter::new(nodes, edges);
    run_to_completion(&mut interp);

    assert!(interp.output().contains(&"no".to_string()));
    assert!(!interp.output().contains(&"yes".to_string()));
}

#[test]
fn reset_produces_an_identical_second_run() {
    let (nodes, edges) = sum15_chart();
    let mut interp = Interpreter::new(nodes, edges);
    run_to_completion(&mut interp);

    let first_vars = interp.vars().clone();
    let first_output = interp.output().to_vec();

    interp.reset();
    assert!(!interp.done());
    assert_eq!(interp.step_count(), 0);
    assert!(interp.output().is_empty());
    assert!(interp.vars().is_empty());

    run_to_completion(&mut interp);
    assert_eq!(interp.vars(), &first_vars);
    assert_eq!(interp.output(), first_output.as_slice());
}
