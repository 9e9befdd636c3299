//! The step-wise flowchart interpreter.
//!
//! An [`Interpreter`] consumes a frozen snapshot of [`FlowNode`]/[`FlowEdge`]
//! records (the only input contract; it never touches the live graph) and
//! drives one program run: repeated [`Interpreter::step`] calls walk the
//! chart from its START terminal, executing node code against dynamically
//! typed variable bindings and appending to an output log.
//!
//! Execution can suspend on an `io` node's input request; the host observes
//! [`Interpreter::wait_input`]/[`Interpreter::input_prompt`] and passes the
//! raw value to the next `step` call. A fixed step budget bounds
//! non-terminating programs.
//!
//! Every fatal condition (no start node, a broken edge, budget exhaustion,
//! a code evaluation failure) is caught and recorded as a [`RunError`];
//! `step` never returns an error or panics into the host.

mod input;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::RunError;
use crate::graph::NodeId;
use crate::script::{ScriptEngine, Value};
use input::parse_input_request;

/// The five flowchart node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Process,
    Decision,
    Terminal,
    Io,
    Connector,
}

/// A node record in the interpreter's snapshot, decoupled from the live
/// graph's payload type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub text: String,
    pub code: String,
}

/// An edge record in the interpreter's snapshot. Labels are free text, but
/// `"Y"`/`"N"` (case-insensitive) select decision branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
}

/// Default step budget for a run.
pub const DEFAULT_MAX_STEPS: u32 = 500;

const START_BANNER: &str = "── PROGRAM START ──";
const END_BANNER: &str = "── PROGRAM END ──";

/// Executes a flowchart step by step. See the module docs for the
/// lifecycle; construct one per run and [`Interpreter::reset`] between
/// runs for deterministic re-execution.
#[derive(Debug)]
pub struct Interpreter {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,

    vars: AHashMap<String, Value>,
    output: Vec<String>,
    current: Option<NodeId>,
    done: bool,
    err: Option<RunError>,

    wait_input: bool,
    input_prompt: String,
    input_var: String,

    step_count: u32,
    max_steps: u32,
}

impl Interpreter {
    /// Creates an interpreter for the given snapshot with the default step
    /// budget.
    pub fn new(nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) -> Self {
        Self {
            nodes,
            edges,
            vars: AHashMap::new(),
            output: Vec::new(),
            current: None,
            done: false,
            err: None,
            wait_input: false,
            input_prompt: String::new(),
            input_var: String::new(),
            step_count: 0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Overrides the step budget.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Clears all run state for re-running, retaining the snapshot.
    pub fn reset(&mut self) {
        self.vars.clear();
        self.output.clear();
        self.current = None;
        self.done = false;
        self.err = None;
        self.wait_input = false;
        self.input_prompt.clear();
        self.input_var.clear();
        self.step_count = 0;
    }

    // ── Read-only state between steps ──

    pub fn vars(&self) -> &AHashMap<String, Value> {
        &self.vars
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn err(&self) -> Option<&RunError> {
        self.err.as_ref()
    }

    /// The error display string, or `""` while the run is healthy.
    pub fn err_message(&self) -> String {
        self.err.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    pub fn wait_input(&self) -> bool {
        self.wait_input
    }

    pub fn input_prompt(&self) -> &str {
        &self.input_prompt
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Executes one step. Pass `input` when [`Interpreter::wait_input`] is
    /// set; a waiting interpreter stepped without a value stays waiting.
    pub fn step(&mut self, input: Option<&str>) {
        if self.done || self.err.is_some() {
            return;
        }
        self.step_count += 1;
        if self.step_count > self.max_steps {
            self.fail(RunError::StepBudgetExceeded);
            return;
        }

        // Pending input: bind and resume.
        if self.wait_input {
            let Some(raw) = input else { return };
            self.vars
                .insert(std::mem::take(&mut self.input_var), Value::coerce(raw));
            self.output.push(format!("> {}", raw));
            self.wait_input = false;
            if let Some(current) = self.current {
                self.advance(current);
            }
            return;
        }

        // First step: find START.
        let Some(current) = self.current else {
            match self.find_start() {
                Some(id) => {
                    self.current = Some(id);
                    self.output.push(START_BANNER.to_string());
                    self.advance(id);
                }
                None => self.fail(RunError::NoStartNode),
            }
            return;
        };

        let Some(node) = self.find_node(current).cloned() else {
            self.fail(RunError::BrokenLink);
            return;
        };

        if let Err(source) = self.exec_node(&node) {
            self.fail(RunError::Evaluation {
                node: node.text,
                source,
            });
        }
    }

    fn exec_node(&mut self, node: &FlowNode) -> Result<(), crate::error::ScriptError> {
        match node.kind {
            NodeKind::Terminal => {
                self.output.push(END_BANNER.to_string());
                self.done = true;
            }

            NodeKind::Connector => self.advance(node.id),

            NodeKind::Process => {
                let code = node.code.trim();
                if !code.is_empty() {
                    self.engine().exec(code)?;
                }
                self.advance(node.id);
            }

            NodeKind::Decision => {
                let code = node.code.trim();
                let taken = if code.is_empty() {
                    false
                } else {
                    self.engine().eval_bool(code)?
                };
                self.branch(node.id, taken);
            }

            NodeKind::Io => {
                let code = node.code.trim();
                if let Some(request) = parse_input_request(code) {
                    self.input_prompt = request.prompt;
                    self.input_var = request.var;
                    self.wait_input = true;
                    self.output.push(self.input_prompt.clone());
                } else {
                    if !code.is_empty() {
                        self.engine().exec(code)?;
                    }
                    self.advance(node.id);
                }
            }
        }
        Ok(())
    }

    /// Follows a decision node's branch: prefer the `Y`/`N` labeled edge
    /// matching the outcome, fall back to the first outgoing edge, and end
    /// the run if the chosen branch leads nowhere.
    fn branch(&mut self, id: NodeId, taken: bool) {
        let mut first = None;
        let mut yes = None;
        let mut no = None;
        for edge in self.edges.iter().filter(|e| e.from == id) {
            first.get_or_insert(edge.to);
            match edge.label.to_ascii_uppercase().as_str() {
                "Y" => yes = Some(edge.to),
                "N" => no = Some(edge.to),
                _ => {}
            }
        }

        let next = if taken { yes.or(first) } else { no.or(first) };
        match next {
            Some(to) => self.current = Some(to),
            None => self.done = true,
        }
    }

    /// Advances along the node's first outgoing edge (snapshot order); a
    /// node with no outgoing edge ends the run.
    fn advance(&mut self, id: NodeId) {
        match self.edges.iter().find(|e| e.from == id) {
            Some(edge) => self.current = Some(edge.to),
            None => {
                self.current = None;
                self.done = true;
            }
        }
    }

    fn engine(&mut self) -> ScriptEngine<'_> {
        ScriptEngine::new(&mut self.vars, &mut self.output)
    }

    fn find_start(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|n| n.kind == NodeKind::Terminal && n.text.to_uppercase().contains("START"))
            .map(|n| n.id)
    }

    fn find_node(&self, id: NodeId) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Records a fatal error: visible marker in the output log, error field
    /// set, run over.
    fn fail(&mut self, err: RunError) {
        self.output.push(format!("── ERROR: {} ──", err));
        self.err = Some(err);
        self.done = true;
    }
}
