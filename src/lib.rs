//! # Flowgrid - Terminal Flowchart Engine
//!
//! **Flowgrid** is the engine core of a terminal visual-programming tool:
//! flowcharts are authored as a spatial graph of typed nodes (process,
//! decision, terminal, I/O, connector) and executed step by step, producing
//! variable state and textual output.
//!
//! The crate contains four cooperating subsystems and deliberately excludes
//! the interactive shell around them (key/mouse dispatch, camera, panels):
//!
//! 1. **Graph** ([`graph`]): a generic container of positioned nodes and
//!    labeled edges with stable insertion-order iteration, z-order hit
//!    testing, rectangle queries, and edge-cascade deletion. This is the
//!    live document an editor mutates.
//! 2. **Drawing** ([`draw`], [`geometry`]): Bresenham rasterization,
//!    directional line/arrow glyph lookup, and the exit-point geometry that
//!    routes connectors between node boxes.
//! 3. **Cell buffer** ([`buffer`]): a grid of styled cells with
//!    bounds-checked writes and a run-merging render pipeline that styles
//!    maximal same-style runs instead of individual cells.
//! 4. **Interpreter** ([`interp`], [`script`]): a step-wise execution state
//!    machine over a frozen node/edge snapshot, with dynamically typed
//!    variables, an output log, suspend-on-input semantics, and a step
//!    budget. Node code runs on a small self-contained expression
//!    evaluator.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowgrid::prelude::*;
//!
//! let nodes = vec![
//!     FlowNode {
//!         id: 0,
//!         kind: NodeKind::Terminal,
//!         text: "START".to_string(),
//!         code: String::new(),
//!     },
//!     FlowNode {
//!         id: 1,
//!         kind: NodeKind::Process,
//!         text: "INIT".to_string(),
//!         code: "x = 2 + 3".to_string(),
//!     },
//!     FlowNode {
//!         id: 2,
//!         kind: NodeKind::Terminal,
//!         text: "END".to_string(),
//!         code: String::new(),
//!     },
//! ];
//! let edges = vec![
//!     FlowEdge { from: 0, to: 1, label: String::new() },
//!     FlowEdge { from: 1, to: 2, label: String::new() },
//! ];
//!
//! let mut interp = Interpreter::new(nodes, edges);
//! while !interp.done() {
//!     interp.step(None);
//! }
//!
//! assert_eq!(interp.err_message(), "");
//! assert_eq!(interp.vars()["x"], Value::Int(5));
//! ```
//!
//! To put a chart on screen, the hosting editor reads the graph each frame,
//! paints nodes and edges into a [`buffer::Buffer`] via [`draw`], and calls
//! [`buffer::Buffer::render`] with its style table to obtain terminal text.

pub mod buffer;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod interp;
pub mod prelude;
pub mod script;
