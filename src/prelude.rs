//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types from the flowgrid crate so
//! hosting code can bring the whole working set in with one `use`.

// Graph model
pub use crate::graph::{Edge, Graph, Node, NodeId, Spatial};

// Geometry
pub use crate::geometry::{Point, Rect};

// Cell buffer and rendering
pub use crate::buffer::{Buffer, Cell, StyleId, StyleResolver};

// Interpreter
pub use crate::interp::{FlowEdge, FlowNode, Interpreter, NodeKind, DEFAULT_MAX_STEPS};

// Script values
pub use crate::script::Value;

// Error types
pub use crate::error::{RunError, ScriptError};

// Result type alias for convenience in hosting binaries
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
