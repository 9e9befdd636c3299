use crate::script::Value;
use thiserror::Error;

/// Errors raised while parsing or evaluating node code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("parse error: {message}")]
    Parse { message: String },

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error(
        "type mismatch during operation '{operation}': expected {expected}, but found value '{found}'"
    )]
    TypeMismatch {
        operation: String,
        expected: String,
        found: Value,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("function '{name}' expects {expected} argument(s), got {got}")]
    BadArity {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// Fatal conditions that stop a flowchart run.
///
/// All four are terminal: the interpreter records the error, sets its done
/// flag, and ignores further `step` calls. The display strings are part of
/// the interpreter's observable contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// No terminal node containing "START" exists in the snapshot.
    #[error("NO START NODE")]
    NoStartNode,

    /// Execution reached a node id no node in the snapshot carries.
    #[error("BROKEN LINK")]
    BrokenLink,

    /// The step budget ran out before the program terminated.
    #[error("MAX STEPS EXCEEDED")]
    StepBudgetExceeded,

    /// Evaluating a node's code failed; wraps the cause and the offending
    /// node's display text.
    #[error("ERROR at \"{node}\": {source}")]
    Evaluation {
        node: String,
        #[source]
        source: ScriptError,
    },
}
