use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime value types used by evaluated flowchart code.
///
/// Variables bind integers and strings; booleans arise from comparisons
/// and logical operators and can flow into bindings when a program assigns
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl Value {
    /// Coerces a raw input string: if the whole trimmed string is the
    /// canonical rendering of an integer it binds as `Int`, otherwise as
    /// `Str`. The round-trip check rejects forms like `+5` or `007`.
    pub fn coerce(raw: &str) -> Value {
        let trimmed = raw.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            if n.to_string() == trimmed {
                return Value::Int(n);
            }
        }
        Value::Str(trimmed.to_string())
    }

    /// Truthiness for conditions and logical operators: a `Bool` is itself,
    /// an `Int` is true when nonzero, a `Str` when nonempty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Str(s) => !s.is_empty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Str(_) => "Str",
            Value::Bool(_) => "Bool",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}
