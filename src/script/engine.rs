//! The tree-walking evaluator for parsed node code.

use ahash::AHashMap;
use itertools::Itertools;

use super::ast::{Expr, Stmt};
use super::parser::{parse_expression, parse_program};
use super::Value;
use crate::error::ScriptError;

/// Evaluates statements and expressions against a host-owned variable scope
/// and output log.
///
/// The engine borrows both for its lifetime, so every evaluation sees the
/// current bindings and assignments land directly back in them. Two builtins
/// are available to evaluated code: `print(...)`, which appends its
/// space-joined arguments to the output log, and `str(x)`, which stringifies
/// a value.
pub struct ScriptEngine<'a> {
    vars: &'a mut AHashMap<String, Value>,
    output: &'a mut Vec<String>,
}

impl<'a> ScriptEngine<'a> {
    pub fn new(vars: &'a mut AHashMap<String, Value>, output: &'a mut Vec<String>) -> Self {
        Self { vars, output }
    }

    /// Executes a semicolon-separated statement list.
    pub fn exec(&mut self, src: &str) -> Result<(), ScriptError> {
        for stmt in parse_program(src)? {
            match stmt {
                Stmt::Assign { name, expr } => {
                    let value = self.eval(&expr)?;
                    self.vars.insert(name, value);
                }
                Stmt::Expr(expr) => {
                    self.eval(&expr)?;
                }
            }
        }
        Ok(())
    }

    /// Evaluates a single expression and reduces the result to truthiness.
    pub fn eval_bool(&mut self, src: &str) -> Result<bool, ScriptError> {
        let expr = parse_expression(src)?;
        Ok(self.eval(&expr)?.is_truthy())
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, ScriptError> {
        match expr {
            Expr::Literal(v) => Ok(v.clone()),
            Expr::Variable(name) => self
                .vars
                .get(name)
                .cloned()
                .ok_or_else(|| ScriptError::UnknownVariable(name.clone())),
            Expr::Call(name, args) => {
                let args = args
                    .iter()
                    .map(|a| self.eval(a))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call(name, args)
            }

            // --- Arithmetic ---
            // `+` concatenates as soon as either side is a string.
            Expr::Sum(l, r) => {
                let (lv, rv) = (self.eval(l)?, self.eval(r)?);
                match (lv, rv) {
                    (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
                    (Value::Str(a), b) => Ok(Value::Str(format!("{}{}", a, b))),
                    (a, Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
                    (Value::Int(_), other) | (other, _) => {
                        Err(self.type_mismatch("+", "Int or Str", other))
                    }
                }
            }
            Expr::Subtract(l, r) => self.eval_arith(l, r, "-", |a, b| Ok(a - b)),
            Expr::Multiply(l, r) => self.eval_arith(l, r, "*", |a, b| Ok(a * b)),
            Expr::Divide(l, r) => self.eval_arith(l, r, "/", |a, b| {
                if b == 0 {
                    Err(ScriptError::DivisionByZero)
                } else {
                    Ok(a / b)
                }
            }),
            Expr::Modulo(l, r) => self.eval_arith(l, r, "%", |a, b| {
                if b == 0 {
                    Err(ScriptError::DivisionByZero)
                } else {
                    Ok(a % b)
                }
            }),
            Expr::Negate(v) => match self.eval(v)? {
                Value::Int(n) => Ok(Value::Int(-n)),
                other => Err(self.type_mismatch("-", "Int", other)),
            },

            // --- Comparison ---
            Expr::Equal(l, r) => Ok(Value::Bool(self.eval(l)? == self.eval(r)?)),
            Expr::NotEqual(l, r) => Ok(Value::Bool(self.eval(l)? != self.eval(r)?)),
            Expr::GreaterThan(l, r) => self.eval_ordering(l, r, ">", |o| o.is_gt()),
            Expr::GreaterThanOrEqual(l, r) => self.eval_ordering(l, r, ">=", |o| o.is_ge()),
            Expr::SmallerThan(l, r) => self.eval_ordering(l, r, "<", |o| o.is_lt()),
            Expr::SmallerThanOrEqual(l, r) => self.eval_ordering(l, r, "<=", |o| o.is_le()),

            // --- Logical (short-circuit on truthiness) ---
            Expr::And(l, r) => {
                if !self.eval(l)?.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(r)?.is_truthy()))
            }
            Expr::Or(l, r) => {
                if self.eval(l)?.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(r)?.is_truthy()))
            }
            Expr::Not(v) => Ok(Value::Bool(!self.eval(v)?.is_truthy())),
        }
    }

    fn eval_arith(
        &mut self,
        l: &Expr,
        r: &Expr,
        op: &str,
        apply: impl Fn(i64, i64) -> Result<i64, ScriptError>,
    ) -> Result<Value, ScriptError> {
        match (self.eval(l)?, self.eval(r)?) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(apply(a, b)?)),
            (Value::Int(_), other) | (other, _) => Err(self.type_mismatch(op, "Int", other)),
        }
    }

    fn eval_ordering(
        &mut self,
        l: &Expr,
        r: &Expr,
        op: &str,
        accept: impl Fn(std::cmp::Ordering) -> bool,
    ) -> Result<Value, ScriptError> {
        match (self.eval(l)?, self.eval(r)?) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(accept(a.cmp(&b)))),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Bool(accept(a.cmp(&b)))),
            (other, _) => Err(self.type_mismatch(op, "two Ints or two Strs", other)),
        }
    }

    fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Value, ScriptError> {
        match name {
            "print" => {
                self.output
                    .push(args.iter().map(Value::to_string).join(" "));
                Ok(Value::Str(String::new()))
            }
            "str" => {
                if args.len() != 1 {
                    return Err(ScriptError::BadArity {
                        name: "str".to_string(),
                        expected: 1,
                        got: args.len(),
                    });
                }
                Ok(Value::Str(args[0].to_string()))
            }
            _ => Err(ScriptError::UnknownFunction(name.to_string())),
        }
    }

    fn type_mismatch(&self, operation: &str, expected: &str, found: Value) -> ScriptError {
        ScriptError::TypeMismatch {
            operation: operation.to_string(),
            expected: expected.to_string(),
            found,
        }
    }
}
