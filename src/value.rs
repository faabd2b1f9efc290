use std::rc::Rc;

use crate::ast::Ast;
use crate::builtin::Op;
use crate::env::EnvRef;

/// A runtime value. No compound value types exist in the language, so this
/// stays small: numbers, booleans, callables, and the result of statements
/// that produce nothing usable.
#[derive(Clone, Debug)]
pub enum Value<'a> {
    Int(i32),
    Bool(bool),
    Closure(Rc<Closure<'a>>),
    Builtin(Op),
    /// The value of `define` and of the print operations. Consuming it as a
    /// number or boolean is a type error.
    Void,
}

/// A user function: parameter names and body are fixed at construction, the
/// defining environment is held by shared reference so names written into it
/// later (recursion via `define`) resolve at call time.
#[derive(Debug)]
pub struct Closure<'a> {
    pub params: Vec<&'a str>,
    pub body: Vec<Ast<'a>>,
    pub env: EnvRef<'a>,
}

impl<'a> Value<'a> {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Closure(_) | Value::Builtin(_) => "function",
            Value::Void => "void",
        }
    }
}

impl<'a> PartialEq for Value<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            // Closures have identity, not structure.
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Void, Value::Void) => true,
            _ => false,
        }
    }
}
