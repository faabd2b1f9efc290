//! The fixed primitive set and its numeric/boolean semantics.

use std::io::Write;

use derive_more::Display;
use serde_derive::Serialize;

use crate::error::Error;
use crate::value::Value;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Op {
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Multiply,
    /// /
    Divide,
    /// mod
    Modulus,
    /// >
    Greater,
    /// <
    Smaller,
    /// =
    Equal,
    /// and
    And,
    /// or
    Or,
    /// not
    Not,
    /// print-num
    PrintNum,
    /// print-bool
    PrintBool,
}

pub fn op_of_str(s: &str) -> Option<Op> {
    match s {
        "+" => Some(Op::Plus),
        "-" => Some(Op::Minus),
        "*" => Some(Op::Multiply),
        "/" => Some(Op::Divide),
        "mod" => Some(Op::Modulus),
        ">" => Some(Op::Greater),
        "<" => Some(Op::Smaller),
        "=" => Some(Op::Equal),
        "and" => Some(Op::And),
        "or" => Some(Op::Or),
        "not" => Some(Op::Not),
        "print-num" => Some(Op::PrintNum),
        "print-bool" => Some(Op::PrintBool),
        _ => None,
    }
}

/// Names under which the primitives are pre-bound in the global environment,
/// making them reachable as first-class values in argument position.
pub const TABLE: [(&str, Op); 13] = [
    ("plus", Op::Plus),
    ("minus", Op::Minus),
    ("multiply", Op::Multiply),
    ("divide", Op::Divide),
    ("modulus", Op::Modulus),
    ("greater", Op::Greater),
    ("smaller", Op::Smaller),
    ("equal", Op::Equal),
    ("and", Op::And),
    ("or", Op::Or),
    ("not", Op::Not),
    ("print-num", Op::PrintNum),
    ("print-bool", Op::PrintBool),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum Arity {
    #[display(fmt = "at least {}", _0)]
    AtLeast(usize),
    #[display(fmt = "exactly {}", _0)]
    Exactly(usize),
}

impl Arity {
    pub fn admits(self, found: usize) -> bool {
        match self {
            Arity::AtLeast(n) => found >= n,
            Arity::Exactly(n) => found == n,
        }
    }
}

impl Op {
    /// The surface spelling, for error messages.
    pub fn name(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Multiply => "*",
            Op::Divide => "/",
            Op::Modulus => "mod",
            Op::Greater => ">",
            Op::Smaller => "<",
            Op::Equal => "=",
            Op::And => "and",
            Op::Or => "or",
            Op::Not => "not",
            Op::PrintNum => "print-num",
            Op::PrintBool => "print-bool",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Op::Plus | Op::Multiply | Op::Equal | Op::And | Op::Or => Arity::AtLeast(2),
            Op::Minus | Op::Divide | Op::Modulus | Op::Greater | Op::Smaller => Arity::Exactly(2),
            Op::Not | Op::PrintNum | Op::PrintBool => Arity::Exactly(1),
        }
    }
}

/// Invoke a primitive on already-evaluated arguments. Argument count is
/// re-checked here: the parser only vets special-form syntax, not calls that
/// reach a primitive as a first-class value.
///
/// All arithmetic results wrap to the signed 32-bit range (two's-complement
/// wraparound), applied per operation result, never to intermediates of a
/// wider type.
pub fn apply<'a, W: Write>(op: Op, args: &[Value<'a>], out: &mut W) -> Result<Value<'a>, Error> {
    if !op.arity().admits(args.len()) {
        return Err(Error::FormArity {
            form: op.name(),
            expected: op.arity(),
            found: args.len(),
        });
    }
    match op {
        Op::Plus => {
            let xs = ints(args)?;
            Ok(Value::Int(xs.into_iter().fold(0i32, i32::wrapping_add)))
        },
        Op::Minus => {
            let xs = ints(args)?;
            Ok(Value::Int(xs[0].wrapping_sub(xs[1])))
        },
        Op::Multiply => {
            let xs = ints(args)?;
            Ok(Value::Int(xs.into_iter().fold(1i32, i32::wrapping_mul)))
        },
        Op::Divide => {
            let xs = ints(args)?;
            if xs[1] == 0 {
                return Err(Error::DivisionByZero);
            }
            // wrapping_div: i32::MIN / -1 wraps instead of trapping.
            Ok(Value::Int(xs[0].wrapping_div(xs[1])))
        },
        Op::Modulus => {
            let xs = ints(args)?;
            if xs[1] == 0 {
                return Err(Error::DivisionByZero);
            }
            // Truncating-division remainder: sign follows the dividend.
            Ok(Value::Int(xs[0].wrapping_rem(xs[1])))
        },
        Op::Greater => {
            let xs = ints(args)?;
            Ok(Value::Bool(xs[0] > xs[1]))
        },
        Op::Smaller => {
            let xs = ints(args)?;
            Ok(Value::Bool(xs[0] < xs[1]))
        },
        Op::Equal => {
            let xs = ints(args)?;
            Ok(Value::Bool(xs.iter().all(|&x| x == xs[0])))
        },
        Op::And => {
            let bs = bools(args)?;
            Ok(Value::Bool(bs.into_iter().all(|b| b)))
        },
        Op::Or => {
            let bs = bools(args)?;
            Ok(Value::Bool(bs.into_iter().any(|b| b)))
        },
        Op::Not => {
            let bs = bools(args)?;
            Ok(Value::Bool(!bs[0]))
        },
        Op::PrintNum => {
            let xs = ints(args)?;
            writeln!(out, "{}", xs[0])?;
            Ok(Value::Void)
        },
        Op::PrintBool => {
            let bs = bools(args)?;
            writeln!(out, "{}", if bs[0] { "#t" } else { "#f" })?;
            Ok(Value::Void)
        },
    }
}

fn ints(args: &[Value<'_>]) -> Result<Vec<i32>, Error> {
    args.iter()
        .map(|v| match v {
            Value::Int(n) => Ok(*n),
            other => Err(Error::Type {
                expected: "number",
                found: other.type_name(),
            }),
        })
        .collect()
}

fn bools(args: &[Value<'_>]) -> Result<Vec<bool>, Error> {
    args.iter()
        .map(|v| match v {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::Type {
                expected: "boolean",
                found: other.type_name(),
            }),
        })
        .collect()
}
