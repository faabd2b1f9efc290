use serde_derive::Serialize;

use crate::builtin::{op_of_str, Op};

/// A parsed statement or expression. Nodes are built once by the parser and
/// never mutated; child order is significant (argument order, branch order).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Ast<'a> {
    Num(i32),
    Bool(bool),
    Ident(&'a str),
    /// A builtin special form applied to its (already arity-checked) args.
    Op(Op, Vec<Ast<'a>>),
    /// (define name expr)
    Define(&'a str, Box<Ast<'a>>),
    /// (if cond then else)
    If(Box<Ast<'a>>, Box<Ast<'a>>, Box<Ast<'a>>),
    /// (fun (params ...) body ...), with at least one body statement; only
    /// the last one's value is returned, the rest run for effect.
    Fun(Vec<&'a str>, Vec<Ast<'a>>),
    /// Generic application: callee expression plus argument expressions.
    Call(Box<Ast<'a>>, Vec<Ast<'a>>),
}

/// A whole program: top-level statements, run in order for effect.
pub type Program<'a> = Vec<Ast<'a>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Keyword {
    Op(Op),
    Define,
    If,
    Fun,
}

/// The fixed keyword table. An identifier heading a list selects a special
/// form on a hit; a miss makes the whole list a generic call.
pub fn keyword_of_str(s: &str) -> Option<Keyword> {
    match s {
        "define" => Some(Keyword::Define),
        "if" => Some(Keyword::If),
        "fun" => Some(Keyword::Fun),
        _ => op_of_str(s).map(Keyword::Op),
    }
}
