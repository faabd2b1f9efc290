use derive_more::Display;

use crate::builtin::Arity;

/// Everything that can go wrong between reading source text and finishing
/// evaluation. The surface of the interpreter only distinguishes type errors
/// from everything else, but internally each failure keeps its own shape so
/// callers (and `RUST_LOG=debug`) can see what actually happened.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Error {
    #[display(fmt = "illegal character at byte {}", pos)]
    IllegalChar { pos: usize },
    #[display(fmt = "integer literal out of 32-bit range at byte {}", pos)]
    IntOutOfRange { pos: usize },
    #[display(fmt = "unexpected end of input")]
    UnexpectedEof,
    #[display(fmt = "unexpected token in statement position")]
    UnexpectedToken,
    #[display(fmt = "unexpected empty list")]
    EmptyList,
    #[display(fmt = "missing closing paren")]
    MissingRParen,
    #[display(fmt = "`{}` expects {} args, got {}", form, expected, found)]
    FormArity {
        form: &'static str,
        expected: Arity,
        found: usize,
    },
    #[display(fmt = "`fun` expects a parenthesized list of parameter names")]
    MalformedParams,
    #[display(fmt = "`define` expects a bare identifier to bind")]
    ExpectedName,
    #[display(fmt = "undefined variable `{}`", _0)]
    Unbound(String),
    #[display(fmt = "division by zero")]
    DivisionByZero,
    #[display(fmt = "function expects {} args, got {}", expected, found)]
    CallArity { expected: usize, found: usize },
    #[display(fmt = "expected {}, got {}", expected, found)]
    Type {
        expected: &'static str,
        found: &'static str,
    },
    #[display(fmt = "cannot call a value of type {}", _0)]
    NotCallable(&'static str),
    #[display(fmt = "failed to write output")]
    Io,
}

impl Error {
    /// Whether this failure is reported as `Type error!` at the boundary.
    /// Every other kind collapses into the generic `syntax error` verdict,
    /// matching the reference behavior.
    pub fn is_type_error(&self) -> bool {
        matches!(self, Error::Type { .. } | Error::NotCallable(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(_: std::io::Error) -> Self {
        Error::Io
    }
}
