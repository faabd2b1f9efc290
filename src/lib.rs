pub mod ast;
pub mod builtin;
pub mod env;
pub mod error;
pub mod interpret;
pub mod lex;
pub mod parse;
pub mod value;

use std::io::Write;

pub use crate::error::Error;
use crate::interpret::Interpreter;
use crate::parse::Parser;

/// Parse and execute one whole MiniLisp program, writing print output to
/// `out`. The binary and the test suite drive this same pipeline.
pub fn run<W: Write>(source: &str, out: W) -> Result<(), Error> {
    let program = Parser::new(source)?.parse_program()?;
    Interpreter::new(out).run(&program)
}
