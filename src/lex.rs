use logos::{Lexer, Logos};
use serde_derive::Serialize;

use crate::error::Error;

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[token("#t")]
    #[token("#f")]
    Bool,
    #[regex(r"-?[0-9]+", priority = 2)]
    Number,
    // Identifiers are lowercase-led alphanumeric/hyphen runs; keywords and
    // the word `mod` match this pattern too and are told apart by the parser.
    #[regex(r"[a-z][a-z0-9-]*")]
    Ident,
    #[regex(r"[+\-*/<>=]")]
    Operator,

    #[error]
    #[regex(r"[ \t\n\r\f]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)]
    Error,
}

/// A cooked token: raw slices resolved into their payloads. Identifier and
/// operator slices borrow from the source text for the whole pipeline.
#[derive(PartialEq, Debug, Clone, Copy, Serialize)]
pub enum Token<'a> {
    Number(i32),
    Bool(bool),
    LParen,
    RParen,
    Ident(&'a str),
}

/// Tokenize the entire source up front. Fails on the first byte that matches
/// no pattern, or on a numeric literal outside the 32-bit range.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, Error> {
    let mut lexer: Lexer<RawToken> = RawToken::lexer(input);
    let mut tokens = Vec::new();
    while let Some(raw) = lexer.next() {
        let slice = lexer.slice();
        let token = match raw {
            RawToken::LParen => Token::LParen,
            RawToken::RParen => Token::RParen,
            RawToken::Bool => Token::Bool(slice == "#t"),
            RawToken::Number => {
                let num = slice.parse::<i32>().map_err(|_| Error::IntOutOfRange {
                    pos: lexer.span().start,
                })?;
                Token::Number(num)
            },
            RawToken::Ident | RawToken::Operator => Token::Ident(slice),
            RawToken::Error => {
                return Err(Error::IllegalChar {
                    pos: lexer.span().start,
                })
            },
        };
        tokens.push(token);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::{Lexer, Logos};

    #[test]
    fn test_raw_lexer() {
        let mut lexer: Lexer<_> = RawToken::lexer("(+ 1 -2)");
        assert_eq!(lexer.next(), Some(RawToken::LParen));
        assert_eq!(lexer.slice(), "(");
        assert_eq!(lexer.next(), Some(RawToken::Operator));
        assert_eq!(lexer.slice(), "+");
        assert_eq!(lexer.next(), Some(RawToken::Number));
        assert_eq!(lexer.slice(), "1");
        assert_eq!(lexer.next(), Some(RawToken::Number));
        assert_eq!(lexer.slice(), "-2");
        assert_eq!(lexer.next(), Some(RawToken::RParen));
        assert_eq!(lexer.slice(), ")");
    }

    #[test]
    fn test_tokenize() {
        let cases = [
            (
                "(print-num 42)",
                vec![
                    Token::LParen,
                    Token::Ident("print-num"),
                    Token::Number(42),
                    Token::RParen,
                ],
            ),
            (
                "(mod -7 2)",
                vec![
                    Token::LParen,
                    Token::Ident("mod"),
                    Token::Number(-7),
                    Token::Number(2),
                    Token::RParen,
                ],
            ),
            ("#t #f", vec![Token::Bool(true), Token::Bool(false)]),
            (
                "// a comment\nx // trailing\ny",
                vec![Token::Ident("x"), Token::Ident("y")],
            ),
            ("a-1b", vec![Token::Ident("a-1b")]),
            ("2147483647", vec![Token::Number(2147483647)]),
            ("-2147483648", vec![Token::Number(-2147483648)]),
        ];
        for (input, expected) in cases {
            assert_eq!(tokenize(input).unwrap(), expected, "input: {input}");
        }
    }

    #[test]
    fn test_tokenize_errors() {
        assert_eq!(tokenize("(+ 1 @)"), Err(Error::IllegalChar { pos: 5 }));
        assert_eq!(tokenize("Abc"), Err(Error::IllegalChar { pos: 0 }));
        assert_eq!(
            tokenize("99999999999"),
            Err(Error::IntOutOfRange { pos: 0 })
        );
    }
}
