use crate::ast::{keyword_of_str, Ast, Keyword, Program};
use crate::builtin::Arity;
use crate::error::Error;
use crate::lex::{tokenize, Token};

/// Recursive-descent parser over the full token vector.
///
/// Grammar:
/// ```text
/// program := stmt*
/// stmt    := NUMBER | BOOL | IDENT | '(' sexpr
/// sexpr   := special-form | call
/// ```
/// The identifier right after `(` is looked up in the keyword table; a hit
/// selects a special form (arity-checked here), a miss makes the list a
/// generic call whose first element is the callee expression.
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Parser<'a>, Error> {
        Ok(Parser {
            tokens: tokenize(input)?,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub fn parse_program(mut self) -> Result<Program<'a>, Error> {
        let mut stmts = Vec::new();
        while self.peek().is_some() {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Ast<'a>, Error> {
        match self.next().ok_or(Error::UnexpectedEof)? {
            Token::Number(n) => Ok(Ast::Num(n)),
            Token::Bool(b) => Ok(Ast::Bool(b)),
            Token::Ident(name) => Ok(Ast::Ident(name)),
            Token::LParen => self.parse_sexpr(),
            Token::RParen => Err(Error::UnexpectedToken),
        }
    }

    /// Parse the remainder of a list, the opening paren already consumed.
    fn parse_sexpr(&mut self) -> Result<Ast<'a>, Error> {
        match self.peek().ok_or(Error::UnexpectedEof)? {
            Token::RParen => Err(Error::EmptyList),
            Token::Ident(head) => match keyword_of_str(head) {
                Some(keyword) => {
                    self.pos += 1;
                    self.parse_special_form(keyword)
                },
                None => self.parse_call(),
            },
            _ => self.parse_call(),
        }
    }

    fn parse_special_form(&mut self, keyword: Keyword) -> Result<Ast<'a>, Error> {
        match keyword {
            Keyword::Op(op) => {
                let args = self.parse_args()?;
                check_arity(op.name(), op.arity(), args.len())?;
                Ok(Ast::Op(op, args))
            },
            Keyword::Define => {
                let args = self.parse_args()?;
                check_arity("define", Arity::Exactly(2), args.len())?;
                let mut args = args.into_iter();
                match (args.next(), args.next()) {
                    (Some(Ast::Ident(name)), Some(expr)) => {
                        Ok(Ast::Define(name, Box::new(expr)))
                    },
                    _ => Err(Error::ExpectedName),
                }
            },
            Keyword::If => {
                let mut args = self.parse_args()?;
                check_arity("if", Arity::Exactly(3), args.len())?;
                let els = args.pop().ok_or(Error::UnexpectedEof)?;
                let then = args.pop().ok_or(Error::UnexpectedEof)?;
                let cond = args.pop().ok_or(Error::UnexpectedEof)?;
                Ok(Ast::If(Box::new(cond), Box::new(then), Box::new(els)))
            },
            Keyword::Fun => {
                let params = self.parse_params()?;
                let body = self.parse_args()?;
                if body.is_empty() {
                    return Err(Error::FormArity {
                        form: "fun",
                        expected: Arity::AtLeast(1),
                        found: 0,
                    });
                }
                Ok(Ast::Fun(params, body))
            },
        }
    }

    fn parse_call(&mut self) -> Result<Ast<'a>, Error> {
        let mut elems = self.parse_args()?;
        if elems.is_empty() {
            return Err(Error::EmptyList);
        }
        let args = elems.split_off(1);
        let callee = elems.pop().ok_or(Error::EmptyList)?;
        Ok(Ast::Call(Box::new(callee), args))
    }

    /// Statements up to (and consuming) the closing paren.
    fn parse_args(&mut self) -> Result<Vec<Ast<'a>>, Error> {
        let mut args = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RParen) => {
                    self.pos += 1;
                    return Ok(args);
                },
                Some(_) => args.push(self.parse_stmt()?),
                None => return Err(Error::MissingRParen),
            }
        }
    }

    /// The `(ident ...)` parameter list of a `fun` form.
    fn parse_params(&mut self) -> Result<Vec<&'a str>, Error> {
        match self.next() {
            Some(Token::LParen) => {},
            Some(_) => return Err(Error::MalformedParams),
            None => return Err(Error::UnexpectedEof),
        }
        let mut params = Vec::new();
        loop {
            match self.next() {
                Some(Token::RParen) => return Ok(params),
                Some(Token::Ident(name)) => params.push(name),
                Some(_) => return Err(Error::MalformedParams),
                None => return Err(Error::MissingRParen),
            }
        }
    }
}

fn check_arity(form: &'static str, expected: Arity, found: usize) -> Result<(), Error> {
    if expected.admits(found) {
        Ok(())
    } else {
        Err(Error::FormArity {
            form,
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::Op;

    fn parse(input: &str) -> Result<Program<'_>, Error> {
        Parser::new(input)?.parse_program()
    }

    #[test]
    fn test_parse_literals_and_idents() {
        assert_eq!(
            parse("12 #t x"),
            Ok(vec![Ast::Num(12), Ast::Bool(true), Ast::Ident("x")]),
        );
    }

    #[test]
    fn test_parse_nested_ops() {
        assert_eq!(
            parse("(+ 1 (+ 2 3) 4)"),
            Ok(vec![Ast::Op(
                Op::Plus,
                vec![
                    Ast::Num(1),
                    Ast::Op(Op::Plus, vec![Ast::Num(2), Ast::Num(3)]),
                    Ast::Num(4),
                ],
            )]),
        );
    }

    #[test]
    fn test_parse_special_forms() {
        assert_eq!(
            parse("(define x (+ 1 2))"),
            Ok(vec![Ast::Define(
                "x",
                Ast::Op(Op::Plus, vec![Ast::Num(1), Ast::Num(2)]).into(),
            )]),
        );
        assert_eq!(
            parse("(if (> x 0) 1 -1)"),
            Ok(vec![Ast::If(
                Ast::Op(Op::Greater, vec![Ast::Ident("x"), Ast::Num(0)]).into(),
                Ast::Num(1).into(),
                Ast::Num(-1).into(),
            )]),
        );
        assert_eq!(
            parse("(fun (x y) (define z 1) (+ x y z))"),
            Ok(vec![Ast::Fun(
                vec!["x", "y"],
                vec![
                    Ast::Define("z", Ast::Num(1).into()),
                    Ast::Op(
                        Op::Plus,
                        vec![Ast::Ident("x"), Ast::Ident("y"), Ast::Ident("z")],
                    ),
                ],
            )]),
        );
    }

    #[test]
    fn test_parse_calls() {
        assert_eq!(
            parse("((fun (x) (+ x 1)) 2)"),
            Ok(vec![Ast::Call(
                Ast::Fun(
                    vec!["x"],
                    vec![Ast::Op(Op::Plus, vec![Ast::Ident("x"), Ast::Num(1)])],
                )
                .into(),
                vec![Ast::Num(2)],
            )]),
        );
        // `f` is no keyword, so the whole list is a generic application.
        assert_eq!(
            parse("(f 1 2)"),
            Ok(vec![Ast::Call(
                Ast::Ident("f").into(),
                vec![Ast::Num(1), Ast::Num(2)],
            )]),
        );
    }

    #[test]
    fn test_arity_violations() {
        let cases = [
            ("(+ 1)", "+", Arity::AtLeast(2), 1),
            ("(= 3)", "=", Arity::AtLeast(2), 1),
            ("(- 1 2 3)", "-", Arity::Exactly(2), 3),
            ("(not #t #f)", "not", Arity::Exactly(1), 2),
            ("(print-num)", "print-num", Arity::Exactly(1), 0),
            ("(if #t 1)", "if", Arity::Exactly(3), 2),
            ("(define x 1 2)", "define", Arity::Exactly(2), 3),
            ("(fun (x))", "fun", Arity::AtLeast(1), 0),
        ];
        for (input, form, expected, found) in cases {
            assert_eq!(
                parse(input),
                Err(Error::FormArity {
                    form,
                    expected,
                    found,
                }),
                "input: {input}",
            );
        }
    }

    #[test]
    fn test_malformed_programs() {
        let cases = [
            ("()", Error::EmptyList),
            ("(+ 1 2", Error::MissingRParen),
            (")", Error::UnexpectedToken),
            ("(", Error::UnexpectedEof),
            ("(define 3 4)", Error::ExpectedName),
            ("(fun x (+ x 1))", Error::MalformedParams),
            ("(fun (1) 2)", Error::MalformedParams),
        ];
        for (input, expected) in cases {
            assert_eq!(parse(input), Err(expected), "input: {input}");
        }
    }
}
