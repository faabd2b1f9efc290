//! Evaluation of ASTs

use std::io::Write;
use std::rc::Rc;

use crate::ast::{Ast, Program};
use crate::builtin;
use crate::env::{Env, EnvRef};
use crate::error::Error;
use crate::value::{Closure, Value};

/// Tree-walking, environment-passing evaluator. Owns the output writer the
/// print operations go to and the global environment seeded with builtins.
pub struct Interpreter<'a, W> {
    globals: EnvRef<'a>,
    out: W,
}

impl<'a, W: Write> Interpreter<'a, W> {
    pub fn new(out: W) -> Interpreter<'a, W> {
        Interpreter {
            globals: Env::basic(),
            out,
        }
    }

    /// Run a whole program: each top-level statement in order, for effect.
    pub fn run(&mut self, program: &Program<'a>) -> Result<(), Error> {
        let globals = Rc::clone(&self.globals);
        for stmt in program {
            self.eval(stmt, &globals)?;
        }
        Ok(())
    }

    fn eval(&mut self, node: &Ast<'a>, env: &EnvRef<'a>) -> Result<Value<'a>, Error> {
        match node {
            Ast::Num(n) => Ok(Value::Int(*n)),
            Ast::Bool(b) => Ok(Value::Bool(*b)),
            Ast::Ident(name) => env
                .borrow()
                .lookup(name)
                .ok_or_else(|| Error::Unbound((*name).to_string())),
            Ast::Op(op, args) => {
                let args = self.eval_args(args, env)?;
                builtin::apply(*op, &args, &mut self.out)
            },
            Ast::Define(name, expr) => {
                let value = self.eval(expr, env)?;
                env.borrow_mut().define(*name, value);
                Ok(Value::Void)
            },
            Ast::If(cond, then, els) => match self.eval(cond, env)? {
                // Only the selected branch is ever evaluated.
                Value::Bool(true) => self.eval(then, env),
                Value::Bool(false) => self.eval(els, env),
                other => Err(Error::Type {
                    expected: "boolean",
                    found: other.type_name(),
                }),
            },
            Ast::Fun(params, body) => Ok(Value::Closure(Rc::new(Closure {
                params: params.clone(),
                body: body.clone(),
                env: Rc::clone(env),
            }))),
            Ast::Call(callee, args) => {
                let callee = self.eval(callee, env)?;
                let args = self.eval_args(args, env)?;
                self.call(callee, args)
            },
        }
    }

    /// Arguments are evaluated left to right, eagerly, before any call.
    fn eval_args(
        &mut self,
        args: &[Ast<'a>],
        env: &EnvRef<'a>,
    ) -> Result<Vec<Value<'a>>, Error> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg, env)?);
        }
        Ok(values)
    }

    fn call(&mut self, callee: Value<'a>, args: Vec<Value<'a>>) -> Result<Value<'a>, Error> {
        match callee {
            Value::Builtin(op) => builtin::apply(op, &args, &mut self.out),
            Value::Closure(closure) => {
                if closure.params.len() != args.len() {
                    return Err(Error::CallArity {
                        expected: closure.params.len(),
                        found: args.len(),
                    });
                }
                let frame = Env::nested(&closure.env);
                {
                    let mut frame = frame.borrow_mut();
                    for (param, value) in closure.params.iter().zip(args) {
                        frame.define(*param, value);
                    }
                }
                self.eval_body(&closure.body, &frame)
            },
            other => Err(Error::NotCallable(other.type_name())),
        }
    }

    /// A function body: every statement runs, the last one's value is the
    /// result.
    fn eval_body(&mut self, stmts: &[Ast<'a>], env: &EnvRef<'a>) -> Result<Value<'a>, Error> {
        let mut result = Value::Void;
        for stmt in stmts {
            result = self.eval(stmt, env)?;
        }
        Ok(result)
    }
}
