//! Library surface for the interpreter, split out from `main.rs` the way
//! `TrevorS-lisp-llm-sandbox` separates its crate body from its CLI binary so
//! integration tests can exercise the evaluator without going through a
//! process boundary.

pub mod apply;
pub mod ast;
pub mod builtins;
pub mod config;
pub mod env;
pub mod error;
pub mod eval;
pub mod parser;
pub mod reader;
pub mod value;

use std::cell::RefCell;
use std::rc::Rc;

use env::Environment;
use value::{EnvRef, Value};

/// Builds a fresh global environment with every builtin registered.
pub fn new_root_env() -> EnvRef {
    let env = Rc::new(RefCell::new(Environment::new()));
    builtins::register_builtins(&env);
    env
}

/// Parses and evaluates every top-level expression in `source` against
/// `env`, returning each expression's resulting `Value` in order. A parse
/// failure short-circuits before any evaluation happens.
pub fn eval_program(env: &EnvRef, source: &str) -> Result<Vec<Value>, parser::ParseError> {
    let ast = parser::parse(source)?;
    let values = reader::read_program(&ast);
    Ok(values.into_iter().map(|v| eval::eval(env, v)).collect())
}
