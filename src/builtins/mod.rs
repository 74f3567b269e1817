//! Host-implemented operations (C6). Organized by concern the way
//! `TrevorS-lisp-llm-sandbox/src/builtins/` splits its much larger builtin
//! set into one file per concern; `register_builtins` is the single entry
//! point analogous to the teacher's `populate_environment`.

mod arithmetic;
mod binding;
mod comparison;
mod control;
mod io;
mod lists;
mod logic;

use std::cell::RefCell;

use crate::error::{EvalError, Result};
use crate::value::{BuiltinFn, EnvRef, Value};

/// Checks `args.len() == expected`, producing the exact arity diagnostic
/// text from spec.md §7 (`LASSERT_NUM` in the original source).
pub(crate) fn check_arity(name: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(EvalError::Arity {
            name: name.to_string(),
            got: args.len(),
            expected,
        });
    }
    Ok(())
}

pub(crate) fn type_error(name: &str, args: &[Value], index: usize, expected: &'static str) -> EvalError {
    EvalError::WrongType {
        name: name.to_string(),
        index,
        got: args[index].type_name(),
        expected,
    }
}

pub(crate) fn require_qexpr<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a [Value]> {
    match &args[index] {
        Value::QExpr(items) => Ok(items),
        _ => Err(type_error(name, args, index, "Q-Expression")),
    }
}

pub(crate) fn require_not_empty(name: &str, index: usize, items: &[Value]) -> Result<()> {
    if items.is_empty() {
        return Err(EvalError::EmptyArgument {
            name: name.to_string(),
            index,
        });
    }
    Ok(())
}

/// Registers every required builtin (spec.md §4.6) into `env`, which must be
/// the root environment.
pub fn register_builtins(env: &EnvRef) {
    let table: &[(&str, BuiltinFn)] = &[
        // Lists
        ("list", lists::list),
        ("head", lists::head),
        ("tail", lists::tail),
        ("join", lists::join),
        ("eval", lists::eval_builtin),
        // Arithmetic
        ("+", arithmetic::add),
        ("-", arithmetic::sub),
        ("*", arithmetic::mul),
        ("/", arithmetic::div),
        ("%", arithmetic::rem),
        ("^", arithmetic::pow),
        ("min", arithmetic::min),
        ("max", arithmetic::max),
        // Binding
        ("\\", binding::lambda),
        ("def", binding::def),
        ("=", binding::put),
        // Control
        ("if", control::if_builtin),
        // Comparison
        ("==", comparison::eq),
        ("!=", comparison::ne),
        (">", comparison::gt),
        ("<", comparison::lt),
        (">=", comparison::ge),
        ("<=", comparison::le),
        // Logic
        ("and", logic::and),
        ("or", logic::or),
        ("not", logic::not),
        // I/O and loading
        ("print", io::print),
        ("error", io::error),
        ("load", io::load),
    ];

    let mut e = env.borrow_mut();
    for (name, func) in table {
        e.put(name, &Value::Builtin(*func, name));
    }
}

#[cfg(test)]
pub(crate) fn test_env() -> EnvRef {
    use std::rc::Rc;
    let env = Rc::new(RefCell::new(crate::env::Environment::new()));
    register_builtins(&env);
    env
}
