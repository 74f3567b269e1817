use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Environment;
use crate::error::{EvalError, Result};
use crate::value::{EnvRef, Value};

use super::{check_arity, require_qexpr};

/// `\` (lambda): `{formals} body` builds a closure. Its environment starts
/// parentless; the parent is wired at call time by the applier (see
/// `apply::apply_lambda`), never at construction here. Every formal must be
/// a Symbol; `&` is a formal too, it just gets special handling at call time.
pub fn lambda(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    check_arity("\\", &args, 2)?;
    let formal_items = require_qexpr("\\", &args, 0)?;

    let mut formals = Vec::with_capacity(formal_items.len());
    for item in formal_items {
        match item {
            Value::Symbol(s) => formals.push(s.clone()),
            other => {
                return Err(EvalError::WrongType {
                    name: "\\".to_string(),
                    index: 0,
                    got: other.type_name(),
                    expected: "Operator",
                })
            }
        }
    }

    Ok(Value::Lambda {
        formals,
        body: Box::new(args[1].clone()),
        env: Rc::new(RefCell::new(Environment::new())),
    })
}

/// `def {a b} 1 2` binds globally; `=` binds in the calling scope. Both
/// require the first argument to be a Q-Expression of Symbols and the
/// remaining argument count to match its length exactly.
pub fn def(env: EnvRef, args: Vec<Value>) -> Result<Value> {
    bind("def", &env, args, |env, sym, value| Environment::def(env, sym, value))
}

pub fn put(env: EnvRef, args: Vec<Value>) -> Result<Value> {
    bind("=", &env, args, |env, sym, value| env.borrow_mut().put(sym, value))
}

fn bind(name: &str, env: &EnvRef, args: Vec<Value>, assign: fn(&EnvRef, &str, &Value)) -> Result<Value> {
    if args.is_empty() {
        return Err(EvalError::Arity {
            name: name.to_string(),
            got: 0,
            expected: 1,
        });
    }
    let symbol_items = require_qexpr(name, &args, 0)?;

    let mut symbols = Vec::with_capacity(symbol_items.len());
    for item in symbol_items {
        match item {
            Value::Symbol(s) => symbols.push(s.clone()),
            other => {
                return Err(EvalError::NonOperatorBinding {
                    name: name.to_string(),
                    got: other.type_name(),
                })
            }
        }
    }

    let values = &args[1..];
    if values.len() != symbols.len() {
        return Err(EvalError::BindingCountMismatch {
            name: name.to_string(),
            got: values.len(),
            expected: symbols.len(),
        });
    }

    for (sym, value) in symbols.iter().zip(values) {
        assign(env, sym, value);
    }
    Ok(Value::empty_sexpr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_env;

    fn q_syms(names: &[&str]) -> Value {
        Value::QExpr(names.iter().map(|s| Value::Symbol(s.to_string())).collect())
    }

    #[test]
    fn lambda_builds_a_closure_with_given_formals() {
        let env = test_env();
        let body = Value::Symbol("x".into());
        let result = lambda(Rc::clone(&env), vec![q_syms(&["x"]), body]).unwrap();
        match result {
            Value::Lambda { formals, .. } => assert_eq!(formals, vec!["x".to_string()]),
            other => panic!("expected Lambda, got {other}"),
        }
    }

    #[test]
    fn lambda_closure_environment_starts_without_a_parent() {
        let env = test_env();
        let body = Value::Symbol("x".into());
        let result = lambda(env, vec![q_syms(&["x"]), body]).unwrap();
        match result {
            Value::Lambda { env, .. } => assert!(env.borrow().parent().is_none()),
            other => panic!("expected Lambda, got {other}"),
        }
    }

    #[test]
    fn lambda_rejects_non_symbol_formals() {
        let env = test_env();
        let formals = Value::QExpr(vec![Value::Number(1)]);
        let result = lambda(env, vec![formals, Value::Number(0)]);
        assert!(result.is_err());
    }

    #[test]
    fn def_binds_globally_and_returns_empty_sexpr() {
        let env = test_env();
        let result = def(Rc::clone(&env), vec![q_syms(&["a", "b"]), Value::Number(1), Value::Number(2)]).unwrap();
        assert_eq!(result, Value::empty_sexpr());
        assert_eq!(env.borrow().lookup("a").unwrap(), Value::Number(1));
        assert_eq!(env.borrow().lookup("b").unwrap(), Value::Number(2));
    }

    #[test]
    fn mismatched_binding_counts_are_an_error() {
        let env = test_env();
        let result = def(env, vec![q_syms(&["a", "b"]), Value::Number(1)]);
        assert_eq!(
            result,
            Err(EvalError::BindingCountMismatch {
                name: "def".into(),
                got: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn non_symbol_in_binding_list_is_an_error() {
        let env = test_env();
        let targets = Value::QExpr(vec![Value::Number(1)]);
        let result = def(env, vec![targets, Value::Number(0)]);
        assert_eq!(
            result,
            Err(EvalError::NonOperatorBinding {
                name: "def".into(),
                got: "Number"
            })
        );
    }
}
