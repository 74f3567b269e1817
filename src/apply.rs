use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::value::{EnvRef, Value};

/// Binds `args` (already evaluated) against `f`'s formals and either invokes
/// the body or returns a partially-applied copy, per spec.md §4.5. Infallible
/// by contract: failure is returned as `Value::Error`, not a Rust exception.
pub fn apply(env: &EnvRef, f: Value, args: Vec<Value>) -> Value {
    match f {
        Value::Builtin(func, _name) => match func(Rc::clone(env), args) {
            Ok(v) => v,
            Err(e) => e.into(),
        },
        Value::Lambda {
            mut formals,
            body,
            env: call_env,
        } => apply_lambda(env, &mut formals, body, call_env, args),
        other => EvalError::NotAFunction {
            got: other.type_name(),
        }
        .into(),
    }
}

fn apply_lambda(
    caller_env: &EnvRef,
    formals: &mut Vec<String>,
    body: Box<Value>,
    call_env: EnvRef,
    mut args: Vec<Value>,
) -> Value {
    let given = args.len();
    let total = formals.len();
    let mut args_iter = args.drain(..).peekable();

    while args_iter.peek().is_some() {
        if formals.is_empty() {
            return EvalError::TooManyArguments {
                given,
                expected: total,
            }
            .into();
        }
        let param = formals.remove(0);

        if param == "&" {
            if formals.len() != 1 {
                return EvalError::MalformedVariadicFormal.into();
            }
            let collector = formals.remove(0);
            let rest: Vec<Value> = args_iter.collect();
            call_env.borrow_mut().put(&collector, &Value::QExpr(rest));
            break;
        }

        let value = args_iter.next().expect("checked non-empty above");
        call_env.borrow_mut().put(&param, &value);
    }

    if formals.first().map(String::as_str) == Some("&") {
        if formals.len() != 2 {
            return EvalError::MalformedVariadicBinding.into();
        }
        let collector = formals[1].clone();
        call_env.borrow_mut().put(&collector, &Value::empty_qexpr());
        formals.clear();
    }

    if formals.is_empty() {
        call_env.borrow_mut().set_parent(Rc::clone(caller_env));
        eval(&call_env, (*body).clone())
    } else {
        Value::Lambda {
            formals: formals.clone(),
            body,
            env: Rc::new(RefCell::new(call_env.borrow().copy())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;

    fn root_env() -> EnvRef {
        let env = Rc::new(RefCell::new(Environment::new()));
        register_builtins(&env);
        env
    }

    fn lambda(formals: &[&str], body: Value, env: &EnvRef) -> Value {
        Value::Lambda {
            formals: formals.iter().map(|s| s.to_string()).collect(),
            body: Box::new(body),
            env: Rc::new(RefCell::new(Environment::child_of(Rc::clone(env)))),
        }
    }

    #[test]
    fn full_application_evaluates_the_body() {
        let env = root_env();
        let body = Value::SExpr(vec![
            Value::Symbol("+".into()),
            Value::Symbol("x".into()),
            Value::Symbol("y".into()),
        ]);
        let f = lambda(&["x", "y"], body, &env);
        let result = apply(&env, f, vec![Value::Number(10), Value::Number(20)]);
        assert_eq!(result, Value::Number(30));
    }

    #[test]
    fn partial_application_returns_a_fresh_lambda() {
        let env = root_env();
        let body = Value::SExpr(vec![
            Value::Symbol("+".into()),
            Value::Symbol("x".into()),
            Value::Symbol("y".into()),
        ]);
        let f = lambda(&["x", "y"], body, &env);
        let partial = apply(&env, f, vec![Value::Number(10)]);
        match partial {
            Value::Lambda { formals, .. } => assert_eq!(formals, vec!["y".to_string()]),
            other => panic!("expected a Lambda, got {other}"),
        }
    }

    #[test]
    fn variadic_marker_collects_remaining_arguments() {
        let env = root_env();
        let body = Value::Symbol("xs".into());
        let f = lambda(&["&", "xs"], body, &env);
        let result = apply(&env, f.clone(), vec![Value::Number(1), Value::Number(2)]);
        assert_eq!(result, Value::QExpr(vec![Value::Number(1), Value::Number(2)]));

        let empty = apply(&env, f, vec![]);
        assert_eq!(empty, Value::QExpr(vec![]));
    }

    #[test]
    fn too_many_arguments_is_an_error() {
        let env = root_env();
        let f = lambda(&["x"], Value::Symbol("x".into()), &env);
        let result = apply(&env, f, vec![Value::Number(1), Value::Number(2)]);
        assert_eq!(
            result,
            Value::Error(
                EvalError::TooManyArguments {
                    given: 2,
                    expected: 1
                }
                .to_string()
            )
        );
    }

    #[test]
    fn non_function_head_is_an_error() {
        let env = root_env();
        let result = apply(&env, Value::Number(5), vec![]);
        assert_eq!(
            result,
            Value::Error(EvalError::NotAFunction { got: "Number" }.to_string())
        );
    }
}
