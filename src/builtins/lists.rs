use crate::error::Result;
use crate::eval::eval;
use crate::value::{EnvRef, Value};

use super::{check_arity, require_not_empty, require_qexpr};

/// `list` wraps its (already-evaluated) arguments into a Q-Expression.
pub fn list(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    Ok(Value::QExpr(args))
}

/// `head` returns a single-element Q-Expression holding the first child.
pub fn head(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    check_arity("head", &args, 1)?;
    let items = require_qexpr("head", &args, 0)?;
    require_not_empty("head", 0, items)?;
    Ok(Value::QExpr(vec![items[0].clone()]))
}

/// `tail` drops the first child, keeping the rest.
pub fn tail(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    check_arity("tail", &args, 1)?;
    let items = require_qexpr("tail", &args, 0)?;
    require_not_empty("tail", 0, items)?;
    Ok(Value::QExpr(items[1..].to_vec()))
}

/// `join` concatenates the children of every Q-Expression argument, in
/// order. Zero arguments is not an arity error; it yields an empty
/// Q-Expression, matching the fold-starting-from-nothing reading of
/// spec.md §4.6 rather than requiring at least one list.
pub fn join(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    let mut joined = Vec::new();
    for (i, _) in args.iter().enumerate() {
        let items = require_qexpr("join", &args, i)?;
        joined.extend_from_slice(items);
    }
    Ok(Value::QExpr(joined))
}

/// `eval` retags a Q-Expression as an S-Expression and evaluates it.
pub fn eval_builtin(env: EnvRef, args: Vec<Value>) -> Result<Value> {
    check_arity("eval", &args, 1)?;
    let items = require_qexpr("eval", &args, 0)?.to_vec();
    Ok(eval(&env, Value::SExpr(items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_env;

    fn q(nums: &[i64]) -> Value {
        Value::QExpr(nums.iter().map(|&n| Value::Number(n)).collect())
    }

    #[test]
    fn list_wraps_arguments() {
        assert_eq!(
            list(test_env(), vec![Value::Number(1), Value::Number(2)]).unwrap(),
            q(&[1, 2])
        );
    }

    #[test]
    fn head_returns_first_element_wrapped() {
        assert_eq!(head(test_env(), vec![q(&[1, 2, 3])]).unwrap(), q(&[1]));
    }

    #[test]
    fn tail_drops_first_element() {
        assert_eq!(tail(test_env(), vec![q(&[1, 2, 3])]).unwrap(), q(&[2, 3]));
    }

    #[test]
    fn head_of_empty_list_is_an_error() {
        assert!(head(test_env(), vec![q(&[])]).is_err());
    }

    #[test]
    fn join_concatenates_all_lists() {
        assert_eq!(
            join(test_env(), vec![q(&[1, 2]), q(&[3])]).unwrap(),
            q(&[1, 2, 3])
        );
    }

    #[test]
    fn join_with_no_arguments_is_empty() {
        assert_eq!(join(test_env(), vec![]).unwrap(), q(&[]));
    }

    #[test]
    fn eval_runs_a_quoted_expression() {
        let env = test_env();
        let plus = Value::Symbol("+".into());
        let body = Value::QExpr(vec![plus, Value::Number(1), Value::Number(2)]);
        assert_eq!(eval_builtin(env, vec![body]).unwrap(), Value::Number(3));
    }
}
