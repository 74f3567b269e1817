use std::fs;

use crate::env::Environment;
use crate::error::{EvalError, Result};
use crate::eval::eval;
use crate::value::{EnvRef, Value};

use super::check_arity;

/// `print` writes its arguments space-separated followed by a newline and
/// always succeeds with an empty S-Expression, matching the original's
/// `puts`-then-`lval_sexpr` return.
pub fn print(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
    println!("{}", rendered.join(" "));
    Ok(Value::empty_sexpr())
}

/// `error` builds an Error value out of a user-supplied String. It is a
/// completely ordinary builtin call, not a Rust panic or an early return
/// from the evaluator; the Error it makes only propagates because
/// `eval_sexpr` treats any Error child as contagious.
pub fn error(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    check_arity("error", &args, 1)?;
    match &args[0] {
        Value::String(s) => Err(EvalError::User(s.clone())),
        _ => Err(super::type_error("error", &args, 0, "String")),
    }
}

/// `load` reads a file, parses it as a full program, and evaluates each
/// top-level expression in the global environment in order. A per-expression
/// evaluation error is printed and skipped, not propagated; only a parse
/// failure on the file itself is a load error.
pub fn load(env: EnvRef, args: Vec<Value>) -> Result<Value> {
    check_arity("load", &args, 1)?;
    let path = match &args[0] {
        Value::String(s) => s,
        _ => return Err(super::type_error("load", &args, 0, "String")),
    };

    let contents = fs::read_to_string(path).map_err(|e| EvalError::LoadFailed(format!("{path}: {e}")))?;
    let ast = crate::parser::parse(&contents).map_err(|e| EvalError::LoadFailed(format!("{path}: {e}")))?;
    let exprs = crate::reader::read_program(&ast);

    let root = Environment::root(&env);
    for expr in exprs {
        let result = eval(&root, expr);
        if result.is_error() {
            println!("{result}");
        }
    }
    Ok(Value::empty_sexpr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_env;

    #[test]
    fn print_returns_an_empty_sexpr() {
        let result = print(test_env(), vec![Value::Number(1), Value::String("x".into())]).unwrap();
        assert_eq!(result, Value::empty_sexpr());
    }

    #[test]
    fn error_builds_an_error_value_once_folded() {
        let result = error(test_env(), vec![Value::String("boom".into())]);
        assert_eq!(result, Err(EvalError::User("boom".into())));
        let folded: Value = result.unwrap_err().into();
        assert_eq!(folded, Value::Error("boom".into()));
    }

    #[test]
    fn load_of_a_missing_file_is_an_error() {
        let result = load(test_env(), vec![Value::String("/no/such/file.lispi".into())]);
        assert!(result.is_err());
    }
}
