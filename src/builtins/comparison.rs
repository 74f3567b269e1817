use crate::error::{EvalError, Result};
use crate::value::{EnvRef, Value};

use super::type_error;

/// `==`/`!=` compare any two Values with full structural equality
/// (spec.md §4.1); different variants are simply unequal, never an error.
pub fn eq(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    arity2("==", &args)?;
    Ok(bool_value(args[0] == args[1]))
}

pub fn ne(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    arity2("!=", &args)?;
    Ok(bool_value(args[0] != args[1]))
}

pub fn gt(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    order(">", args, |a, b| a > b)
}

pub fn lt(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    order("<", args, |a, b| a < b)
}

pub fn ge(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    order(">=", args, |a, b| a >= b)
}

pub fn le(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    order("<=", args, |a, b| a <= b)
}

fn order(name: &str, args: Vec<Value>, cmp: fn(i64, i64) -> bool) -> Result<Value> {
    arity2(name, &args)?;
    let a = match args[0] {
        Value::Number(n) => n,
        _ => return Err(type_error(name, &args, 0, "Number")),
    };
    let b = match args[1] {
        Value::Number(n) => n,
        _ => return Err(type_error(name, &args, 1, "Number")),
    };
    Ok(bool_value(cmp(a, b)))
}

fn arity2(name: &str, args: &[Value]) -> Result<()> {
    if args.len() != 2 {
        return Err(EvalError::Arity {
            name: name.to_string(),
            got: args.len(),
            expected: 2,
        });
    }
    Ok(())
}

fn bool_value(b: bool) -> Value {
    Value::Number(if b { 1 } else { 0 })
}
