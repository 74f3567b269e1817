use crate::error::{EvalError, Result};
use crate::value::{EnvRef, Value};

use super::type_error;

fn as_bool(name: &str, args: &[Value], index: usize) -> Result<bool> {
    match args[index] {
        Value::Number(n) => Ok(n != 0),
        _ => Err(type_error(name, args, index, "Number")),
    }
}

fn bool_value(b: bool) -> Value {
    Value::Number(if b { 1 } else { 0 })
}

/// `and`/`or` each take exactly two Numbers, treating nonzero as true.
pub fn and(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    arity2("and", &args)?;
    Ok(bool_value(as_bool("and", &args, 0)? && as_bool("and", &args, 1)?))
}

pub fn or(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    arity2("or", &args)?;
    Ok(bool_value(as_bool("or", &args, 0)? || as_bool("or", &args, 1)?))
}

/// `not` takes exactly one Number; its arity is independent of `and`/`or`,
/// not a shared/inverted dispatch.
pub fn not(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    if args.len() != 1 {
        return Err(EvalError::Arity {
            name: "not".to_string(),
            got: args.len(),
            expected: 1,
        });
    }
    Ok(bool_value(!as_bool("not", &args, 0)?))
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
