use crate::eval::eval;
use crate::error::Result;
use crate::value::{EnvRef, Value};

use super::{check_arity, require_qexpr};

/// `if cond {then} {else}`: `cond` must already be a Number (nonzero is
/// true); both branches must be Q-Expressions, received inert and retagged
/// to an S-Expression only once chosen. This is the only place a branch's
/// evaluation is conditional on another value, and it happens entirely
/// inside this ordinary builtin, not in the evaluator.
pub fn if_builtin(env: EnvRef, args: Vec<Value>) -> Result<Value> {
    check_arity("if", &args, 3)?;
    let cond = match &args[0] {
        Value::Number(n) => *n != 0,
        _ => return Err(super::type_error("if", &args, 0, "Number")),
    };

    require_qexpr("if", &args, 1)?;
    require_qexpr("if", &args, 2)?;

    let branch_index = if cond { 1 } else { 2 };
    let branch = require_qexpr("if", &args, branch_index)?.to_vec();
    Ok(eval(&env, Value::SExpr(branch)))
}
