use crate::apply::apply;
use crate::error::EvalError;
use crate::value::{EnvRef, Value};

/// Evaluates a `Value` in `env`. This language has no syntactic special
/// forms: `if`, `def`, `=`, and `\` are ordinary builtins reached through the
/// same symbol-lookup-then-apply path as `+`. `if` "looks like" control flow
/// only because its branch arguments arrive as inert QExprs that it retags
/// and evaluates itself (see `builtins::control`).
pub fn eval(env: &EnvRef, v: Value) -> Value {
    match v {
        Value::Symbol(s) => match env.borrow().lookup(&s) {
            Ok(v) => v,
            Err(e) => e.into(),
        },
        Value::SExpr(items) => eval_sexpr(env, items),
        other => other,
    }
}

/// Implements spec.md §4.4: every child is evaluated to completion, in
/// order, before the result is scanned for the first Error. This is
/// deliberately not short-circuit-on-first-error — side effects from later
/// children (a `print` after a failing sibling, say) still happen.
fn eval_sexpr(env: &EnvRef, items: Vec<Value>) -> Value {
    let evaluated: Vec<Value> = items.into_iter().map(|child| eval(env, child)).collect();

    if let Some(err) = evaluated.iter().find(|v| v.is_error()) {
        return err.clone();
    }

    let mut evaluated = evaluated;
    match evaluated.len() {
        0 => Value::empty_sexpr(),
        1 => evaluated.remove(0),
        _ => {
            let head = evaluated.remove(0);
            if !matches!(head, Value::Builtin(..) | Value::Lambda { .. }) {
                return EvalError::NotAFunction {
                    got: head.type_name(),
                }
                .into();
            }
            apply(env, head, evaluated)
        }
    }
}
