use crate::error::{EvalError, Result};
use crate::value::{EnvRef, Value};

use super::type_error;

fn as_number(name: &str, args: &[Value], index: usize) -> Result<i64> {
    match args[index] {
        Value::Number(n) => Ok(n),
        _ => Err(type_error(name, args, index, "Number")),
    }
}

fn overflow(name: &str) -> EvalError {
    EvalError::ArithmeticOverflow { name: name.to_string() }
}

/// Shared fold for `+ - * / % ^ min max`, matching the original `builtin_op`
/// which dispatches on the operator string rather than having eight
/// near-identical copies of the arity/type-check boilerplate. `f` uses
/// checked arithmetic throughout so an overflowing operand pair becomes an
/// `ArithmeticOverflow` error value instead of a panic.
fn fold(name: &str, args: Vec<Value>, unary: Option<fn(&str, i64) -> Result<i64>>, f: fn(&str, i64, i64) -> Result<i64>) -> Result<Value> {
    for (i, _) in args.iter().enumerate() {
        as_number(name, &args, i)?;
    }
    let mut numbers = args.into_iter().map(|v| match v {
        Value::Number(n) => n,
        _ => unreachable!("checked above"),
    });

    let mut acc = numbers.next().ok_or_else(|| EvalError::Arity {
        name: name.to_string(),
        got: 0,
        expected: 1,
    })?;

    let mut any_more = false;
    for n in numbers {
        any_more = true;
        acc = f(name, acc, n)?;
    }
    if !any_more {
        if let Some(unary) = unary {
            acc = unary(name, acc)?;
        }
    }
    Ok(Value::Number(acc))
}

pub fn add(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    fold("+", args, None, |name, a, b| a.checked_add(b).ok_or_else(|| overflow(name)))
}

pub fn sub(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    fold(
        "-",
        args,
        Some(|name, a| a.checked_neg().ok_or_else(|| overflow(name))),
        |name, a, b| a.checked_sub(b).ok_or_else(|| overflow(name)),
    )
}

pub fn mul(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    fold("*", args, None, |name, a, b| a.checked_mul(b).ok_or_else(|| overflow(name)))
}

pub fn div(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    fold("/", args, None, |name, a, b| {
        if b == 0 {
            Err(EvalError::DivisionByZero)
        } else {
            a.checked_div(b).ok_or_else(|| overflow(name))
        }
    })
}

pub fn rem(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    fold("%", args, None, |name, a, b| {
        if b == 0 {
            Err(EvalError::DivisionByZero)
        } else {
            a.checked_rem(b).ok_or_else(|| overflow(name))
        }
    })
}

pub fn pow(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    fold("^", args, None, |name, a, b| {
        let exponent: u32 = b.max(0).try_into().map_err(|_| overflow(name))?;
        a.checked_pow(exponent).ok_or_else(|| overflow(name))
    })
}

pub fn min(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    fold("min", args, None, |_name, a, b| Ok(a.min(b)))
}

pub fn max(_env: EnvRef, args: Vec<Value>) -> Result<Value> {
    fold("max", args, None, |_name, a, b| Ok(a.max(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_env;

    fn call(f: crate::value::BuiltinFn, args: Vec<Value>) -> Value {
        f(test_env(), args).unwrap_or_else(Into::into)
    }

    #[test]
    fn add_sums_all_operands() {
        assert_eq!(
            call(add, vec![Value::Number(1), Value::Number(2), Value::Number(3)]),
            Value::Number(6)
        );
    }

    #[test]
    fn unary_sub_negates() {
        assert_eq!(call(sub, vec![Value::Number(10)]), Value::Number(-10));
    }

    #[test]
    fn binary_sub_subtracts_left_to_right() {
        assert_eq!(
            call(sub, vec![Value::Number(10), Value::Number(3), Value::Number(2)]),
            Value::Number(5)
        );
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(
            call(div, vec![Value::Number(10), Value::Number(0)]),
            Value::Error(EvalError::DivisionByZero.to_string())
        );
    }

    #[test]
    fn power_is_integer_exponentiation() {
        assert_eq!(call(pow, vec![Value::Number(2), Value::Number(10)]), Value::Number(1024));
    }

    #[test]
    fn overflowing_addition_is_an_error_not_a_panic() {
        assert_eq!(
            call(add, vec![Value::Number(i64::MAX), Value::Number(1)]),
            Value::Error(EvalError::ArithmeticOverflow { name: "+".into() }.to_string())
        );
    }

    #[test]
    fn overflowing_power_is_an_error_not_a_panic() {
        assert_eq!(
            call(pow, vec![Value::Number(10), Value::Number(20)]),
            Value::Error(EvalError::ArithmeticOverflow { name: "^".into() }.to_string())
        );
    }

    #[test]
    fn minimum_divided_by_negative_one_is_an_error_not_a_panic() {
        assert_eq!(
            call(div, vec![Value::Number(i64::MIN), Value::Number(-1)]),
            Value::Error(EvalError::ArithmeticOverflow { name: "/".into() }.to_string())
        );
    }

    #[test]
    fn minimum_remainder_negative_one_is_an_error_not_a_panic() {
        assert_eq!(
            call(rem, vec![Value::Number(i64::MIN), Value::Number(-1)]),
            Value::Error(EvalError::ArithmeticOverflow { name: "%".into() }.to_string())
        );
    }

    #[test]
    fn wrong_type_operand_is_an_error() {
        let result = call(add, vec![Value::Number(1), Value::String("x".into())]);
        assert_eq!(
            result,
            Value::Error(
                EvalError::WrongType {
                    name: "+".into(),
                    index: 1,
                    got: "String",
                    expected: "Number"
                }
                .to_string()
            )
        );
    }
}
