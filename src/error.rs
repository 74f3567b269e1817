use thiserror::Error;

use crate::value::Value;

/// Every diagnostic text here is quoted verbatim by the language's test
/// scenarios, so the `#[error(...)]` strings are load-bearing, not cosmetic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Invalid number.")]
    InvalidNumber,

    #[error("Unbound operator '{0}'!")]
    UnboundSymbol(String),

    #[error("S-Expression starts with incorrect type! Got {got}, Expected Function.")]
    NotAFunction { got: &'static str },

    #[error("Function passed too many arguments! Got {given}, Expected {expected}.")]
    TooManyArguments { given: usize, expected: usize },

    #[error("Function formal invalid! Operator '&' not followed by a single operator.")]
    MalformedVariadicFormal,

    #[error("Function format invalid! Symbol '&' no followed by a single symbol.")]
    MalformedVariadicBinding,

    #[error("Function '{name}' passed incorrect number of arguments. Got {got}, Expected {expected}.")]
    Arity {
        name: String,
        got: usize,
        expected: usize,
    },

    #[error("Function '{name}' passed incorrect type for argument {index}. Got {got}, Expected {expected}.")]
    WrongType {
        name: String,
        index: usize,
        got: &'static str,
        expected: &'static str,
    },

    #[error("Function '{name}' passed {{}} for argument {index}.")]
    EmptyArgument { name: String, index: usize },

    #[error("Division By Zero!")]
    DivisionByZero,

    #[error("Function '{name}' arithmetic overflow!")]
    ArithmeticOverflow { name: String },

    #[error("Function '{name}' cannot define non-operator! Got {got}, Expected Operator.")]
    NonOperatorBinding { name: String, got: &'static str },

    #[error("Function '{name}' passed too many arguments for operators! Got {got}, Expected {expected}.")]
    BindingCountMismatch {
        name: String,
        got: usize,
        expected: usize,
    },

    #[error("Could not load Library {0}")]
    LoadFailed(String),

    /// Produced by the `error` builtin, whose message is user-supplied.
    #[error("{0}")]
    User(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;

/// The single conversion point from Rust's `Result` error channel back into
/// the language's "errors are values" model: once an `EvalError` reaches an
/// evaluation boundary it becomes an ordinary `Value::Error`, never a
/// propagating exception.
impl From<EvalError> for Value {
    fn from(err: EvalError) -> Value {
        Value::Error(err.to_string())
    }
}
