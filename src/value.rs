use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use lazy_static::lazy_static;

use crate::env::Environment;
use crate::error::Result;

/// Reference to a live environment, shared by every closure that captured it.
pub type EnvRef = Rc<RefCell<Environment>>;

/// Signature every host-implemented operation must have. Builtins use
/// `Result` internally for ergonomic early return with `?`; the evaluator
/// folds a returned `Err` into a `Value::Error` the moment it crosses back
/// into the evaluation loop (see `error.rs`).
pub type BuiltinFn = fn(EnvRef, Vec<Value>) -> Result<Value>;

lazy_static! {
    /// Two-character escape sequences used by both the string reader (to
    /// unescape literals) and the printer (to escape them back out).
    static ref ESCAPE_DECODE: HashMap<char, char> = {
        let mut m = HashMap::new();
        m.insert('"', '"');
        m.insert('\\', '\\');
        m.insert('n', '\n');
        m.insert('t', '\t');
        m.insert('r', '\r');
        m.insert('0', '\0');
        m
    };
    static ref ESCAPE_ENCODE: HashMap<char, char> = {
        ESCAPE_DECODE.iter().map(|(&k, &v)| (v, k)).collect()
    };
}

pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => match ESCAPE_DECODE.get(&escaped) {
                    Some(&decoded) => out.push(decoded),
                    None => out.push(escaped),
                },
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match ESCAPE_ENCODE.get(&c) {
            Some(&code) => {
                out.push('\\');
                out.push(code);
            }
            None => out.push(c),
        }
    }
    out
}

#[derive(Clone, Debug)]
pub enum Value {
    Number(i64),
    Error(String),
    Symbol(String),
    String(String),
    SExpr(Vec<Value>),
    QExpr(Vec<Value>),
    Builtin(BuiltinFn, &'static str),
    Lambda {
        formals: Vec<String>,
        body: Box<Value>,
        env: EnvRef,
    },
}

impl Value {
    pub fn empty_sexpr() -> Value {
        Value::SExpr(Vec::new())
    }

    pub fn empty_qexpr() -> Value {
        Value::QExpr(Vec::new())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// The type names quoted in builtin diagnostics (spec.md §7). "Operator"
    /// is the name a Symbol is known by in error text, not "Symbol".
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Error(_) => "Error",
            Value::Symbol(_) => "Operator",
            Value::String(_) => "String",
            Value::SExpr(_) => "S-Expression",
            Value::QExpr(_) => "Q-Expression",
            Value::Builtin(..) | Value::Lambda { .. } => "Function",
        }
    }

    /// Produces a value structurally equal to `self` that shares no mutable
    /// substructure with it. A Lambda's captured environment is copied via
    /// `Environment::copy`, which deep-copies bindings but keeps the parent
    /// link a shared reference, matching spec.md §3 invariant 1.
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Number(n) => Value::Number(*n),
            Value::Error(s) => Value::Error(s.clone()),
            Value::Symbol(s) => Value::Symbol(s.clone()),
            Value::String(s) => Value::String(s.clone()),
            Value::SExpr(items) => Value::SExpr(items.iter().map(Value::deep_copy).collect()),
            Value::QExpr(items) => Value::QExpr(items.iter().map(Value::deep_copy).collect()),
            Value::Builtin(f, name) => Value::Builtin(*f, name),
            Value::Lambda { formals, body, env } => Value::Lambda {
                formals: formals.clone(),
                body: Box::new(body.deep_copy()),
                env: Rc::new(RefCell::new(env.borrow().copy())),
            },
        }
    }

    /// Retags a list's children under the other container variant, used by
    /// `list` (QExpr from SExpr args) and `eval` (SExpr from a QExpr).
    pub fn retag_sexpr(self) -> Value {
        match self {
            Value::QExpr(items) | Value::SExpr(items) => Value::SExpr(items),
            other => other,
        }
    }

    pub fn retag_qexpr(self) -> Value {
        match self {
            Value::QExpr(items) | Value::SExpr(items) => Value::QExpr(items),
            other => other,
        }
    }
}

impl PartialEq for Value {
    /// Structural equality per spec.md §4.1: different variants are never
    /// equal, including SExpr vs QExpr with identical children. Builtins
    /// compare by function-pointer identity; Lambdas compare formals and
    /// body only, ignoring the captured environment.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::SExpr(a), Value::SExpr(b)) => a == b,
            (Value::QExpr(a), Value::QExpr(b)) => a == b,
            (Value::Builtin(f1, _), Value::Builtin(f2, _)) => f1 == f2,
            (
                Value::Lambda {
                    formals: f1,
                    body: b1,
                    ..
                },
                Value::Lambda {
                    formals: f2,
                    body: b2,
                    ..
                },
            ) => f1 == f2 && b1 == b2,
            _ => false,
        }
    }
}

fn fmt_list(f: &mut fmt::Formatter<'_>, open: char, close: char, items: &[Value]) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::String(s) => write!(f, "\"{}\"", escape(s)),
            Value::Error(msg) => write!(f, "Error: {msg}"),
            Value::SExpr(items) => fmt_list(f, '(', ')', items),
            Value::QExpr(items) => fmt_list(f, '{', '}', items),
            Value::Builtin(..) => write!(f, "<builtin>"),
            Value::Lambda { formals, body, .. } => {
                write!(f, "(\\ {{")?;
                for (i, p) in formals.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, "}} {body})")
            }
        }
    }
}
