use crate::ast::Ast;
use crate::error::EvalError;
use crate::value::{unescape, Value};

/// Turns a parsed `Ast` into a `Value`, per spec.md §4.3. Comments are
/// dropped; everything else maps one-to-one onto a `Value` variant.
pub fn read(node: &Ast) -> Value {
    match node {
        Ast::Number(text) => match text.parse::<i64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Error(EvalError::InvalidNumber.to_string()),
        },
        Ast::Str(raw) => Value::String(unescape(raw)),
        Ast::Symbol(s) => Value::Symbol(s.clone()),
        Ast::Comment(_) => Value::empty_sexpr(), // never reached: filtered out by read_seq
        Ast::SExpr(children) => Value::SExpr(read_seq(children)),
        Ast::QExpr(children) => Value::QExpr(read_seq(children)),
        Ast::Root(children) => Value::SExpr(read_seq(children)),
    }
}

/// Reads a program (the REPL's unit of input, or a file) into the ordered
/// list of its top-level expressions, dropping comments along the way.
pub fn read_program(root: &Ast) -> Vec<Value> {
    match root {
        Ast::Root(children) => read_seq(children),
        other => vec![read(other)],
    }
}

fn read_seq(children: &[Ast]) -> Vec<Value> {
    children
        .iter()
        .filter(|c| !matches!(c, Ast::Comment(_)))
        .map(read)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn read_one(src: &str) -> Value {
        let ast = parse(src).unwrap();
        read_program(&ast).into_iter().next().unwrap()
    }

    #[test]
    fn reads_numbers() {
        assert_eq!(read_one("42"), Value::Number(42));
        assert_eq!(read_one("-3"), Value::Number(-3));
    }

    #[test]
    fn invalid_number_becomes_an_error_value() {
        let ast = Ast::Number("99999999999999999999999999".into());
        assert_eq!(read(&ast), Value::Error("Invalid number.".into()));
    }

    #[test]
    fn reads_symbols_and_strings() {
        assert_eq!(read_one("+"), Value::Symbol("+".into()));
        assert_eq!(read_one("\"a\\nb\""), Value::String("a\nb".into()));
    }

    #[test]
    fn reads_sexpr_and_qexpr() {
        assert_eq!(
            read_one("(+ 1 2)"),
            Value::SExpr(vec![
                Value::Symbol("+".into()),
                Value::Number(1),
                Value::Number(2)
            ])
        );
        assert_eq!(
            read_one("{1 2}"),
            Value::QExpr(vec![Value::Number(1), Value::Number(2)])
        );
    }

    #[test]
    fn comments_are_dropped() {
        let ast = parse("1 ; ignored\n2").unwrap();
        assert_eq!(read_program(&ast), vec![Value::Number(1), Value::Number(2)]);
    }

    #[test]
    fn reader_round_trip_for_non_error_non_function_values() {
        for src in ["42", "\"hi\"", "sym", "(1 2 3)", "{1 2 3}"] {
            let v = read_one(src);
            let printed = v.to_string();
            let reparsed = read_one(&printed);
            assert_eq!(v, reparsed);
        }
    }
}
