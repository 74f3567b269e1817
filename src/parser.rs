use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::ast::Ast;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Unexpected '{0}'")]
    UnexpectedChar(char),
    #[error("Unmatched '('")]
    UnmatchedParen,
    #[error("Unmatched '{{'")]
    UnmatchedBrace,
    #[error("Unterminated string literal")]
    UnterminatedString,
}

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen,
    RParen,
    LBrace,
    RBrace,
    Number(String),
    Symbol(String),
    Str(String),
    Comment(String),
}

const OPERATOR_CHARS: &str = "+-*/\\=<>!%^&_";

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || OPERATOR_CHARS.contains(c)
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars: Peekable<Chars> = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            '{' => {
                tokens.push(Token::LBrace);
                chars.next();
            }
            '}' => {
                tokens.push(Token::RBrace);
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            ';' => {
                let mut text = String::new();
                chars.next();
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                    text.push(c);
                }
                tokens.push(Token::Comment(text));
            }
            '"' => {
                chars.next();
                let mut raw = String::new();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    raw.push(c);
                    if c == '\\' {
                        if let Some(escaped) = chars.next() {
                            raw.push(escaped);
                        }
                    }
                }
                if !closed {
                    return Err(ParseError::UnterminatedString);
                }
                tokens.push(Token::Str(raw));
            }
            c if c == '-' || c.is_ascii_digit() => {
                let mut text = String::new();
                text.push(c);
                chars.next();
                let is_number = c.is_ascii_digit()
                    || matches!(chars.peek(), Some(n) if n.is_ascii_digit());
                if is_number {
                    while let Some(&n) = chars.peek() {
                        if n.is_ascii_digit() {
                            text.push(n);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                }
                // A lone "-" (or a number directly glued to further operator
                // characters, e.g. "-foo") is a Symbol, not a malformed Number.
                while let Some(&n) = chars.peek() {
                    if is_symbol_char(n) {
                        text.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if is_number && text.chars().skip(1).all(|c| c.is_ascii_digit()) {
                    tokens.push(Token::Number(text));
                } else {
                    tokens.push(Token::Symbol(text));
                }
            }
            c if is_symbol_char(c) => {
                let mut text = String::new();
                while let Some(&n) = chars.peek() {
                    if is_symbol_char(n) {
                        text.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Symbol(text));
            }
            other => return Err(ParseError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: Peekable<std::slice::Iter<'a, Token>>,
}

impl<'a> Parser<'a> {
    fn parse_expr(&mut self) -> Result<Ast> {
        match self.tokens.next().ok_or(ParseError::UnexpectedEof)? {
            Token::LParen => self.parse_seq(Token::RParen).map(Ast::SExpr),
            Token::LBrace => self.parse_seq(Token::RBrace).map(Ast::QExpr),
            Token::RParen => Err(ParseError::UnmatchedParen),
            Token::RBrace => Err(ParseError::UnmatchedBrace),
            Token::Number(s) => Ok(Ast::Number(s.clone())),
            Token::Symbol(s) => Ok(Ast::Symbol(s.clone())),
            Token::Str(s) => Ok(Ast::Str(s.clone())),
            Token::Comment(s) => Ok(Ast::Comment(s.clone())),
        }
    }

    fn parse_seq(&mut self, closing: Token) -> Result<Vec<Ast>> {
        let mut items = Vec::new();
        loop {
            match self.tokens.peek() {
                Some(tok) if **tok == closing => {
                    self.tokens.next();
                    return Ok(items);
                }
                Some(_) => items.push(self.parse_expr()?),
                None => {
                    return Err(if closing == Token::RParen {
                        ParseError::UnmatchedParen
                    } else {
                        ParseError::UnmatchedBrace
                    });
                }
            }
        }
    }
}

/// Parses a complete program (the REPL's unit of input, or a whole file) into
/// a `Root` node holding every top-level expression in source order.
pub fn parse(input: &str) -> Result<Ast> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: tokens.iter().peekable(),
    };
    let mut items = Vec::new();
    while parser.tokens.peek().is_some() {
        items.push(parser.parse_expr()?);
    }
    Ok(Ast::Root(items))
}
