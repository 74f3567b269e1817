//! Banner and prompt text for the REPL (C0e), kept as named constants the way
//! `TrevorS-lisp-llm-sandbox/src/config.rs` separates user-facing copy from
//! the code that prints it.

pub const VERSION: &str = "0.0.1.0";

pub const WELCOME_BANNER: &str = "Welcome to Lispi 0.0.1.0";
pub const EXIT_HINT: &str = "Press Ctrl+C to exit!";
pub const PROMPT: &str = "Lispi> ";
