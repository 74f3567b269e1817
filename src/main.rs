use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use lispi::config;
use lispi::eval::eval;
use lispi::value::Value;

/// An interactive expression-language interpreter.
#[derive(Parser, Debug)]
#[command(name = "lispi", version = config::VERSION)]
struct CliArgs {
    /// Files to load and evaluate before exiting. With none given, starts
    /// the interactive REPL instead.
    files: Vec<PathBuf>,

    /// Increase log verbosity (-v for Info, -vv for Debug and above).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let env = lispi::new_root_env();

    if args.files.is_empty() {
        run_repl(&env);
    } else {
        for path in &args.files {
            info!("loading {}", path.display());
            run_file(&env, path);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        _ => log::Level::Debug,
    };
    simple_logger::init_with_level(level).expect("logger can only be initialized once");
}

/// Behaves exactly as `load "FILE"` evaluated at the top level would, per
/// spec.md §6 — it invokes the registered `load` builtin itself rather than
/// re-implementing read/parse/eval here, so the file-argument path and the
/// `load` builtin can never diverge.
fn run_file(env: &lispi::value::EnvRef, path: &PathBuf) {
    let call = Value::SExpr(vec![
        Value::Symbol("load".to_string()),
        Value::String(path.display().to_string()),
    ]);
    let result = eval(env, call);
    if result.is_error() {
        println!("{result}");
    }
}

fn run_repl(env: &lispi::value::EnvRef) {
    println!("{}", config::WELCOME_BANNER);
    println!("{}", config::EXIT_HINT);

    let mut rl = DefaultEditor::new().expect("failed to initialize line editor");

    loop {
        match rl.readline(config::PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                debug!("read: {line}");

                match lispi::eval_program(env, &line) {
                    Ok(results) => {
                        for result in results {
                            print_result(&result);
                        }
                    }
                    Err(e) => eprintln!("Parse Error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Readline Error: {e:?}");
                break;
            }
        }
    }
}

fn print_result(result: &Value) {
    println!("{result}");
}
