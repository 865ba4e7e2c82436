//! `mini` — lex, parse and evaluate a source file (or an interactive REPL).
//!
//! The actual language work (tokenizing, parsing, evaluating) lives in
//! `mini-lex`/`mini-par`/`mini-eval`; this binary only wires them together,
//! following `faxt`'s `clap` derive + `tracing_subscriber` setup style —
//! see `mod error` for the process-level error wrapper and `mod builtins`
//! for the demonstration catalog registered into the root environment.

mod builtins;
mod error;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser as ClapParser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use error::{CliError, Result};
use mini_eval::{Environment, Evaluator};
use mini_par::Parser;

/// `mini` — an interpreter for a small dynamically-typed expression language.
#[derive(ClapParser, Debug)]
#[command(name = "mini")]
#[command(author = "Fax Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for the mini expression language", long_about = None)]
struct Cli {
    /// Source file to run. Required unless `--repl` is given.
    file: Option<PathBuf>,

    /// Start a REPL after (or instead of) running FILE.
    #[arg(short, long)]
    repl: bool,

    /// Enable debug-level tracing.
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let filter = EnvFilter::new(if debug { "debug" } else { "warn" });
    let subscriber = fmt::layer().with_target(false).with_thread_ids(false).with_thread_names(false);
    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}

fn run(cli: Cli) -> Result<()> {
    if cli.file.is_none() && !cli.repl {
        return Err(CliError::Usage(
            "expected a source file, or --repl to start an interactive session".to_string(),
        ));
    }

    let env = Environment::root();
    builtins::register(&env);
    let evaluator = Evaluator::new();

    if let Some(path) = &cli.file {
        run_file(path, &evaluator, &env)?;
    }

    if cli.repl {
        run_repl(&evaluator, &env);
    }

    Ok(())
}

fn run_file(path: &PathBuf, evaluator: &Evaluator, env: &Environment) -> Result<()> {
    tracing::debug!(path = %path.display(), "reading source file");
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;

    tracing::debug!("parsing");
    let program = Parser::new(&source).parse_program()?;

    tracing::debug!(expressions = program.len(), "evaluating");
    evaluator.evaluate_program(&program, env)?;
    Ok(())
}

/// Reads lines from stdin, each fed through a fresh `Parser` over the
/// shared root environment so definitions accumulate across lines. The
/// source language has no `try`/`catch`, so a failing line must not kill
/// the session — only that line's evaluation is aborted (per `mini-eval`'s
/// "fatal to the current expression" contract, elaborated here to "fatal
/// to the current REPL line").
fn run_repl(evaluator: &Evaluator, env: &Environment) {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("mini> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
        if line.trim().is_empty() {
            continue;
        }
        match Parser::new(&line).parse_program() {
            Ok(program) => match evaluator.evaluate_program(&program, env) {
                Ok(value) => println!("{value}"),
                Err(e) => eprintln!("error: {e}"),
            },
            Err(e) => eprintln!("error: {e}"),
        }
    }
}
