#![deny(
    unused_qualifications,
    clippy::all,
    unused_import_braces,
    unused_lifetimes,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style
)]
#![warn(clippy::perf, clippy::single_match_else, clippy::dbg_macro)]

mod helper;

use clap::Parser;
use ecma_engine::{Context, ContextBuilder};
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Runs one or more JavaScript files, or drops into a REPL when none are given.
#[derive(Debug, Parser)]
#[command(name = "ecma-rt", author, about)]
struct Opt {
    /// The JavaScript file(s) to evaluate.
    files: Vec<PathBuf>,

    /// Parse each file and print its AST instead of running it.
    #[arg(long, short = 'a')]
    dump_ast: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (-q silences warnings too).
    #[arg(long, short = 'q', action = clap::ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

/// Resolves the effective log level: explicit `-v`/`-q` flags take
/// precedence, falling back to `ECMA_LOG`, then to `Warn`.
fn log_level(opt: &Opt) -> log::Level {
    if opt.verbose > 0 {
        return match opt.verbose {
            1 => log::Level::Info,
            2 => log::Level::Debug,
            _ => log::Level::Trace,
        };
    }
    if opt.quiet > 0 {
        return log::Level::Error;
    }
    match std::env::var("ECMA_LOG") {
        Ok(value) => value.parse().unwrap_or(log::Level::Warn),
        Err(_) => log::Level::Warn,
    }
}

fn main() -> ExitCode {
    let opt = Opt::parse();
    simple_logger::init_with_level(log_level(&opt)).ok();

    if opt.files.is_empty() {
        return run_repl();
    }

    if opt.dump_ast {
        for file in &opt.files {
            let source = match fs::read_to_string(file) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("{}: {e}", file.display());
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = dump_ast(&source) {
                eprintln!("{}: {e}", file.display());
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let mut context = ContextBuilder::new().build();
    for file in &opt.files {
        let source = match fs::read_to_string(file) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{}: {e}", file.display());
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = run_source(&mut context, &source) {
            log::warn!("uncaught script error in {}: {e}", file.display());
            eprintln!("{}: {e}", file.display());
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn run_source(context: &mut Context, source: &str) -> Result<(), String> {
    context.evaluate_script(source).map(|_| ()).map_err(|e| e.to_string())
}

fn dump_ast(source: &str) -> Result<(), String> {
    let mut interner = ecma_interner::Interner::new();
    let script = ecma_parser::parse_script(source, &mut interner).map_err(|e| e.to_string())?;
    println!("{script:#?}");
    Ok(())
}

fn run_repl() -> ExitCode {
    let mut context = ContextBuilder::new().build();
    let mut editor = match Editor::<helper::ReplHelper, rustyline::history::DefaultHistory>::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("failed to start the line editor: {e}");
            return ExitCode::FAILURE;
        }
    };
    editor.set_helper(Some(helper::ReplHelper::new()));

    loop {
        match editor.readline("ecma> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                match context.evaluate_script(&line) {
                    Ok(value) => match value.to_js_string(&mut context) {
                        Ok(s) => println!("{s}"),
                        Err(e) => eprintln!("{e}"),
                    },
                    Err(e) => {
                        log::warn!("uncaught script error: {e}");
                        eprintln!("{e}");
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{e}");
                break;
            }
        }
    }
    ExitCode::SUCCESS
}
