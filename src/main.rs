mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod highlighter;
mod interp;
mod lexer;
mod parser;
mod value;

use builtins::register_builtins;
use clap::Parser;
use env::Environment;
use error::TartError;
use highlighter::TartHelper;
use lexer::SourceLocation;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;
use value::Value;

/// Tart procedural markup language
#[derive(Parser, Debug)]
#[command(name = "tart")]
#[command(version = config::VERSION)]
#[command(about = "A procedural markup language")]
#[command(long_about = "Renders documents that blend plain text with [proc arg ...] calls")]
struct CliArgs {
    /// Document to render (starts a REPL when omitted)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Maximum depth of nested procedure calls
    #[arg(
        long = "max-depth",
        value_name = "DEPTH",
        default_value_t = config::DEFAULT_RECURSION_LIMIT
    )]
    max_depth: usize,

    /// Print debug traces to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let level = if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    if let Err(err) = simple_logger::init_with_level(level) {
        eprintln!("failed to initialize logging: {err}");
    }

    eval::set_recursion_limit(args.max_depth);

    let env = Environment::new();
    register_builtins(&env);

    let outcome = match args.script {
        Some(path) => run_script(&path, &env),
        None => repl(&env),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Script mode: render one document and emit the result on stdout.
fn run_script(path: &Path, env: &Rc<Environment>) -> Result<(), TartError> {
    let output = interp::run_file(path, env)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// REPL mode: each line is executed as a document against a persistent
/// environment, and its assembled output is echoed.
fn repl(env: &Rc<Environment>) -> Result<(), TartError> {
    // bind `file` so [run ...] resolves against the working directory
    let pseudo_file = std::env::current_dir()
        .map(|dir| dir.join("<repl>"))
        .unwrap_or_else(|_| PathBuf::from("<repl>"));
    env.define("file", Value::String(pseudo_file.to_string_lossy().into_owned()));

    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<TartHelper, DefaultHistory> =
        Editor::with_config(rl_config).map_err(|err| TartError::Io {
            path: "<repl>".to_string(),
            message: err.to_string(),
        })?;
    rl.set_helper(Some(TartHelper::new()));

    let _ = rl.load_history(config::HISTORY_FILE);

    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_SUBTITLE);
    println!("{}", config::WELCOME_FOOTER);

    loop {
        match rl.readline("tart> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                match interp::execute_document(&line, SourceLocation::new("<repl>"), env) {
                    Ok(output) => {
                        if !output.is_empty() {
                            println!("{output}");
                        }
                    }
                    Err(err) => eprintln!("{err}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{err}");
                break;
            }
        }
    }

    let _ = rl.save_history(config::HISTORY_FILE);

    Ok(())
}
