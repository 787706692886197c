use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cadl::{lexer, CadlError, ExecutionContext, Interpreter, Repl};

#[derive(Parser)]
#[command(author, version, about = "CADL cat-drawing language interpreter")]
struct Args {
    /// Seed for `randomcat`, for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a CADL program file
    Run { script: PathBuf },
    /// Run a CADL snippet given on the command line
    Eval { source: String },
    /// Print the token stream of a CADL program file
    Tokenize { script: PathBuf },
    /// Start an interactive session
    Repl,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the art.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CadlError> {
    let context = ExecutionContext { seed: args.seed };
    match args.command.unwrap_or(Command::Repl) {
        Command::Run { script } => {
            let source = fs::read_to_string(&script)?;
            Interpreter::with_context(context).eval_source(&source)
        }
        Command::Eval { source } => Interpreter::with_context(context).eval_source(&source),
        Command::Tokenize { script } => {
            let source = fs::read_to_string(&script)?;
            for token in lexer::tokenize(&source)? {
                println!("{token}");
            }
            Ok(())
        }
        Command::Repl => Repl::new(context).run(),
    }
}
