//! NumScript CLI — run, list, and encode.
//!
//! Exit codes:
//! - 0: Script finished with status 0
//! - n: Script finished with non-zero status, reported as status mod 256
//!   (255 when that would be 0)
//! - 1: Unreadable file, tokenizer error, or fatal runtime error
//! - 2: Bad command line
//!
//! A script that exits with status 1 or 2 shares its code with the
//! errors above; only a finished run prints its status line to stdout.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "numscript", version, about = "Interpreter for NumScript integer-statement scripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a script on stdin/stdout
    Run {
        /// Script file
        script: PathBuf,
        /// Give every label call its own scope, released on return
        #[arg(long)]
        scoped_calls: bool,
    },
    /// Print each statement in mnemonic form
    List {
        /// Script file
        script: PathBuf,
    },
    /// Print the character codes of a string
    Encode {
        /// Text to encode
        text: String,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run {
            script,
            scoped_calls,
        } => commands::run(&script, scoped_calls),
        Command::List { script } => commands::list(&script),
        Command::Encode { text } => commands::encode(&text),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();
}
