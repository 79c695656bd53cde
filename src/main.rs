// ── Command-line front end ────────────────────────────────────────────────────
//
// A thin driver over `jotter::Session`.  Console lines go to stdout; logs go
// to stderr so the two never interleave in a pipe.

#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use jotter::config::EditorConfig;
use jotter::languages::language_from_path;
use jotter::platform::fs::{DiskFileIo, FileIo};
use jotter::syntax::highlight;
use jotter::{Result, RunOutcome, Session};

const LOG_ENV: &str = "JOTTER_LOGLEVEL";

#[derive(Debug, Parser)]
#[command(name = "jotter", version, about)]
struct Args {
    /// Configuration file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile FILE and run it, printing its output with timestamps
    Run { file: PathBuf },
    /// Print the highlight spans of FILE
    Tokens {
        file: PathBuf,
        /// Print a JSON array instead of one span per line
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as JSON
    Config,
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging();

    match dispatch(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("jotter: {e}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn", env!("CARGO_CRATE_NAME"))));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(args: Args) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::load_default()?,
    };
    debug!(?config, "configuration loaded");

    match args.command {
        Command::Run { file } => run(config, &file),
        Command::Tokens { file, json } => tokens(&file, json),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run(config: EditorConfig, file: &Path) -> Result<ExitCode> {
    let mut session = Session::with_system(config);
    session
        .console_mut()
        .set_companion(Some(Box::new(std::io::stdout())));
    session.open(file)?;

    Ok(match session.run()? {
        RunOutcome::Completed {
            exit_code: Some(0), ..
        } => ExitCode::SUCCESS,
        RunOutcome::Completed {
            exit_code: Some(code),
            ..
        } => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        RunOutcome::Completed { exit_code: None, .. } | RunOutcome::CompileFailed => {
            ExitCode::FAILURE
        }
    })
}

fn tokens(file: &Path, json: bool) -> Result<ExitCode> {
    let text = DiskFileIo.load(file)?;
    let spans = highlight(language_from_path(file), &text);

    if json {
        println!("{}", serde_json::to_string_pretty(&spans)?);
    } else {
        for span in &spans {
            println!(
                "{:>6} {:>5} {:<9} {:?}",
                span.start,
                span.len,
                span.kind.as_str(),
                span.text(&text)
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}
