mod cli;
mod config;
mod error;
mod page_range;
mod processor;
mod select;
mod sink;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use cli::Cli;
use config::Config;
use error::SelpgError;
use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

fn main() -> ExitCode {
    let args: Vec<_> = std::env::args_os().collect();
    let prog = args
        .first()
        .and_then(|arg| Path::new(arg).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or("selpg")
        .to_string();

    init_logging();

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(SelpgError::Usage(e.to_string()).exit_code());
        }
    };

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&prog, &err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn execute(cli: &Cli) -> Result<(), SelpgError> {
    let config = Config::from_cli(cli)?;

    if !cli.quiet {
        if cli.json {
            let summary = serde_json::to_string(&config).map_err(|e| SelpgError::Io {
                context: "writing summary",
                source: e.into(),
            })?;
            eprintln!("{}", summary);
        } else {
            eprintln!("{}", config);
        }
    }

    select::run(&config)?;
    Ok(())
}

/// Print `err` to stderr as `<prog>: <message>[: <cause>]`, followed by the
/// usage line when the invocation itself was at fault.
fn report(prog: &str, err: &SelpgError) {
    let mut message = format!("{}: {}", prog, err);
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    eprintln!("{}", message);

    if err.wants_usage() {
        eprintln!("{}", Cli::command().render_usage());
        eprintln!("Try '{} --help' for more information.", prog);
    }
}

fn init_logging() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_env_filter(env_filter)
        .init();
}
