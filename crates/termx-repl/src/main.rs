//! termx CLI entry point.
//!
//! Usage:
//!   termx                      # Interactive console
//!   termx -c <command>         # Execute one line and exit
//!   termx --url <url>          # Interactive console against another backend

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use termx_kernel::TerminalConfig;

fn main() -> ExitCode {
    // Logs go to stderr so they stay out of the console's screen.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut config = TerminalConfig::load()?;
    let mut command: Option<String> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(ExitCode::SUCCESS);
            }
            "--version" | "-V" => {
                println!(
                    "termx {} ({} {})",
                    env!("CARGO_PKG_VERSION"),
                    env!("TERMX_GIT_HASH"),
                    env!("TERMX_BUILD_DATE")
                );
                return Ok(ExitCode::SUCCESS);
            }
            "-c" => {
                let line = iter.next().context("-c requires a command argument")?;
                command = Some(line.clone());
            }
            "--url" => {
                let url = iter.next().context("--url requires a backend URL")?;
                config.set_api_url(url);
            }
            other if other.starts_with("--url=") => {
                config.set_api_url(&other["--url=".len()..]);
            }
            unknown => {
                eprintln!("Unknown option: {unknown}");
                eprintln!("Run 'termx --help' for usage.");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    tracing::debug!(api_url = %config.api_url, "configuration loaded");

    match command {
        Some(line) => {
            let output = termx_repl::run_command(config, &line)?;
            if !output.is_empty() {
                println!("{output}");
            }
        }
        None => termx_repl::run(config)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn print_help() {
    println!(
        r#"termx v{}

Usage:
  termx                        Interactive console
  termx -c <command>           Execute one line and exit

Options:
  -c <command>                 Execute command string and exit
  --url <url>                  Backend base URL (default: http://localhost:8000)
  -h, --help                   Show this help
  -V, --version                Show version

Environment:
  TERMX_API_URL                Backend base URL, below --url
  RUST_LOG                     Log filter, logs go to stderr

Examples:
  termx                        # Start the console
  termx -c 'show files'        # Translate and run one line
  termx -c top                 # Print one process table
"#,
        env!("CARGO_PKG_VERSION")
    );
}
