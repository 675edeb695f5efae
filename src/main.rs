//! Autify CLI - run test plans and fetch results from the command line
//!
//! Prints JSON documents to stdout; logs and progress go to stderr.

use atf::cli::{self, EXIT_CODE_ERROR, EXIT_CODE_OK};
use atf::commands::Commands;
use atf::common::config::Config;
use atf::common::logging::{self, LogSettings};
use clap::Parser;
use colored::Colorize;

#[derive(Parser)]
#[command(name = "atf", about = "Command-line client for the Autify test automation API")]
#[command(version, long_about = None)]
struct Cli {
    /// Print execution logs
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() {
                EXIT_CODE_ERROR
            } else {
                EXIT_CODE_OK
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    let log = LogSettings::resolve(&config.log, cli.debug)
        .with_env_filter(std::env::var("RUST_LOG").ok());
    logging::init_cli(&log);

    if let Err(e) = cli::dispatch(cli.command, config, log).await {
        fail(e);
    }
}

fn fail(e: atf::Error) -> ! {
    tracing::debug!(error = ?e, "Command failed");
    eprintln!("{} {}", "Error:".red().bold(), e);
    if e.is_precondition() {
        eprintln!("Run 'atf --help' for usage.");
    }
    std::process::exit(EXIT_CODE_ERROR);
}
