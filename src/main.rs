use std::process::ExitCode;

use clap::Parser;
use huffpack::if_tracing;

use crate::cli::{Cli, Command};

if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

mod cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if_tracing! {
        let default_level = if cli.verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let subscriber = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let result = match cli.command {
        Command::Encode(args) => cli::encode::encode(args),
        Command::Decode(args) => cli::decode::decode(args),
        Command::Test(args) => cli::test::test(args),
        Command::Inspect(args) => cli::inspect::inspect(args),
        Command::Corpus(args) => cli::corpus::corpus(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if_tracing! {
                tracing::error!(event = "command_failed", error = %format!("{:#}", e), "command failed");
            }
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
