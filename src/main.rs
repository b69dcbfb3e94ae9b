#[macro_use]
extern crate huffpack;
extern crate anyhow;
extern crate clap;
extern crate serde_json;
extern crate voxell_timer;
extern crate walkdir;

if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

use std::process::ExitCode;

use crate::cli::{Cli, Command};
use clap::Parser;
use huffpack::Codec;

mod cli;

fn main() -> ExitCode {
    if_tracing! {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if_tracing! {
                tracing::error!(event = "command_failed", error = %e);
            }
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    let codec = Codec::new(config);
    match cli.command {
        Command::Encode(args) => cli::encode::encode(args, &codec),
        Command::Decode(args) => cli::decode::decode(args, &codec),
        Command::Test(args) => cli::test::test(args),
        Command::Corpus(args) => cli::corpus::corpus(args),
        Command::Table(args) => cli::table::table(args, &codec),
        Command::Config { command } => cli::config::config(command, codec.config()),
    }
}
