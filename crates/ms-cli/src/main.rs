//! Mariseed CLI - idempotent MariaDB schema and seed bootstrap

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::{init_logging, ExitCode};
use commands::{plan, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        cli::Commands::Run(args) => run::execute(args, &cli.global).await,
        cli::Commands::Plan(args) => plan::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        let code = match err.downcast_ref::<ExitCode>() {
            Some(ec) => ec.0,
            None => {
                log::error!("{:#}", err);
                1
            }
        };
        std::process::exit(code);
    }
}
