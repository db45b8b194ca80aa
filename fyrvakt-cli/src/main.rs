//! ## fyrvakt-cli
//! **Operator interface of the aggregation node**
//!
//! - `run`: start the aggregation loop on the packet generator or a replay
//! - `diagnose`: offline installation self-check
//! - `status`: print the status document of a running node

use clap::Parser;

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run(args).await,
        Commands::Diagnose(args) => commands::diagnose(args),
        Commands::Status(args) => commands::status(args).await,
    }
}
