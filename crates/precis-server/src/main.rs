mod commands;

use anyhow::Result;
use clap::Parser;

use precis_server::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let overrides = cli.command.overrides();
    match cli.command {
        Commands::Serve { .. } => commands::serve::run(cli.config.as_deref(), overrides).await,
        Commands::Summarize { input, quiet, .. } => {
            commands::summarize::run(input.as_deref(), cli.config.as_deref(), overrides, quiet)
                .await
        }
    }
}
