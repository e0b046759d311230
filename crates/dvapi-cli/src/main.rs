//! dvapi CLI - Main entry point

use clap::Parser;
use dvapi_cli::{commands, Cli, Commands};
use dvapi_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Verbose: debug to console; otherwise warnings only
    let log_config = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        })
        .output(LogOutput::Console)
        .log_file_prefix("dvapi")
        .build();

    // LOG_* environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging, so a failed init is not fatal
    let _ = init_logging(&log_config);

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> dvapi_cli::Result<()> {
    let config = cli.config()?;

    match &cli.command {
        Commands::Info { command } => commands::info::run(&config, command, cli.raw).await,
        Commands::Dataverse { command } => {
            commands::dataverse::run(&config, command, cli.raw).await
        },
        Commands::Dataset { command } => commands::dataset::run(&config, command, cli.raw).await,
        Commands::Datafile { id, output } => {
            commands::datafile::run(&config, id, output.as_deref()).await
        },
        Commands::Metadatablock { command } => {
            commands::metadatablock::run(&config, command, cli.raw).await
        },
        Commands::Request { command } => commands::request::run(&config, command, cli.raw).await,
    }
}
