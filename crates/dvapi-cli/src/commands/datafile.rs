//! `dvapi datafile` command implementation

use crate::config::Config;
use crate::error::{CliError, Result};
use colored::Colorize;
use std::io::Write;
use tracing::info;

/// Download a datafile to a path or to stdout
pub async fn run(config: &Config, id: &str, output: Option<&str>) -> Result<()> {
    let mut client = config.connect().await?;

    let response = client.get_datafile(id).await?;
    let status = response.status();
    let url = response.url().to_string();

    if !status.is_success() {
        eprintln!("{}", format!("HTTP {}", status).red().bold());
        return Err(CliError::request_failed(url, status.as_u16()));
    }

    let bytes = response.bytes().await?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &bytes).await?;
            info!(file_id = %id, %path, bytes = bytes.len(), "Datafile saved");
            eprintln!("{} {} ({} bytes)", "Saved".green().bold(), path, bytes.len());
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        },
    }

    Ok(())
}
