//! `dvapi request` command implementation
//!
//! Escape hatch for endpoints without a dedicated subcommand. The path is
//! appended to the native API root as-is.

use crate::commands::output::print_response;
use crate::config::Config;
use crate::error::Result;
use crate::RequestCommand;
use dvapi_common::json::read_file_json;

/// Send a raw request
pub async fn run(config: &Config, command: &RequestCommand, raw: bool) -> Result<()> {
    let mut client = config.connect().await?;

    let response = match command {
        RequestCommand::Get { path } => client.make_get_request(path).await?,
        RequestCommand::Post { path, body } => {
            let body = body.as_ref().map(read_file_json).transpose()?;
            client.make_post_request(path, body.as_ref()).await?
        },
        RequestCommand::Delete { path } => client.make_delete_request(path).await?,
    };

    print_response(response, raw).await
}
