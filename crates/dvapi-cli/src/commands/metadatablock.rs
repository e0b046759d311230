//! `dvapi metadatablock` command implementation

use crate::commands::output::print_response;
use crate::config::Config;
use crate::error::Result;
use crate::MetadatablockCommand;

/// List or show metadata blocks
pub async fn run(config: &Config, command: &MetadatablockCommand, raw: bool) -> Result<()> {
    let mut client = config.connect().await?;

    let response = match command {
        MetadatablockCommand::List => client.get_metadatablocks().await?,
        MetadatablockCommand::Get { id } => client.get_metadatablock(id).await?,
    };

    print_response(response, raw).await
}
