//! `dvapi dataverse` command implementation

use crate::commands::output::print_response;
use crate::config::Config;
use crate::error::Result;
use crate::DataverseCommand;
use dvapi_common::json::read_file_json;
use tracing::info;

/// Run a dataverse subcommand
pub async fn run(config: &Config, command: &DataverseCommand, raw: bool) -> Result<()> {
    let mut client = config.connect().await?;

    let response = match command {
        DataverseCommand::Get { id } => client.get_dataverse(id).await?,
        DataverseCommand::Create {
            id,
            metadata,
            parent,
        } => {
            let metadata = read_file_json(metadata)?;
            info!(alias = %id, %parent, "Creating dataverse");
            client
                .create_dataverse(id, &metadata, Some(parent.as_str()))
                .await?
        },
        DataverseCommand::Publish { id } => client.publish_dataverse(id).await?,
        DataverseCommand::Delete { id } => client.delete_dataverse(id).await?,
    };

    print_response(response, raw).await
}
