//! `dvapi dataset` command implementation

use crate::api::{CreatedDataset, DataverseResponse};
use crate::commands::output::{print_response, ResponseBody};
use crate::config::Config;
use crate::error::Result;
use crate::DatasetCommand;
use colored::Colorize;
use dvapi_common::json::read_file_json;
use tracing::info;

/// Run a dataset subcommand
pub async fn run(config: &Config, command: &DatasetCommand, raw: bool) -> Result<()> {
    let mut client = config.connect().await?;

    let response = match command {
        DatasetCommand::Get { pid } => client.get_dataset(pid).await?,
        DatasetCommand::Create {
            dataverse,
            metadata,
        } => {
            let metadata = read_file_json(metadata)?;
            let response = client.create_dataset(dataverse, &metadata).await?;
            return report_created(ResponseBody::read(response).await?, raw);
        },
        DatasetCommand::Publish { pid, release } => {
            client.publish_dataset(pid, (*release).into()).await?
        },
        DatasetCommand::Delete { pid } => client.delete_dataset(pid).await?,
        DatasetCommand::Export { pid, exporter } => {
            client.get_dataset_export(pid, exporter).await?
        },
        DatasetCommand::Files { pid, version } => client.get_datafiles(pid, version).await?,
        DatasetCommand::Upload { pid, file } => client.upload_datafile(pid, file).await?,
    };

    print_response(response, raw).await
}

/// Print the create response and, when present, the new persistent id
fn report_created(body: ResponseBody, raw: bool) -> Result<()> {
    body.print(raw)?;

    if let Some(pid) = persistent_id(&body.text) {
        info!(persistent_id = %pid, "Dataset created");
        eprintln!("{} {}", "Persistent id:".cyan().bold(), pid);
    }

    body.into_result()
}

/// `data.persistentId` of a create-dataset response body
pub fn persistent_id(body: &str) -> Option<String> {
    serde_json::from_str::<DataverseResponse<CreatedDataset>>(body)
        .ok()
        .and_then(|resp| resp.data)
        .map(|data| data.persistent_id)
}
