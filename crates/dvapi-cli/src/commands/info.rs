//! `dvapi info` command implementation

use crate::commands::output::print_response;
use crate::config::Config;
use crate::error::Result;
use crate::InfoCommand;

/// Show server information
pub async fn run(config: &Config, command: &InfoCommand, raw: bool) -> Result<()> {
    let mut client = config.connect().await?;

    let response = match command {
        InfoCommand::Server => client.get_info_server().await?,
        InfoCommand::Version => client.get_info_version().await?,
        InfoCommand::Terms => client.get_info_api_terms_of_use().await?,
    };

    print_response(response, raw).await
}
