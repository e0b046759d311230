//! dvapi CLI Library
//!
//! Client and command-line interface for the Dataverse native API.
//!
//! # Overview
//!
//! - **Client**: [`api::ApiClient`] probes the server on construction and
//!   exposes one method per endpoint, each returning the raw response
//! - **Dataverses**: get, create, publish, delete (`dvapi dataverse ...`)
//! - **Datasets**: get, create, publish, delete, export, list and upload
//!   files (`dvapi dataset ...`)
//! - **Server info and metadata blocks** (`dvapi info ...`, `dvapi metadatablock ...`)
//! - **Raw requests** against any native API path (`dvapi request ...`)
//!
//! # Example
//!
//! ```no_run
//! use dvapi_cli::api::ApiClient;
//!
//! # async fn run() -> dvapi_cli::Result<()> {
//! let mut client = ApiClient::create(Some("https://demo.dataverse.org"), None).await?;
//! let response = client.get_dataverse("harvard").await?;
//! println!("{} {}", client.status(), response.status());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use error::{CliError, ConnectError, ConnectErrorKind, Result};

use clap::{Parser, Subcommand, ValueEnum};

/// dvapi - Dataverse native API client
#[derive(Parser, Debug)]
#[command(name = "dvapi")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dataverse base URL (overrides DATAVERSE_BASE_URL and BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API token (overrides DATAVERSE_API_TOKEN and API_TOKEN)
    #[arg(long, global = true)]
    pub api_token: Option<String>,

    /// Print response bodies exactly as received
    #[arg(long, global = true)]
    pub raw: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Server information
    Info {
        #[command(subcommand)]
        command: InfoCommand,
    },

    /// Manage dataverses
    Dataverse {
        #[command(subcommand)]
        command: DataverseCommand,
    },

    /// Manage datasets
    Dataset {
        #[command(subcommand)]
        command: DatasetCommand,
    },

    /// Download a datafile by its database id
    Datafile {
        /// Datafile id
        id: String,

        /// Write the file here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect metadata blocks
    Metadatablock {
        #[command(subcommand)]
        command: MetadatablockCommand,
    },

    /// Send a request to any native API path (e.g. "/info/server")
    Request {
        #[command(subcommand)]
        command: RequestCommand,
    },
}

/// Server information subcommands
#[derive(Subcommand, Debug)]
pub enum InfoCommand {
    /// Server hostname
    Server,
    /// Dataverse version and build
    Version,
    /// API terms of use
    Terms,
}

/// Dataverse subcommands
#[derive(Subcommand, Debug)]
pub enum DataverseCommand {
    /// Show a dataverse
    Get {
        /// Dataverse alias or id
        id: String,
    },

    /// Create a dataverse from a JSON metadata file
    Create {
        /// Alias of the new dataverse
        id: String,

        /// Path to the JSON metadata file
        metadata: String,

        /// Parent dataverse
        #[arg(short, long, default_value = ":root")]
        parent: String,
    },

    /// Publish a dataverse
    Publish {
        /// Dataverse alias or id
        id: String,
    },

    /// Delete an unpublished dataverse
    Delete {
        /// Dataverse alias or id
        id: String,
    },
}

/// Dataset subcommands
#[derive(Subcommand, Debug)]
pub enum DatasetCommand {
    /// Show a dataset
    Get {
        /// Persistent id (e.g. "doi:10.5072/FK2/ABC123")
        pid: String,
    },

    /// Create a dataset from a JSON metadata file
    Create {
        /// Dataverse that will hold the dataset
        dataverse: String,

        /// Path to the JSON metadata file
        metadata: String,
    },

    /// Publish a dataset
    Publish {
        /// Persistent id
        pid: String,

        /// Version bump
        #[arg(short, long, value_enum, default_value = "minor")]
        release: ReleaseArg,
    },

    /// Delete a draft dataset
    Delete {
        /// Persistent id
        pid: String,
    },

    /// Export dataset metadata
    Export {
        /// Persistent id
        pid: String,

        /// Exporter name (ddi, oai_dc, dataverse_json, schema.org, ...)
        #[arg(short, long, default_value = "dataverse_json")]
        exporter: String,
    },

    /// List files in a dataset version
    Files {
        /// Persistent id
        pid: String,

        /// Version ("1", "1.2", ":latest", ":draft")
        #[arg(default_value = ":latest")]
        version: String,
    },

    /// Upload a file into a dataset
    Upload {
        /// Persistent id
        pid: String,

        /// Local file to upload
        file: String,
    },
}

/// Release types accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ReleaseArg {
    Major,
    Minor,
}

impl From<ReleaseArg> for api::ReleaseType {
    fn from(arg: ReleaseArg) -> Self {
        match arg {
            ReleaseArg::Major => api::ReleaseType::Major,
            ReleaseArg::Minor => api::ReleaseType::Minor,
        }
    }
}

/// Metadata block subcommands
#[derive(Subcommand, Debug)]
pub enum MetadatablockCommand {
    /// List all metadata blocks
    List,
    /// Show one metadata block
    Get {
        /// Block name (e.g. "citation")
        id: String,
    },
}

/// Raw request subcommands
#[derive(Subcommand, Debug)]
pub enum RequestCommand {
    /// GET a native API path
    Get {
        /// Path below the native API root
        path: String,
    },

    /// POST to a native API path
    Post {
        /// Path below the native API root
        path: String,

        /// JSON file to send as the body
        #[arg(short, long)]
        body: Option<String>,
    },

    /// DELETE a native API path
    Delete {
        /// Path below the native API root
        path: String,
    },
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    ///
    /// Only flags given on the command line override; environment lookups
    /// and their precedence belong to [`Config::from_env`].
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::from_env()?;

        if let Some(ref url) = self.base_url {
            config.set_base_url(url.clone());
        }
        if let Some(ref token) = self.api_token {
            config.set_api_token(token.clone());
        }

        Ok(config)
    }
}
