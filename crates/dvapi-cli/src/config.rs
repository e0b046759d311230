//! Configuration management for dvapi
//!
//! Connection settings come from the environment (optionally via a `.env`
//! file); command-line flags override them.

use crate::api::client::DEFAULT_API_VERSION;
use crate::api::{ApiClient, ApiClientBuilder, TokenHeader};
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Base URL of the Dataverse installation
pub const ENV_BASE_URL: &str = "BASE_URL";

/// API token
pub const ENV_API_TOKEN: &str = "API_TOKEN";

/// Prefixed alternatives, checked first
pub const ENV_DATAVERSE_BASE_URL: &str = "DATAVERSE_BASE_URL";
pub const ENV_DATAVERSE_API_TOKEN: &str = "DATAVERSE_API_TOKEN";

pub const ENV_API_VERSION: &str = "DATAVERSE_API_VERSION";
pub const ENV_TOKEN_HEADER: &str = "DATAVERSE_TOKEN_HEADER";

/// Environment file read from the working directory
pub const DOTENV_FILE: &str = ".env";

/// Connection configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataverse base URL, e.g. `https://demo.dataverse.org`
    pub base_url: Option<String>,

    /// API token
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,

    /// Native API version
    pub api_version: String,

    /// How the token is sent
    #[serde(default)]
    pub token_header: TokenHeader,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .field("token_header", &self.token_header)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            token_header: TokenHeader::default(),
        }
    }
}

impl Config {
    /// Load config from environment variables
    ///
    /// A `.env` file in the working directory is read first if present;
    /// variables already set in the process win. Parent directories are not
    /// searched.
    pub fn from_env() -> Result<Self> {
        load_dotenv(Path::new(DOTENV_FILE));

        let mut config = Self::default();

        config.base_url = first_env(&[ENV_DATAVERSE_BASE_URL, ENV_BASE_URL]);
        config.api_token = first_env(&[ENV_DATAVERSE_API_TOKEN, ENV_API_TOKEN]);

        if let Some(version) = first_env(&[ENV_API_VERSION]) {
            config.api_version = version;
        }

        if let Some(header) = first_env(&[ENV_TOKEN_HEADER]) {
            config.token_header = header.parse().map_err(CliError::config)?;
        }

        Ok(config)
    }

    /// Override the base URL
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = Some(url);
    }

    /// Override the API token
    pub fn set_api_token(&mut self, token: String) {
        self.api_token = Some(token);
    }

    /// Base URL, or a configuration error naming the variables to set
    pub fn require_base_url(&self) -> Result<&str> {
        self.base_url.as_deref().ok_or_else(|| {
            CliError::config(format!(
                "No Dataverse base URL configured (set {} or {})",
                ENV_BASE_URL, ENV_DATAVERSE_BASE_URL
            ))
        })
    }

    /// Client builder preloaded with these settings
    pub fn client_builder(&self) -> Result<ApiClientBuilder> {
        let mut builder = ApiClient::builder()
            .base_url(self.require_base_url()?)
            .api_version(self.api_version.clone())
            .token_header(self.token_header);

        if let Some(ref token) = self.api_token {
            builder = builder.api_token(token.clone());
        }

        Ok(builder)
    }

    /// Connect to the configured installation
    pub async fn connect(&self) -> Result<ApiClient> {
        Ok(self.client_builder()?.connect().await?)
    }
}

/// Load `path` into the process environment without overriding set variables
fn load_dotenv(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => debug!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {},
        Err(e) => warn!(path = %path.display(), error = %e, "Ignoring unreadable environment file"),
    }
}

fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}
