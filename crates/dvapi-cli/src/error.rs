//! Error types for dvapi
//!
//! Construction of an [`ApiClient`] has its own error, [`ConnectError`], so
//! callers can tell a bad base URL apart from a host that is not a Dataverse
//! installation. Everything else funnels into [`CliError`].

use crate::api::ApiClient;
use thiserror::Error;

/// Result type alias for dvapi operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Why the connection probe at construction failed
#[derive(Error, Debug)]
pub enum ConnectErrorKind {
    /// Base URL missing, empty, or not an absolute http(s) URL
    #[error("Invalid base URL: {0}. Provide the root URL of a Dataverse installation, e.g. 'https://demo.dataverse.org'.")]
    InvalidUrl(String),

    /// No host answered the probe request
    #[error("Could not connect to '{url}': {source}. Check the base URL and your network connection.")]
    ConnectionFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A host answered, but not like a Dataverse native API
    #[error("'{url}' did not answer like a Dataverse API (HTTP {status}): {message}")]
    ApiResponse {
        url: String,
        status: u16,
        message: String,
    },
}

/// Failed construction of an [`ApiClient`]
///
/// Carries the partially constructed client, with `status` set to ERROR, so
/// callers can still inspect what was configured.
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct ConnectError {
    kind: ConnectErrorKind,
    client: Box<ApiClient>,
}

impl ConnectError {
    pub(crate) fn new(kind: ConnectErrorKind, client: ApiClient) -> Self {
        Self {
            kind,
            client: Box::new(client),
        }
    }

    pub fn kind(&self) -> &ConnectErrorKind {
        &self.kind
    }

    /// The client as it was when construction failed
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn into_client(self) -> ApiClient {
        *self.client
    }

    pub fn is_invalid_url(&self) -> bool {
        matches!(self.kind, ConnectErrorKind::InvalidUrl(_))
    }

    pub fn is_connection_failed(&self) -> bool {
        matches!(self.kind, ConnectErrorKind::ConnectionFailed { .. })
    }

    pub fn is_api_response(&self) -> bool {
        matches!(self.kind, ConnectErrorKind::ApiResponse { .. })
    }
}

/// Error type for CLI and client operations
#[derive(Error, Debug)]
pub enum CliError {
    /// The request completed but the server answered with a non-success status
    #[error("Request to '{url}' failed with HTTP {status}.")]
    RequestFailed { url: String, status: u16 },

    /// Client construction failed
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// HTTP request failed at the transport level
    #[error("Network request failed: {0}. Check your internet connection and base URL.")]
    Http(#[from] reqwest::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Set BASE_URL and API_TOKEN or pass --base-url/--api-token.")]
    Config(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions.")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}.")]
    JsonParse(#[from] serde_json::Error),

    /// Shared helper failed (reading metadata files)
    #[error(transparent)]
    Common(#[from] dvapi_common::DvError),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a failed-request error
    pub fn request_failed(url: impl Into<String>, status: u16) -> Self {
        Self::RequestFailed {
            url: url.into(),
            status,
        }
    }
}
