//! API request and response types
//!
//! Matches the Dataverse native API envelope. The client itself hands back
//! raw responses; these types are for callers that want to look inside.

use serde::{Deserialize, Serialize};

/// Outcome of the last operation performed by a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionStatus {
    Ok,
    Error,
}

impl ConnectionStatus {
    pub fn is_ok(self) -> bool {
        self == ConnectionStatus::Ok
    }

    pub(crate) fn from_success(success: bool) -> Self {
        if success {
            ConnectionStatus::Ok
        } else {
            ConnectionStatus::Error
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Ok => f.write_str("OK"),
            ConnectionStatus::Error => f.write_str("ERROR"),
        }
    }
}

/// How the API token is attached to requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenHeader {
    /// `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// `X-Dataverse-key: <token>`
    DataverseKey,
}

impl TokenHeader {
    /// Header name used by Dataverse installations for API keys
    pub const DATAVERSE_KEY: &'static str = "X-Dataverse-key";
}

impl std::str::FromStr for TokenHeader {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bearer" | "authorization" => Ok(TokenHeader::Bearer),
            "dataverse-key" | "x-dataverse-key" | "key" => Ok(TokenHeader::DataverseKey),
            _ => Err(format!(
                "Invalid token header '{}'. Expected 'bearer' or 'dataverse-key'.",
                s
            )),
        }
    }
}

/// Version bump requested when publishing a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Major,
    #[default]
    Minor,
}

impl ReleaseType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
        }
    }
}

impl std::fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard Dataverse response envelope
///
/// Successful calls carry `data`; failed calls carry `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataverseResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> DataverseResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// Payload of `GET /info/server` and `GET /info/apiTermsOfUse`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoMessage {
    pub message: String,
}

/// Payload of `GET /info/version`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

/// Payload returned when a dataset is created
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDataset {
    pub id: i64,
    pub persistent_id: String,
}
