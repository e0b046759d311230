//! HTTP API client for a Dataverse installation
//!
//! Construction probes the server (`GET /api/{version}/info/server`) so a
//! wrong base URL is reported up front rather than on first use. Every
//! request method performs exactly one HTTP call and returns the
//! `reqwest::Response` untouched; `status` records whether the last call
//! succeeded.

use crate::api::{endpoints, types::*};
use crate::error::{ConnectError, ConnectErrorKind, Result};
use chrono::{DateTime, Utc};
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use url::Url;

// ============================================================================
// API Client Constants
// ============================================================================

/// API version used when none is given
pub const DEFAULT_API_VERSION: &str = "v1";

/// Parent dataverse for new dataverses when none is given
pub const DEFAULT_PARENT_DATAVERSE: &str = ":root";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("dvapi/", env!("CARGO_PKG_VERSION"));

/// API client for a Dataverse native API
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_token: Option<String>,
    api_version: String,
    token_header: TokenHeader,
    conn_started: DateTime<Utc>,
    native_api_base_url: String,
    status: ConnectionStatus,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .field("token_header", &self.token_header)
            .field("conn_started", &self.conn_started)
            .field("native_api_base_url", &self.native_api_base_url)
            .field("status", &self.status)
            .finish()
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    api_token: Option<String>,
    api_version: Option<String>,
    token_header: TokenHeader,
    http: Option<Client>,
}

impl ApiClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Token sent with every request; an empty token counts as none
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn token_header(mut self, header: TokenHeader) -> Self {
        self.token_header = header;
        self
    }

    /// Use a preconfigured `reqwest::Client` instead of the default one
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Validate the base URL, probe the server and return a ready client
    ///
    /// On failure the returned [`ConnectError`] holds the partially built
    /// client with `status` set to ERROR.
    #[instrument(skip(self), fields(base_url = ?self.base_url))]
    pub async fn connect(self) -> std::result::Result<ApiClient, ConnectError> {
        let api_version = self
            .api_version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let mut client = ApiClient {
            http: self.http.unwrap_or_else(default_http_client),
            base_url: String::new(),
            api_token: self.api_token.filter(|t| !t.is_empty()),
            api_version,
            token_header: self.token_header,
            conn_started: Utc::now(),
            native_api_base_url: String::new(),
            status: ConnectionStatus::Error,
        };

        let Some(base_url) = self.base_url.filter(|u| !u.trim().is_empty()) else {
            warn!("No base URL given");
            return Err(ConnectError::new(
                ConnectErrorKind::InvalidUrl("no base URL given".to_string()),
                client,
            ));
        };

        client.native_api_base_url =
            endpoints::native_api_base_url(&base_url, &client.api_version);
        client.base_url = base_url;

        if let Err(reason) = validate_base_url(&client.base_url) {
            warn!(base_url = %client.base_url, %reason, "Rejected base URL");
            return Err(ConnectError::new(ConnectErrorKind::InvalidUrl(reason), client));
        }

        match client.probe().await {
            Ok(()) => {
                client.status = ConnectionStatus::Ok;
                info!(
                    native_api_base_url = %client.native_api_base_url,
                    authenticated = client.api_token.is_some(),
                    "Connected to Dataverse"
                );
                Ok(client)
            },
            Err(kind) => {
                warn!(error = %kind, "Connection probe failed");
                Err(ConnectError::new(kind, client))
            },
        }
    }
}

/// Transport defaults apart from the user agent; no timeout override
fn default_http_client() -> Client {
    build_http_client(USER_AGENT)
}

fn build_http_client(user_agent: &str) -> Client {
    match Client::builder().user_agent(user_agent).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, user_agent, "Failed to configure HTTP client, using reqwest defaults");
            Client::new()
        },
    }
}

/// The base URL must be an absolute http(s) URL with a host
fn validate_base_url(base_url: &str) -> std::result::Result<(), String> {
    let parsed = Url::parse(base_url).map_err(|e| format!("'{}' is not a URL ({})", base_url, e))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!(
            "'{}' uses scheme '{}', expected http or https",
            base_url,
            parsed.scheme()
        ));
    }

    if parsed.host_str().is_none() {
        return Err(format!("'{}' has no host", base_url));
    }

    Ok(())
}

impl ApiClient {
    /// Start building a client
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Connect with the default API version and token header
    pub async fn create(
        base_url: Option<&str>,
        api_token: Option<&str>,
    ) -> std::result::Result<Self, ConnectError> {
        let mut builder = Self::builder();

        if let Some(url) = base_url {
            builder = builder.base_url(url);
        }
        if let Some(token) = api_token {
            builder = builder.api_token(token);
        }

        builder.connect().await
    }

    async fn probe(&self) -> std::result::Result<(), ConnectErrorKind> {
        let url = endpoints::info_server_url(&self.native_api_base_url);
        debug!(%url, "Probing server");

        let response = self.http.get(&url).send().await.map_err(|source| {
            ConnectErrorKind::ConnectionFailed {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectErrorKind::ApiResponse {
                url,
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        let envelope: DataverseResponse<serde_json::Value> =
            response
                .json()
                .await
                .map_err(|e| ConnectErrorKind::ApiResponse {
                    url: url.clone(),
                    status: status.as_u16(),
                    message: format!("response is not a Dataverse API envelope ({})", e),
                })?;

        if !envelope.is_ok() {
            return Err(ConnectErrorKind::ApiResponse {
                url,
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("server reported status '{}'", envelope.status)),
            });
        }

        Ok(())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match (&self.api_token, self.token_header) {
            (Some(token), TokenHeader::Bearer) => request.bearer_auth(token),
            (Some(token), TokenHeader::DataverseKey) => {
                request.header(TokenHeader::DATAVERSE_KEY, token)
            },
            (None, _) => request,
        }
    }

    /// Send one request and record its outcome in `status`
    async fn dispatch(&mut self, request: RequestBuilder) -> Result<Response> {
        match self.authorize(request).send().await {
            Ok(response) => {
                self.status = ConnectionStatus::from_success(response.status().is_success());
                if self.status.is_ok() {
                    debug!(status = %response.status(), url = %response.url(), "Request completed");
                } else {
                    warn!(status = %response.status(), url = %response.url(), "Request returned non-success status");
                }
                Ok(response)
            },
            Err(e) => {
                self.status = ConnectionStatus::Error;
                warn!(error = %e, "Request failed");
                Err(e.into())
            },
        }
    }

    // ------------------------------------------------------------------------
    // Generic requests
    // ------------------------------------------------------------------------

    /// GET `{native_api_base_url}{query}`
    pub async fn make_get_request(&mut self, query: &str) -> Result<Response> {
        let url = endpoints::query_url(&self.native_api_base_url, query);
        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    /// POST `{native_api_base_url}{query}`, with an optional JSON body
    pub async fn make_post_request(
        &mut self,
        query: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response> {
        let url = endpoints::query_url(&self.native_api_base_url, query);
        let mut request = self.http.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.dispatch(request).await
    }

    /// DELETE `{native_api_base_url}{query}`
    pub async fn make_delete_request(&mut self, query: &str) -> Result<Response> {
        let url = endpoints::query_url(&self.native_api_base_url, query);
        let request = self.http.delete(&url);
        self.dispatch(request).await
    }

    // ------------------------------------------------------------------------
    // Dataverses
    // ------------------------------------------------------------------------

    pub async fn get_dataverse(&mut self, identifier: &str) -> Result<Response> {
        let url = endpoints::dataverse_url(&self.native_api_base_url, identifier);
        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    /// Create a dataverse below `parent` (`:root` when `None`)
    ///
    /// `identifier` is the alias the metadata declares. It is only logged:
    /// the request goes to the parent's endpoint and the server takes the
    /// alias from `metadata`.
    #[instrument(skip(self, metadata))]
    pub async fn create_dataverse<T>(
        &mut self,
        identifier: &str,
        metadata: &T,
        parent: Option<&str>,
    ) -> Result<Response>
    where
        T: Serialize + ?Sized,
    {
        let parent = parent.unwrap_or(DEFAULT_PARENT_DATAVERSE);
        debug!(%identifier, %parent, "Creating dataverse below parent");
        let url = endpoints::dataverse_url(&self.native_api_base_url, parent);
        let request = self.http.post(&url).json(metadata);
        self.dispatch(request).await
    }

    #[instrument(skip(self))]
    pub async fn publish_dataverse(&mut self, identifier: &str) -> Result<Response> {
        let url = endpoints::dataverse_publish_url(&self.native_api_base_url, identifier);
        let request = self.http.post(&url);
        self.dispatch(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_dataverse(&mut self, identifier: &str) -> Result<Response> {
        let url = endpoints::dataverse_url(&self.native_api_base_url, identifier);
        let request = self.http.delete(&url);
        self.dispatch(request).await
    }

    // ------------------------------------------------------------------------
    // Datasets
    // ------------------------------------------------------------------------

    pub async fn get_dataset(&mut self, persistent_id: &str) -> Result<Response> {
        let url = endpoints::dataset_url(&self.native_api_base_url, persistent_id);
        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    /// Create a dataset inside `dataverse`
    ///
    /// The response body carries the new dataset's `persistentId`, which the
    /// other dataset methods accept as-is.
    #[instrument(skip(self, metadata))]
    pub async fn create_dataset<T>(&mut self, dataverse: &str, metadata: &T) -> Result<Response>
    where
        T: Serialize + ?Sized,
    {
        let url = endpoints::dataset_create_url(&self.native_api_base_url, dataverse);
        let request = self.http.post(&url).json(metadata);
        self.dispatch(request).await
    }

    #[instrument(skip(self))]
    pub async fn publish_dataset(
        &mut self,
        persistent_id: &str,
        release_type: ReleaseType,
    ) -> Result<Response> {
        let url = endpoints::dataset_publish_url(
            &self.native_api_base_url,
            persistent_id,
            release_type.as_str(),
        );
        let request = self.http.post(&url);
        self.dispatch(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_dataset(&mut self, persistent_id: &str) -> Result<Response> {
        let url = endpoints::dataset_url(&self.native_api_base_url, persistent_id);
        let request = self.http.delete(&url);
        self.dispatch(request).await
    }

    /// Export dataset metadata with one of the server's exporters (ddi, oai_dc, ...)
    pub async fn get_dataset_export(
        &mut self,
        persistent_id: &str,
        exporter: &str,
    ) -> Result<Response> {
        let url = endpoints::dataset_export_url(&self.native_api_base_url, persistent_id, exporter);
        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    /// List the files of a dataset version (`1`, `1.2`, `:latest`, `:draft`)
    pub async fn get_datafiles(&mut self, persistent_id: &str, version: &str) -> Result<Response> {
        let url = endpoints::dataset_files_url(&self.native_api_base_url, persistent_id, version);
        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    /// Upload a local file into a dataset as multipart form field `file`
    #[instrument(skip(self, path))]
    pub async fn upload_datafile(
        &mut self,
        persistent_id: &str,
        path: impl AsRef<Path>,
    ) -> Result<Response> {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.status = ConnectionStatus::Error;
                return Err(e.into());
            },
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new().part("file", part);

        let url = endpoints::dataset_add_file_url(&self.native_api_base_url, persistent_id);
        let request = self.http.post(&url).multipart(form);
        self.dispatch(request).await
    }

    // ------------------------------------------------------------------------
    // Datafiles, info, metadata blocks
    // ------------------------------------------------------------------------

    /// Download a datafile through the access API
    pub async fn get_datafile(&mut self, file_id: &str) -> Result<Response> {
        let url = endpoints::datafile_access_url(&self.base_url, file_id);
        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    pub async fn get_info_server(&mut self) -> Result<Response> {
        let url = endpoints::info_server_url(&self.native_api_base_url);
        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    pub async fn get_info_version(&mut self) -> Result<Response> {
        let url = endpoints::info_version_url(&self.native_api_base_url);
        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    pub async fn get_info_api_terms_of_use(&mut self) -> Result<Response> {
        let url = endpoints::info_api_terms_of_use_url(&self.native_api_base_url);
        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    pub async fn get_metadatablocks(&mut self) -> Result<Response> {
        let url = endpoints::metadatablocks_url(&self.native_api_base_url);
        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    pub async fn get_metadatablock(&mut self, identifier: &str) -> Result<Response> {
        let url = endpoints::metadatablock_url(&self.native_api_base_url, identifier);
        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Base URL as given; empty if none was
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn token_header(&self) -> TokenHeader {
        self.token_header
    }

    /// When construction started
    pub fn conn_started(&self) -> DateTime<Utc> {
        self.conn_started
    }

    /// `{base_url}/api/{api_version}`; empty if no base URL was given
    pub fn native_api_base_url(&self) -> &str {
        &self.native_api_base_url
    }

    /// Outcome of construction or of the most recent request
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }
}
