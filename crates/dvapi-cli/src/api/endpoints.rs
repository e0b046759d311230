//! API endpoint URL builders
//!
//! Every builder takes the native API root (`{base_url}/api/{version}`)
//! except [`datafile_access_url`], which lives under the unversioned access
//! API. Identifiers are concatenated verbatim so a persistent id returned by
//! the server can be passed straight back.

/// Path segment between the base URL and the API version
pub const API_PATH: &str = "/api";

/// Native API root for a base URL and version
pub fn native_api_base_url(base_url: &str, api_version: &str) -> String {
    format!("{}{}/{}", base_url, API_PATH, api_version)
}

/// Native API root joined with a caller-supplied query path
pub fn query_url(native: &str, query: &str) -> String {
    format!("{}{}", native, query)
}

/// Build server info URL (used as the connection probe)
pub fn info_server_url(native: &str) -> String {
    format!("{}/info/server", native)
}

/// Build server version URL
pub fn info_version_url(native: &str) -> String {
    format!("{}/info/version", native)
}

/// Build API terms of use URL
pub fn info_api_terms_of_use_url(native: &str) -> String {
    format!("{}/info/apiTermsOfUse", native)
}

/// Build dataverse URL (get, delete, and create-under-parent)
pub fn dataverse_url(native: &str, identifier: &str) -> String {
    format!("{}/dataverses/{}", native, identifier)
}

/// Build dataverse publish URL
pub fn dataverse_publish_url(native: &str, identifier: &str) -> String {
    format!("{}/dataverses/{}/actions/:publish", native, identifier)
}

/// Build URL for creating a dataset inside a dataverse
pub fn dataset_create_url(native: &str, dataverse: &str) -> String {
    format!("{}/dataverses/{}/datasets", native, dataverse)
}

/// Build dataset URL addressed by persistent id
pub fn dataset_url(native: &str, persistent_id: &str) -> String {
    format!(
        "{}/datasets/:persistentId/?persistentId={}",
        native, persistent_id
    )
}

/// Build dataset publish URL
pub fn dataset_publish_url(native: &str, persistent_id: &str, release_type: &str) -> String {
    format!(
        "{}/datasets/:persistentId/actions/:publish?persistentId={}&type={}",
        native, persistent_id, release_type
    )
}

/// Build dataset metadata export URL
pub fn dataset_export_url(native: &str, persistent_id: &str, exporter: &str) -> String {
    format!(
        "{}/datasets/export?exporter={}&persistentId={}",
        native, exporter, persistent_id
    )
}

/// Build URL listing the files of one dataset version
pub fn dataset_files_url(native: &str, persistent_id: &str, version: &str) -> String {
    format!(
        "{}/datasets/:persistentId/versions/{}/files?persistentId={}",
        native, version, persistent_id
    )
}

/// Build URL for adding a file to a dataset
pub fn dataset_add_file_url(native: &str, persistent_id: &str) -> String {
    format!(
        "{}/datasets/:persistentId/add?persistentId={}",
        native, persistent_id
    )
}

/// Build datafile download URL (access API, not versioned)
pub fn datafile_access_url(base_url: &str, file_id: &str) -> String {
    format!("{}{}/access/datafile/{}", base_url, API_PATH, file_id)
}

/// Build metadata block list URL
pub fn metadatablocks_url(native: &str) -> String {
    format!("{}/metadatablocks", native)
}

/// Build single metadata block URL
pub fn metadatablock_url(native: &str, identifier: &str) -> String {
    format!("{}/metadatablocks/{}", native, identifier)
}
