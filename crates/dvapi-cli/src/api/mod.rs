//! API client module
//!
//! HTTP client for the Dataverse native API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder};
pub use types::*;
