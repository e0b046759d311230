//! CLI command implementations
//!
//! Each subcommand group has its own module with a `run` function. All of
//! them connect through [`crate::Config::connect`], issue one request and
//! hand the response to [`output`].

pub mod datafile;
pub mod dataset;
pub mod dataverse;
pub mod info;
pub mod metadatablock;
pub mod output;
pub mod request;
