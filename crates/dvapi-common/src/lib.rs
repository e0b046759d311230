//! dvapi Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling, logging and JSON helpers for the dvapi workspace.
//!
//! # Overview
//!
//! - **Error Handling**: `DvError` and the `Result` alias
//! - **Logging**: `tracing` subscriber setup driven by `LogConfig`
//! - **JSON**: reading metadata files and converting JSON text
//!
//! # Example
//!
//! ```no_run
//! use dvapi_common::json::read_file_json;
//!
//! fn load() -> dvapi_common::Result<()> {
//!     let metadata = read_file_json("dataverse.json")?;
//!     println!("alias: {}", metadata["alias"]);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod json;
pub mod logging;

// Re-export commonly used types
pub use error::{DvError, Result};
