//! Response rendering
//!
//! The HTTP status line goes to stderr, the body to stdout, so bodies can be
//! piped. Non-success responses become [`CliError::RequestFailed`] after the
//! body is printed.

use crate::error::{CliError, Result};
use colored::Colorize;
use dvapi_common::json::value_to_pretty_json;
use reqwest::{Response, StatusCode};
use serde_json::Value;

/// A response whose body has been read
#[derive(Debug)]
pub struct ResponseBody {
    pub status: StatusCode,
    pub url: String,
    pub text: String,
}

impl ResponseBody {
    pub async fn read(response: Response) -> Result<Self> {
        let status = response.status();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(Self { status, url, text })
    }

    /// Body parsed as JSON, if it is JSON
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.text).ok()
    }

    /// Body as printed: pretty JSON unless `raw` or not JSON
    pub fn render(&self, raw: bool) -> Result<String> {
        if raw {
            return Ok(self.text.clone());
        }

        match self.json() {
            Some(value) => Ok(value_to_pretty_json(&value)?),
            None => Ok(self.text.clone()),
        }
    }

    pub fn print(&self, raw: bool) -> Result<()> {
        let line = format!("HTTP {}", self.status);
        if self.status.is_success() {
            eprintln!("{}", line.green().bold());
        } else {
            eprintln!("{}", line.red().bold());
        }

        let body = self.render(raw)?;
        if !body.is_empty() {
            println!("{}", body);
        }

        Ok(())
    }

    /// `Ok` for 2xx, otherwise a failed-request error
    pub fn into_result(self) -> Result<()> {
        if self.status.is_success() {
            Ok(())
        } else {
            Err(CliError::request_failed(self.url, self.status.as_u16()))
        }
    }
}

/// Print a response and turn its status into the command's result
pub async fn print_response(response: Response, raw: bool) -> Result<()> {
    let body = ResponseBody::read(response).await?;
    body.print(raw)?;
    body.into_result()
}
