//! Outbound HTTP: the REST collection backend and the admin info service.
//!
//! Every call is a single request; there is no retry and no de-duplication.
//! Failures are returned as [`RequestError`] for the caller to surface.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod admin;
pub mod collection;

pub use admin::{AdminEndpoint, AdminInfoClient};
pub use collection::HttpCollectionApi;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("remote response carried no record id")]
    MissingId,
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client, RequestError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Sends the request and returns the parsed JSON body. Empty bodies become
/// `Value::Null`.
pub(crate) async fn send_json(request: RequestBuilder) -> Result<Value, RequestError> {
    let response = check_status(request.send().await?).await?;
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}

async fn check_status(response: Response) -> Result<Response, RequestError> {
    let status = response.status();
    if status.is_success() {
        debug!("{} {}", status.as_u16(), response.url());
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body).unwrap_or(body);
    Err(RequestError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Pulls `message` (or `error`) out of a JSON error body.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}
