//! Classification of non-success API responses
//!
//! The API documents a JSON error body (`type`, `id`, `code`,
//! `description`, ...), but proxies, gateways and truncated transfers do
//! not honour it. Classification therefore never fails on a bad body: an
//! oversized or undecodable body becomes [`ApiError::unexpected`], so a
//! caller always receives a classified error for a non-success status.

use crate::body::{read_capped_stream, CappedBody, MAX_RESPONSE_BODY_BYTES};
use crate::{Result, YooKassaError};
use bytes::Bytes;
use futures_util::Stream;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Upper bound on bytes read from an error body (10 MiB)
pub const MAX_ERROR_BODY_BYTES: usize = MAX_RESPONSE_BODY_BYTES;

/// Code used when the error body could not be classified
pub const UNEXPECTED_ERROR_CODE: &str = "unexpected";

/// Structured error returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Object type, `"error"` for well-formed bodies
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub kind: String,
    /// Error identifier, quoted when contacting support
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    /// Machine-readable error code (e.g. `invalid_request`)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code: String,
    /// Human-readable description
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Name of the offending request parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Suggested delay before repeating the request, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    /// HTTP status of the response the error came from
    #[serde(skip)]
    pub status: Option<u16>,
}

/// `null` decodes as an empty string
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ApiError {
    /// Fallback error for a body that could not be classified
    pub fn unexpected(status: Option<u16>) -> Self {
        let description = match status {
            Some(status) => format!("unexpected error response (status {})", status),
            None => "unexpected error response".to_string(),
        };
        Self {
            kind: "error".to_string(),
            id: String::new(),
            code: UNEXPECTED_ERROR_CODE.to_string(),
            description,
            parameter: None,
            retry_after: None,
            status,
        }
    }

    /// Whether this is the synthetic fallback error
    pub fn is_unexpected(&self) -> bool {
        self.code == UNEXPECTED_ERROR_CODE
    }

    /// Classify an already-read error body
    pub fn from_capped_body(body: &CappedBody, status: Option<u16>) -> Self {
        if body.is_truncated() {
            tracing::warn!(?status, "error body exceeds read limit, using fallback error");
            return Self::unexpected(status);
        }

        match serde_json::from_slice::<ApiError>(body.bytes()) {
            Ok(mut err) => {
                err.status = status;
                err
            }
            Err(e) => {
                tracing::warn!(?status, error = %e, "undecodable error body, using fallback error");
                Self::unexpected(status)
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)?;
        if !self.id.is_empty() {
            write!(f, " (id {})", self.id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Classify a non-success response
///
/// Returns `Err` only when the body cannot be read at all; a body that is
/// too large or malformed still yields a fallback [`ApiError`].
pub async fn classify(response: reqwest::Response) -> Result<ApiError> {
    let status = response.status().as_u16();
    let err = classify_stream(response.bytes_stream(), Some(status)).await?;

    tracing::error!(
        status,
        code = %err.code,
        id = %err.id,
        "API request failed"
    );

    Ok(err)
}

/// Classify an error body given as a chunk stream
pub(crate) async fn classify_stream<S, E>(stream: S, status: Option<u16>) -> Result<ApiError>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: Into<YooKassaError>,
{
    let body = read_capped_stream(stream, MAX_ERROR_BODY_BYTES, 0).await?;
    Ok(ApiError::from_capped_body(&body, status))
}
