//! Error types for the YooKassa client
//!
//! Every fallible operation in this crate returns [`Result`], whose error
//! side is [`YooKassaError`]. Variants fall into five stable kinds (see
//! [`ErrorKind`]) so that a retry or alerting layer above this crate can
//! branch on *what* went wrong without matching on individual variants:
//!
//! - **Transport**: the request could not be built or sent, or the
//!   [`Context`](crate::client::Context) was cancelled / timed out
//! - **Api**: the server answered with a non-success status; carries a
//!   classified [`ApiError`]
//! - **Decode**: a success response did not match the expected shape
//! - **Semantic**: a decoded resource the caller cannot act on
//! - **Config**: invalid client configuration or request arguments

use crate::api_error::ApiError;
use thiserror::Error;

/// Result type for YooKassa operations
pub type Result<T> = std::result::Result<T, YooKassaError>;

/// Coarse classification of a [`YooKassaError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server could not be reached, or the call was cancelled
    Transport,
    /// The server rejected the request
    Api,
    /// The server's success response was unusable
    Decode,
    /// The decoded resource cannot be acted upon
    Semantic,
    /// The client or the request was misconfigured
    Config,
}

/// Errors returned by the YooKassa client
#[derive(Error, Debug)]
pub enum YooKassaError {
    /// HTTP transport failure (DNS, connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A custom sender failed without a reqwest error to wrap
    #[error("Sender error: {message}")]
    Sender { message: String },

    /// The request context was cancelled
    #[error("request cancelled")]
    Cancelled,

    /// The request context deadline elapsed
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// Non-success response classified from the error body
    #[error("API error: {0}")]
    Api(ApiError),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A success response body exceeded the read limit
    #[error("response body exceeds {limit} bytes")]
    ResponseTooLarge { limit: usize },

    /// Created payment has neither a confirmation nor a saved payment method
    #[error("empty confirmation url")]
    EmptyConfirmationUrl,

    /// Payment confirmation is missing or is not a redirect
    #[error("unable to get link")]
    UnableToGetLink,

    /// Invalid client configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Request arguments rejected before sending
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl YooKassaError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a sender error
    pub fn sender(message: impl Into<String>) -> Self {
        Self::Sender {
            message: message.into(),
        }
    }

    /// Which broad category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_)
            | Self::InvalidUrl(_)
            | Self::Sender { .. }
            | Self::Cancelled
            | Self::DeadlineExceeded => ErrorKind::Transport,
            Self::Api(_) => ErrorKind::Api,
            Self::Json(_) | Self::ResponseTooLarge { .. } => ErrorKind::Decode,
            Self::EmptyConfirmationUrl | Self::UnableToGetLink => ErrorKind::Semantic,
            Self::Config { .. } | Self::InvalidRequest { .. } => ErrorKind::Config,
        }
    }

    /// Whether the server could not be reached at all
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// The classified API error, if the server rejected the request
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for YooKassaError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}
