//! Client configuration and credentials

use super::sender::HttpSender;
use crate::{Result, YooKassaError};
use base64::{engine::general_purpose, Engine as _};
use http::HeaderValue;
use std::sync::Arc;
use std::time::Duration;

/// Production API origin and version prefix
pub const BASE_URL: &str = "https://api.yookassa.ru/v3/";

/// Timeout of the default HTTP sender
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Shop credentials used for HTTP Basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    account_id: String,
    secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from a shop id and secret key
    pub fn new(account_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// The shop (account) identifier
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// `Authorization: Basic ...` header value, marked sensitive
    pub(crate) fn authorization_header(&self) -> Result<HeaderValue> {
        let encoded = general_purpose::STANDARD
            .encode(format!("{}:{}", self.account_id, self.secret_key));
        let mut value = HeaderValue::from_str(&format!("Basic {}", encoded))
            .map_err(|e| YooKassaError::config(format!("Invalid credentials header: {}", e)))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Options applied when the client is constructed
///
/// Without a custom sender the client builds a [`reqwest`] sender with
/// [`timeout`](Self::timeout); a supplied sender or `reqwest::Client`
/// keeps its own timeout policy.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL all endpoints are relative to
    pub base_url: String,
    /// Timeout of the default sender
    pub timeout: Duration,
    /// Pre-configured reqwest client to send with
    pub http_client: Option<reqwest::Client>,
    /// Custom sender, takes precedence over `http_client`
    pub sender: Option<Arc<dyn HttpSender>>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("http_client", &self.http_client.is_some())
            .field("sender", &self.sender.as_ref().map(|_| "<sender>"))
            .finish()
    }
}

impl ClientConfig {
    /// Default configuration against the production API
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT,
            http_client: None,
            sender: None,
        }
    }

    /// Send to a different base URL (sandbox, proxy, test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout of the default sender
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send through an existing reqwest client
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Send through a custom [`HttpSender`]
    pub fn with_sender(mut self, sender: impl HttpSender + 'static) -> Self {
        self.sender = Some(Arc::new(sender));
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(YooKassaError::config("Base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(YooKassaError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        if self.timeout.is_zero() {
            return Err(YooKassaError::config("Timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Base URL with exactly one trailing slash
    pub(crate) fn normalized_base_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
