//! Transport client for the YooKassa API
//!
//! [`Client`] turns a method, a relative endpoint, an optional JSON body
//! and optional query parameters into exactly one authenticated request,
//! hands it to its [`HttpSender`] and returns the raw response. It never
//! looks at status codes and never reads the body; the resource handlers
//! in [`crate::handlers`] do that.
//!
//! # Examples
//!
//! ```no_run
//! use rust_yookassa::client::{Client, ClientConfig, Context};
//! use std::time::Duration;
//!
//! # async fn example() -> rust_yookassa::Result<()> {
//! let config = ClientConfig::new().with_timeout(Duration::from_secs(10));
//! let client = Client::with_config("123456", "test_secret", config)?;
//!
//! let response = client
//!     .make_request(&Context::background(), reqwest::Method::GET, "me", None, None, None)
//!     .await?;
//! println!("status: {}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod sender;


pub use config::{ClientConfig, Credentials, BASE_URL, DEFAULT_HTTP_TIMEOUT};
pub use context::Context;
pub use sender::{HttpSender, ReqwestSender};

use crate::idempotency::{self, IDEMPOTENCY_HEADER};
use crate::Result;
use http::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Query parameters for GET requests, values are stringified when sent
pub type QueryParams = serde_json::Map<String, Value>;

/// Authenticated client shared by all resource handlers
///
/// Cloning is cheap and clones share the sender. The client holds no
/// mutable state, so one instance may serve any number of concurrent calls.
#[derive(Clone)]
pub struct Client {
    credentials: Credentials,
    sender: Arc<dyn HttpSender>,
    base_url: String,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("sender", &"<sender>")
            .finish()
    }
}

impl Client {
    /// Create a client with the default configuration
    pub fn new(account_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::with_config(account_id, secret_key, ClientConfig::default())
    }

    /// Create a client with a custom configuration
    pub fn with_config(
        account_id: impl Into<String>,
        secret_key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        config.validate()?;
        let base_url = config.normalized_base_url();

        let (sender, timeout): (Arc<dyn HttpSender>, Option<Duration>) =
            match (config.sender, config.http_client) {
                (Some(sender), _) => (sender, None),
                (None, Some(http_client)) => {
                    (Arc::new(ReqwestSender::from_client(http_client)), None)
                }
                (None, None) => {
                    let sender = ReqwestSender::with_timeout(config.timeout)?;
                    let timeout = sender.timeout();
                    (Arc::new(sender), timeout)
                }
            };

        Ok(Self {
            credentials: Credentials::new(account_id, secret_key),
            sender,
            base_url,
            timeout,
        })
    }

    /// Base URL endpoints are appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timeout of the built-in sender, `None` for a caller-supplied one
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Shop credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build and send one authenticated request
    ///
    /// POST requests carry `Content-Type: application/json` and an
    /// idempotency header holding `idempotency_key`, or a freshly
    /// generated key when it is absent or empty. Other methods never carry
    /// the idempotency header. The response is returned whatever its
    /// status and its body is left unread.
    pub async fn make_request(
        &self,
        ctx: &Context,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
        params: Option<&QueryParams>,
        idempotency_key: Option<&str>,
    ) -> Result<reqwest::Response> {
        let request = self.build_request(method, endpoint, body, params, idempotency_key)?;
        ctx.run(self.sender.send(request)).await
    }

    /// Build the request [`make_request`](Self::make_request) would send
    pub fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
        params: Option<&QueryParams>,
        idempotency_key: Option<&str>,
    ) -> Result<reqwest::Request> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))?;

        if let Some(params) = params.filter(|params| !params.is_empty()) {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                query.append_pair(name, &query_value(value));
            }
        }

        let mut request = reqwest::Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, self.credentials.authorization_header()?);

        if request.method() == Method::POST {
            let key = idempotency::resolve_key(idempotency_key);
            let key_value = HeaderValue::from_str(&key).map_err(|_| {
                crate::YooKassaError::invalid_request(
                    "Idempotency key is not a valid header value",
                )
            })?;

            let headers = request.headers_mut();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers.insert(HeaderName::from_static(IDEMPOTENCY_HEADER), key_value);

            tracing::debug!(
                method = %request.method(),
                url = %request.url(),
                idempotency_key = %key,
                "Prepared API request"
            );
        } else {
            tracing::debug!(
                method = %request.method(),
                url = %request.url(),
                "Prepared API request"
            );
        }

        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }

        Ok(request)
    }
}

/// Stringify a scalar query value; strings are used as-is
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
