//! HTTP sending seam
//!
//! [`HttpSender`] is the only transport abstraction the client depends on:
//! it receives a fully built request and returns the raw response. The
//! default implementation wraps a [`reqwest::Client`]; tests and callers
//! with special transport needs supply their own.

use crate::{Result, YooKassaError};
use async_trait::async_trait;
use std::time::Duration;

/// Sends one fully built HTTP request
///
/// Implementations must be safe for concurrent use; the client shares one
/// sender between every call and never mutates it.
#[async_trait]
pub trait HttpSender: Send + Sync {
    /// Send the request and return the response, whatever its status
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response>;
}

/// Default sender backed by [`reqwest::Client`]
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestSender {
    /// Build a sender whose requests time out after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| YooKassaError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: Some(timeout),
        })
    }

    /// Wrap an existing client, keeping its own timeout policy
    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Timeout applied by this sender, if it was built with one
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        Ok(self.client.execute(request).await?)
    }
}
