//! Refund handler

use super::{execute, filter_params};
use crate::client::{Client, Context};
use crate::path::item_endpoint;
use crate::types::{Refund, RefundList, RefundListFilter};
use crate::Result;
use reqwest::Method;

/// Collection endpoint of refunds
pub const REFUND_ENDPOINT: &str = "refunds";

/// Creates and finds refunds
#[derive(Debug, Clone)]
pub struct RefundHandler {
    client: Client,
    idempotency_key: Option<String>,
}

impl RefundHandler {
    /// Create a handler that generates a fresh idempotency key per write
    pub fn new(client: Client) -> Self {
        Self {
            client,
            idempotency_key: None,
        }
    }

    /// Copy of this handler that reuses `key` for every write
    pub fn with_idempotency_key(&self, key: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            idempotency_key: Some(key.into()),
        }
    }

    /// Create a refund
    pub async fn create_refund(&self, ctx: &Context, refund: &Refund) -> Result<Refund> {
        let body = serde_json::to_vec(refund)?;
        execute(
            &self.client,
            ctx,
            Method::POST,
            REFUND_ENDPOINT,
            Some(body),
            None,
            self.idempotency_key.as_deref(),
        )
        .await
    }

    /// Find a refund by id
    pub async fn find_refund(&self, ctx: &Context, id: &str) -> Result<Refund> {
        let endpoint = item_endpoint(REFUND_ENDPOINT, id)?;
        execute(&self.client, ctx, Method::GET, &endpoint, None, None, None).await
    }

    /// List refunds matching `filter`
    pub async fn find_refunds(&self, ctx: &Context, filter: &RefundListFilter) -> Result<RefundList> {
        let params = filter_params(filter)?;
        execute(
            &self.client,
            ctx,
            Method::GET,
            REFUND_ENDPOINT,
            None,
            Some(&params),
            None,
        )
        .await
    }
}
