//! Payout handler

use super::{execute, filter_params};
use crate::client::{Client, Context};
use crate::path::item_endpoint;
use crate::types::{Payout, PayoutList, PayoutListFilter};
use crate::Result;
use reqwest::Method;

/// Collection endpoint of payouts
pub const PAYOUT_ENDPOINT: &str = "payouts";

/// Creates and retrieves payouts
#[derive(Debug, Clone)]
pub struct PayoutHandler {
    client: Client,
    idempotency_key: Option<String>,
}

impl PayoutHandler {
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

    /// Create a payout
    pub async fn create_payout(&self, ctx: &Context, payout: &Payout) -> Result<Payout> {
        let body = serde_json::to_vec(payout)?;
        execute(
            &self.client,
            ctx,
            Method::POST,
            PAYOUT_ENDPOINT,
            Some(body),
            None,
            self.idempotency_key.as_deref(),
        )
        .await
    }

    /// Get a payout by id
    pub async fn get_payout(&self, ctx: &Context, id: &str) -> Result<Payout> {
        let endpoint = item_endpoint(PAYOUT_ENDPOINT, id)?;
        execute(&self.client, ctx, Method::GET, &endpoint, None, None, None).await
    }

    /// List payouts matching `filter`
    pub async fn find_payouts(&self, ctx: &Context, filter: &PayoutListFilter) -> Result<PayoutList> {
        let params = filter_params(filter)?;
        execute(
            &self.client,
            ctx,
            Method::GET,
            PAYOUT_ENDPOINT,
            None,
            Some(&params),
            None,
        )
        .await
    }
}
