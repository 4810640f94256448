//! Fake senders and instrumented responses for unit tests

use crate::client::{Client, ClientConfig, HttpSender};
use crate::{Result, YooKassaError};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use http::HeaderMap;
use reqwest::Method;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// What the fake sender saw
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn query(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

type Responder = dyn Fn(&RecordedRequest) -> Result<reqwest::Response> + Send + Sync;

/// Sender that records requests and answers from a closure
#[derive(Clone)]
pub(crate) struct FakeSender {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeSender {
    pub fn new(
        responder: impl Fn(&RecordedRequest) -> Result<reqwest::Response> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Arc::new(responder),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always answer with `status` and `body`
    pub fn returning(status: u16, body: &'static str) -> Self {
        Self::new(move |_| Ok(response(status, body)))
    }

    /// Answer the first request with `response`, fail afterwards
    pub fn once(response: reqwest::Response) -> Self {
        let slot = Mutex::new(Some(response));
        Self::new(move |_| {
            slot.lock()
                .unwrap()
                .take()
                .ok_or_else(|| YooKassaError::sender("response already consumed"))
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl HttpSender for FakeSender {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        let recorded = RecordedRequest {
            method: request.method().clone(),
            url: request.url().clone(),
            headers: request.headers().clone(),
            body: request
                .body()
                .and_then(|body| body.as_bytes())
                .map(<[u8]>::to_vec),
        };
        self.requests.lock().unwrap().push(recorded.clone());
        (self.responder)(&recorded)
    }
}

/// Sender whose responses never arrive
pub(crate) struct StallingSender;

#[async_trait]
impl HttpSender for StallingSender {
    async fn send(&self, _request: reqwest::Request) -> Result<reqwest::Response> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(YooKassaError::sender("stalled"))
    }
}

pub(crate) fn client_with(sender: impl HttpSender + 'static) -> Client {
    Client::with_config(
        "account_id",
        "secret_key",
        ClientConfig::new().with_sender(sender),
    )
    .unwrap()
}

pub(crate) fn response(status: u16, body: impl Into<reqwest::Body>) -> reqwest::Response {
    let response = http::Response::builder()
        .status(status)
        .body(body.into())
        .unwrap();
    reqwest::Response::from(response)
}

/// Set when the response body is dropped
#[derive(Debug, Clone, Default)]
pub(crate) struct ReleaseFlag(Arc<AtomicBool>);

impl ReleaseFlag {
    pub fn is_released(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct ReleaseGuard(Arc<AtomicBool>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Response whose body reports when it is released
pub(crate) fn tracked_response(status: u16, body: &str) -> (reqwest::Response, ReleaseFlag) {
    let flag = ReleaseFlag::default();
    let guard = ReleaseGuard(flag.0.clone());
    let chunks = futures_util::stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from(
        body.to_string(),
    ))])
    .map(move |chunk| {
        let _keep = &guard;
        chunk
    });

    (response(status, reqwest::Body::wrap_stream(chunks)), flag)
}
