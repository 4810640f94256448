//! Size-bounded response body reading
//!
//! Bodies are pulled chunk by chunk and reading stops as soon as the limit
//! is reached, so an oversized or endless upstream response never grows
//! the buffer past the limit. The response is consumed by the read and is
//! released when the read returns, whichever branch it takes.

use crate::{Result, YooKassaError};
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use serde::de::DeserializeOwned;

/// Upper bound on bytes read from any response body (10 MiB)
pub const MAX_RESPONSE_BODY_BYTES: usize = 10 << 20;

/// Largest buffer allocated before any body bytes arrive
const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// A response body read up to a fixed limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CappedBody {
    bytes: Vec<u8>,
    truncated: bool,
    limit: usize,
}

impl CappedBody {
    /// Bytes read, never more than the limit
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the body had more bytes than the limit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Decode the body as JSON, refusing truncated bodies
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        if self.truncated {
            return Err(YooKassaError::ResponseTooLarge { limit: self.limit });
        }
        Ok(serde_json::from_slice(&self.bytes)?)
    }
}

/// Read a response body, keeping at most `limit` bytes
pub async fn read_capped(response: reqwest::Response, limit: usize) -> Result<CappedBody> {
    let capacity = initial_capacity(response.content_length(), limit);
    read_capped_stream(response.bytes_stream(), limit, capacity).await
}

/// Pre-allocation for a body; an announced length is a hint, not a promise
fn initial_capacity(content_length: Option<u64>, limit: usize) -> usize {
    let announced = content_length.map_or(DEFAULT_BUFFER_CAPACITY, |len| {
        usize::try_from(len).unwrap_or(usize::MAX)
    });
    announced.min(DEFAULT_BUFFER_CAPACITY).min(limit)
}

/// Read a chunk stream, keeping at most `limit` bytes
pub async fn read_capped_stream<S, E>(stream: S, limit: usize, capacity: usize) -> Result<CappedBody>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: Into<YooKassaError>,
{
    futures_util::pin_mut!(stream);

    let mut bytes = Vec::with_capacity(capacity.min(limit));
    let mut truncated = false;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Into::into)?;
        let remaining = limit - bytes.len();
        if chunk.len() > remaining {
            bytes.extend_from_slice(&chunk[..remaining]);
            truncated = true;
            break;
        }
        bytes.extend_from_slice(&chunk);
    }

    if truncated {
        tracing::warn!(limit, "response body exceeds read limit, remainder discarded");
    }

    Ok(CappedBody {
        bytes,
        truncated,
        limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn chunks(parts: &[&str]) -> impl Stream<Item = std::result::Result<Bytes, YooKassaError>> {
        let owned: Vec<_> = parts
            .iter()
            .map(|p| Ok(Bytes::copy_from_slice(p.as_bytes())))
            .collect();
        stream::iter(owned)
    }

    #[tokio::test]
    async fn test_reads_whole_body_under_limit() {
        let body = read_capped_stream(chunks(&["{\"a\":", "1}"]), 64, 0)
            .await
            .unwrap();
        assert!(!body.is_truncated());
        assert_eq!(body.bytes(), b"{\"a\":1}");

        let value: serde_json::Value = body.decode().unwrap();
        assert_eq!(value["a"], 1);
    }

    #[tokio::test]
    async fn test_body_exactly_at_limit_is_not_truncated() {
        let body = read_capped_stream(chunks(&["12345"]), 5, 0).await.unwrap();
        assert!(!body.is_truncated());
        assert_eq!(body.bytes().len(), 5);
    }

    #[tokio::test]
    async fn test_stops_at_limit() {
        let body = read_capped_stream(chunks(&["1234", "5678", "9"]), 6, 0)
            .await
            .unwrap();
        assert!(body.is_truncated());
        assert_eq!(body.bytes(), b"123456");

        let err = body.decode::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, YooKassaError::ResponseTooLarge { limit: 6 }));
    }

    #[test]
    fn test_initial_capacity_ignores_large_announced_length() {
        assert_eq!(
            initial_capacity(Some(MAX_RESPONSE_BODY_BYTES as u64), MAX_RESPONSE_BODY_BYTES),
            DEFAULT_BUFFER_CAPACITY
        );
        assert_eq!(initial_capacity(Some(u64::MAX), MAX_RESPONSE_BODY_BYTES), DEFAULT_BUFFER_CAPACITY);
        assert_eq!(initial_capacity(Some(12), MAX_RESPONSE_BODY_BYTES), 12);
        assert_eq!(initial_capacity(None, 100), 100);
    }

    #[tokio::test]
    async fn test_buffer_grows_past_initial_capacity() {
        let big = "x".repeat(DEFAULT_BUFFER_CAPACITY * 2);
        let body = read_capped_stream(chunks(&[big.as_str()]), MAX_RESPONSE_BODY_BYTES, 16)
            .await
            .unwrap();
        assert!(!body.is_truncated());
        assert_eq!(body.bytes().len(), DEFAULT_BUFFER_CAPACITY * 2);
    }

    #[tokio::test]
    async fn test_stream_error_propagates() {
        let failing = stream::iter(vec![
            Ok(Bytes::from_static(b"{")),
            Err(YooKassaError::sender("connection reset")),
        ]);
        let err = read_capped_stream(failing, 64, 0).await.unwrap_err();
        assert!(err.is_transport());
    }
}
