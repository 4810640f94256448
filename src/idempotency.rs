//! Idempotency keys
//!
//! Every POST carries an `Idempotence-Key` header. Repeating a request
//! with the same key has no additional effect on the server, so a caller
//! that wants to retry one logical operation pins a key on the handler;
//! otherwise each call gets a fresh one.

use uuid::Uuid;

/// Header carrying the idempotency key (`Idempotence-Key`, lowercased)
pub const IDEMPOTENCY_HEADER: &str = "idempotence-key";

/// Generate a fresh, random idempotency key
pub fn generate_key() -> String {
    Uuid::new_v4().to_string()
}

/// Use the supplied key, or generate one when it is absent or empty
pub fn resolve_key(key: Option<&str>) -> String {
    match key {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => generate_key(),
    }
}
