//! Path construction for resource endpoints
//!
//! Identifiers are server-assigned or caller-supplied and are never
//! trusted: each one is escaped as exactly one path segment so that `/`,
//! `?` or `#` inside it cannot change the request target. Empty, `.` and
//! `..` identifiers are rejected outright: URL parsing collapses dot
//! segments even when percent-encoded.

use crate::{Result, YooKassaError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is inside a single path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

/// Percent-escape a value for use as one path segment
pub fn escape_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Escape a resource identifier, rejecting ones that cannot be a segment
pub fn escape_id(id: &str) -> Result<String> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(YooKassaError::invalid_request(format!(
            "Invalid resource identifier: {:?}",
            id
        )));
    }
    Ok(escape_segment(id))
}

/// `{collection}/{escaped id}`
pub fn item_endpoint(collection: &str, id: &str) -> Result<String> {
    Ok(format!("{}/{}", collection, escape_id(id)?))
}

/// `{collection}/{escaped id}/{action}`
pub fn action_endpoint(collection: &str, id: &str, action: &str) -> Result<String> {
    Ok(format!("{}/{}/{}", collection, escape_id(id)?, action))
}
