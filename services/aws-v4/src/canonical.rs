//! Canonical form of a request.
//!
//! ```text
//! METHOD
//! PATH
//! CANONICAL_QUERY
//! name1:value1
//! name2:value2
//!
//! name1;name2
//! HEX_SHA256(PAYLOAD)
//! ```

use std::collections::BTreeMap;

use awsign_core::hash::hex_sha256;
use awsign_core::{Error, Result};
use http::header;
use http::HeaderMap;
use http::Method;
use percent_encoding::utf8_percent_encode;

use crate::constants::AWS_QUERY_ENCODE_SET;

/// Headers in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalHeaders {
    /// Sorted header names joined by `;`, e.g. `content-type;host;x-amz-date`.
    pub signed_headers: String,
    /// One `name:value\n` line per signed header, an empty line, then
    /// [`CanonicalHeaders::signed_headers`].
    pub block: String,
}

/// Canonicalize headers for signing.
///
/// `host` is always signed with the given value, a `host` entry in `headers`
/// is ignored. Values of the same header are joined by a single space in
/// their original order and are not trimmed.
pub fn canonicalize_headers(headers: &HeaderMap, host: &str) -> Result<CanonicalHeaders> {
    let mut values: BTreeMap<&str, String> = BTreeMap::new();

    for name in headers.keys() {
        if *name == header::HOST {
            continue;
        }

        let mut joined = String::new();
        for (idx, value) in headers.get_all(name).iter().enumerate() {
            let value = std::str::from_utf8(value.as_bytes()).map_err(|e| {
                Error::request_invalid(format!("value of header {name} is not valid utf-8"))
                    .with_source(e)
            })?;

            if idx != 0 {
                joined.push(' ');
            }
            joined.push_str(value);
        }
        values.insert(name.as_str(), joined);
    }
    values.insert("host", host.to_string());

    let signed_headers = values.keys().copied().collect::<Vec<_>>().join(";");

    // 256 is specially chosen to avoid reallocation for most requests.
    let mut block = String::with_capacity(256);
    for (name, value) in values.iter() {
        block.push_str(name);
        block.push(':');
        block.push_str(value);
        block.push('\n');
    }
    block.push('\n');
    block.push_str(&signed_headers);

    Ok(CanonicalHeaders {
        signed_headers,
        block,
    })
}

/// Build the canonical query string.
///
/// Names and values are percent-encoded first, then sorted by name with ties
/// broken by value.
pub fn canonical_query_string(query: &[(String, String)]) -> String {
    let mut pairs = query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect::<Vec<_>>();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical request string.
///
/// `path` must already be escaped exactly as it is sent on the wire.
pub fn canonical_request_string(
    method: &Method,
    path: &str,
    query: &[(String, String)],
    headers: &CanonicalHeaders,
    payload: &[u8],
) -> Result<String> {
    if path.is_empty() {
        return Err(Error::request_invalid(
            "request path must not be empty, use / for the root",
        ));
    }

    let query = canonical_query_string(query);
    let payload_hash = hex_sha256(payload);

    Ok(format!(
        "{method}\n{path}\n{query}\n{}\n{payload_hash}",
        headers.block
    ))
}
