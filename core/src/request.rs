use http::header;
use http::request::Parts;
use http::HeaderMap;
use http::HeaderName;
use http::HeaderValue;
use http::Method;
use percent_encoding::percent_decode_str;

use crate::Error;
use crate::Result;

/// Signing view of a request.
///
/// It is a snapshot of everything the signers read from a request. Building it
/// never mutates the caller's request; signers hand back the headers they
/// computed and the caller decides how to attach them.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// Host the request will be sent to, including the port if any.
    pub host: String,
    /// HTTP path, already percent-escaped as it appears on the wire.
    pub path: String,
    /// HTTP query parameters, percent-decoded.
    ///
    /// A name may appear several times to carry several values.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Create a signing request without query or headers.
    pub fn new(method: Method, host: impl Into<String>, path: impl Into<String>) -> Self {
        SigningRequest {
            method,
            host: host.into(),
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Build a signing request from `http::request::Parts`.
    ///
    /// The host is taken from the uri authority, falling back to the `host`
    /// header for origin-form uris.
    pub fn build(parts: &Parts) -> Result<Self> {
        let host = match parts.uri.authority() {
            Some(authority) => authority.as_str().to_string(),
            None => parts
                .headers
                .get(header::HOST)
                .ok_or_else(|| Error::request_invalid("request without host is invalid for signing"))?
                .to_str()?
                .to_string(),
        };

        Ok(SigningRequest {
            method: parts.method.clone(),
            host,
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(parse_query).transpose()?.unwrap_or_default(),
            headers: parts.headers.clone(),
        })
    }

    /// Add a query parameter, keeping any existing values for the same name.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_push(key, value);
        self
    }

    /// Add a header value, keeping any existing values for the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Get header names as sorted vector.
    ///
    /// `HeaderName` is always lower-case, every name shows up once no matter
    /// how many values it carries.
    pub fn header_name_to_vec_sorted(&self) -> Vec<&str> {
        let mut h = self
            .headers
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<&str>>();
        h.sort_unstable();

        h
    }
}

/// Parse a raw query string into decoded pairs.
///
/// `+` is decoded as a space. A component that doesn't decode to valid utf-8
/// is rejected: it can't be re-encoded to the bytes sent on the wire.
fn parse_query(query: &str) -> Result<Vec<(String, String)>> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| -> Result<(String, String)> {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode_query_component(k)?, decode_query_component(v)?))
        })
        .collect()
}

fn decode_query_component(raw: &str) -> Result<String> {
    let unplussed = raw.replace('+', " ");
    match percent_decode_str(&unplussed).decode_utf8() {
        Ok(v) => Ok(v.into_owned()),
        Err(e) => Err(Error::request_invalid(format!(
            "query component {raw} is not valid utf-8 once decoded"
        ))
        .with_source(e)),
    }
}
