//! Plain-data request and response types exchanged with a [`Transport`].
//!
//! A [`RequestDescriptor`] is validated when it is built: the raw URL must be
//! an absolute `http`/`https` URL with a host, so anything else fails with
//! [`Error::InvalidUrl`] before any transport is involved.
//!
//! [`Transport`]: crate::Transport

use std::collections::BTreeMap;

use reqwest::Method;
use url::Url;

use crate::Error;

/// An immutable description of an outbound HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    url: Url,
    headers: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    /// Builds a descriptor for `method` against `raw_url`.
    ///
    /// Relative, host-less or non-HTTP URLs are rejected with
    /// [`Error::InvalidUrl`] carrying the raw string, secrets redacted.
    pub fn new(method: Method, raw_url: &str) -> Result<Self, Error> {
        let url = parse_request_url(raw_url)?;
        Ok(Self::with_checked_url(method, url))
    }

    /// Shorthand for a `GET` descriptor.
    pub fn get(raw_url: &str) -> Result<Self, Error> {
        Self::new(Method::GET, raw_url)
    }

    /// Builds a descriptor from an already-parsed URL, applying the same
    /// scheme and host check as [`new`](Self::new).
    pub fn from_url(method: Method, url: Url) -> Result<Self, Error> {
        if !is_request_url(&url) {
            return Err(rejected(url.as_str(), "unsupported scheme or missing host"));
        }
        Ok(Self::with_checked_url(method, url))
    }

    fn with_checked_url(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Adds a header. Names are lowercased, so setting the same header twice
    /// keeps only the last value.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Query parameters whose values are never echoed back in errors or logs.
const SECRET_QUERY_KEYS: &[&str] = &["apiKey"];

/// Parses `raw` as an absolute `http`/`https` URL with a host.
pub(crate) fn parse_request_url(raw: &str) -> Result<Url, Error> {
    match Url::parse(raw) {
        Ok(url) if is_request_url(&url) => Ok(url),
        Ok(_) => Err(rejected(raw, "unsupported scheme or missing host")),
        Err(e) => Err(rejected(raw, e)),
    }
}

fn is_request_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
}

fn rejected(raw: &str, why: impl std::fmt::Display) -> Error {
    let shown = redact_url(raw);
    tracing::debug!("Rejected URL {:?}: {}", shown, why);
    Error::InvalidUrl(shown)
}

/// `raw` with the values of secret query parameters replaced by `<private>`.
pub(crate) fn redact_url(raw: &str) -> String {
    let Some((base, query)) = raw.split_once('?') else {
        return raw.to_string();
    };
    let pairs: Vec<String> = query
        .split('&')
        .map(|pair| {
            let key = pair.split_once('=').map_or(pair, |(k, _)| k);
            if SECRET_QUERY_KEYS.contains(&key) {
                format!("{}=<private>", key)
            } else {
                pair.to_string()
            }
        })
        .collect();
    format!("{}?{}", base, pairs.join("&"))
}

/// The raw outcome of a transport call, before status validation or decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl ResponseEnvelope {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// True when the status code is one an HTTP server can send (100-599).
    pub fn is_http_shaped(&self) -> bool {
        (100..=599).contains(&self.status)
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// The body as UTF-8 text, or `None` if it is not valid UTF-8.
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}
