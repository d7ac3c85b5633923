//! Endpoint resolution: semantic routes to URLs.
//!
//! Resolution is pure string work followed by a URL parse. A URL that does
//! not parse, or is not an `http`/`https` URL with a host, is rejected here
//! with [`Error::InvalidUrl`], so no transport is ever handed a malformed
//! address. The API key is redacted from the rejected string.

use std::fmt;

use url::{form_urlencoded, Url};

use crate::{
    http::{parse_request_url, RequestDescriptor},
    Error,
};

/// Something that knows its own URL.
pub trait Endpoint {
    /// The raw URL string, before validation.
    fn url_string(&self) -> String;

    /// Parses and checks [`url_string`](Self::url_string).
    fn resolve(&self) -> Result<Url, Error> {
        parse_request_url(&self.url_string())
    }

    /// A `GET` descriptor for this endpoint.
    fn descriptor(&self) -> Result<RequestDescriptor, Error> {
        RequestDescriptor::from_url(reqwest::Method::GET, self.resolve()?)
    }
}

/// Where the news API lives and how to authenticate against it.
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Base URL for the API. Defaults to `https://newsapi.org`.
    pub base_url: String,
    pub api_key: String,
    /// Language filter for the source listing. Defaults to `en`.
    pub language: String,
    /// Country filter for the source listing. Defaults to `au`.
    pub country: String,
}

impl EndpointConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            api_key: api_key.into(),
            language: "en".to_string(),
            country: "au".to_string(),
        }
    }

    /// Points the config at a different host. Used for testing with wiremock.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = country.to_string();
        self
    }

    pub fn endpoint(&self, route: NewsRoute) -> NewsEndpoint<'_> {
        NewsEndpoint {
            config: self,
            route,
        }
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<private>")
            .field("language", &self.language)
            .field("country", &self.country)
            .finish()
    }
}

/// The two news API routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsRoute {
    /// Top headlines for one source id.
    Headlines { source: String },
    /// Every source for the configured language and country.
    Sources,
}

/// A [`NewsRoute`] bound to its [`EndpointConfig`].
#[derive(Debug, Clone)]
pub struct NewsEndpoint<'a> {
    config: &'a EndpointConfig,
    route: NewsRoute,
}

impl Endpoint for NewsEndpoint<'_> {
    fn url_string(&self) -> String {
        let cfg = self.config;
        match &self.route {
            NewsRoute::Headlines { source } => format!(
                "{}/v2/top-headlines?sources={}&apiKey={}",
                cfg.base_url,
                encode(source),
                encode(&cfg.api_key)
            ),
            NewsRoute::Sources => format!(
                "{}/v2/top-headlines/sources?language={}&country={}&apiKey={}",
                cfg.base_url,
                encode(&cfg.language),
                encode(&cfg.country),
                encode(&cfg.api_key)
            ),
        }
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
