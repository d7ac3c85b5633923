//! Wiring for the production news client: reqwest transport, tracing sink.

use std::time::Duration;

use newsapi_client::{EndpointConfig, Logger, NetworkClient, NewsApiService};

use crate::error::NewsdeskError;
use crate::logger::TracingLogger;
use crate::transport::{ReqwestTransport, DEFAULT_TIMEOUT};
use crate::validation::{validate_country, validate_language};

/// The news service as the CLI runs it.
pub type NewsClient = NewsApiService<ReqwestTransport, TracingLogger>;

/// Settings read from the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: EndpointConfig,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: EndpointConfig::new(api_key),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads `NEWSAPI_API_KEY` (required), `NEWSAPI_BASE_URL`,
    /// `NEWSAPI_LANGUAGE`, `NEWSAPI_COUNTRY` and `NEWSDESK_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, NewsdeskError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, NewsdeskError> {
        let api_key = lookup("NEWSAPI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                NewsdeskError::InvalidInput(
                    "NEWSAPI_API_KEY is not set. Add it to the environment or a .env file"
                        .to_string(),
                )
            })?;
        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup("NEWSAPI_BASE_URL") {
            config.endpoint = config.endpoint.with_base_url(&base_url);
        }
        if let Some(language) = lookup("NEWSAPI_LANGUAGE") {
            config.endpoint = config.endpoint.with_language(&validate_language(&language)?);
        }
        if let Some(country) = lookup("NEWSAPI_COUNTRY") {
            config.endpoint = config.endpoint.with_country(&validate_country(&country)?);
        }
        config.timeout = Duration::from_secs(parse_u64(
            lookup("NEWSDESK_HTTP_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT.as_secs(),
        ));
        Ok(config)
    }

    /// Points the client at a different host. Used for testing.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.endpoint = self.endpoint.with_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<NewsClient, NewsdeskError> {
        tracing::debug!(config = ?self.endpoint, timeout = ?self.timeout, "building news client");
        let transport = ReqwestTransport::with_timeout(self.timeout)?;
        let logger = TracingLogger::network();
        logger.log_sensitive("Using API key", &self.endpoint.api_key);
        let client = NetworkClient::new(transport, logger);
        Ok(NewsApiService::new(client, self.endpoint))
    }
}

fn parse_u64(value: Option<String>, default: u64) -> u64 {
    value
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
