use tokio_util::sync::CancellationToken;

use crate::{
    client::NetworkClient,
    endpoint::{Endpoint, EndpointConfig, NewsRoute},
    logging::Logger,
    transport::Transport,
    types::{Article, NewsResponse, Source, SourcesResponse},
    Error,
};

/// News API operations on top of a [`NetworkClient`].
pub struct NewsApiService<T, L> {
    client: NetworkClient<T, L>,
    config: EndpointConfig,
}

impl<T: Transport, L: Logger> NewsApiService<T, L> {
    pub fn new(client: NetworkClient<T, L>, config: EndpointConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn client(&self) -> &NetworkClient<T, L> {
        &self.client
    }

    /// Top headlines for `source`. A reply without `articles` yields an
    /// empty list.
    pub async fn fetch_headlines(
        &self,
        source: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Article>, Error> {
        let descriptor = self
            .config
            .endpoint(NewsRoute::Headlines {
                source: source.to_string(),
            })
            .descriptor()?;
        let resp: NewsResponse = self.client.request(&descriptor, cancel).await?;
        tracing::debug!(
            source,
            total_results = ?resp.total_results,
            "fetched headlines"
        );
        Ok(resp.articles.unwrap_or_default())
    }

    /// Every source for the configured language and country.
    pub async fn fetch_all_sources(&self, cancel: &CancellationToken) -> Result<Vec<Source>, Error> {
        let descriptor = self.config.endpoint(NewsRoute::Sources).descriptor()?;
        let resp: SourcesResponse = self.client.request(&descriptor, cancel).await?;
        Ok(resp.sources.unwrap_or_default())
    }
}
