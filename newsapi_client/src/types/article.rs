//! Articles returned by the top-headlines endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The publisher an article is attributed to. Both fields may be null.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A single news article.
///
/// Every field is optional upstream; the URL doubles as the article's
/// identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Option<ArticleSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    /// ISO 8601 publication time.
    pub published_at: Option<DateTime<Utc>>,
    pub content: Option<String>,
}

impl Article {
    /// The article's identity (its URL).
    pub fn id(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }
}

/// Envelope for `/v2/top-headlines`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub status: Option<String>,
    pub total_results: Option<i64>,
    pub articles: Option<Vec<Article>>,
}
