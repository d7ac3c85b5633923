//! News sources returned by the sources endpoint.

use serde::{Deserialize, Serialize};

/// Identifier of a news source (e.g. "abc-news-au").
pub type SourceID = String;

/// A news publisher that can be used as a headlines filter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Source {
    pub id: Option<SourceID>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

/// Envelope for `/v2/top-headlines/sources`.
///
/// Every field may be absent on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SourcesResponse {
    pub status: Option<String>,
    pub sources: Option<Vec<Source>>,
}
