mod article;
pub use self::article::{Article, ArticleSource, NewsResponse};

mod source;
pub use self::source::{Source, SourceID, SourcesResponse};
