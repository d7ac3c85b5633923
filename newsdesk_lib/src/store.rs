//! Storage seams for bookmarks and user preferences.

use newsapi_client::types::Article;

/// Saved articles, keyed by URL.
pub trait BookmarkStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Saves `article`, replacing any bookmark with the same URL.
    fn save_bookmark(&self, article: &Article) -> Result<(), Self::Error>;

    /// Every bookmark in the order it was first saved.
    fn fetch_all_bookmarks(&self) -> Result<Vec<Article>, Self::Error>;

    /// Removes the bookmark for `url`. Unknown URLs are ignored.
    fn remove_bookmark(&self, url: &str) -> Result<(), Self::Error>;

    fn all_bookmark_urls(&self) -> Result<Vec<String>, Self::Error>;

    fn is_bookmarked(&self, url: &str) -> Result<bool, Self::Error> {
        Ok(self.all_bookmark_urls()?.iter().any(|u| u == url))
    }

    /// Saves `article` if it is not bookmarked yet, removes it otherwise.
    /// Returns whether it is bookmarked afterwards.
    fn toggle_bookmark(&self, article: &Article) -> Result<bool, Self::Error> {
        let url = article.url.as_deref().unwrap_or_default();
        if self.is_bookmarked(url)? {
            self.remove_bookmark(url)?;
            Ok(false)
        } else {
            self.save_bookmark(article)?;
            Ok(true)
        }
    }
}

/// A string key-value store for small settings.
pub trait PreferenceStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get_string(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn set_string(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}
