//! SQLite storage for bookmarks and preferences.

use std::path::Path;

use chrono::{DateTime, Utc};
use newsapi_client::types::Article;
use rusqlite::{params, Connection, OptionalExtension};

use crate::store::{BookmarkStore, PreferenceStore};

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("date parse error: {0}")]
    Date(#[from] chrono::ParseError),
    #[error("article has no url")]
    MissingUrl,
}

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn init(&self) -> Result<(), DbError> {
        let version: i32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            let schema = include_str!("../../schema/sqlite.sql");
            self.conn.execute_batch(schema)?;
            self.conn.pragma_update(None, "user_version", 1)?;
        }

        Ok(())
    }

    pub fn bookmark_count(&self) -> Result<i64, DbError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn parse_published_at(raw: Option<String>) -> Result<Option<DateTime<Utc>>, DbError> {
    raw.map(|s| DateTime::parse_from_rfc3339(&s).map(|dt| dt.with_timezone(&Utc)))
        .transpose()
        .map_err(DbError::from)
}

impl BookmarkStore for Db {
    type Error = DbError;

    fn save_bookmark(&self, article: &Article) -> Result<(), DbError> {
        let url = article.url.as_deref().ok_or(DbError::MissingUrl)?;
        let published_at = article.published_at.map(|dt| dt.to_rfc3339());
        self.conn.execute(
            "INSERT INTO bookmarks
                (url, author, title, description, url_to_image, published_at, saved_at, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7,
                (SELECT COALESCE(MAX(position), 0) + 1 FROM bookmarks))
             ON CONFLICT(url) DO UPDATE SET
                author = excluded.author,
                title = excluded.title,
                description = excluded.description,
                url_to_image = excluded.url_to_image,
                published_at = excluded.published_at,
                saved_at = excluded.saved_at",
            params![
                url,
                article.author,
                article.title,
                article.description,
                article.url_to_image,
                published_at,
                Utc::now().to_rfc3339(),
            ],
        )?;
        tracing::debug!(url, "bookmark saved");
        Ok(())
    }

    fn fetch_all_bookmarks(&self) -> Result<Vec<Article>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT url, author, title, description, url_to_image, published_at
             FROM bookmarks ORDER BY position",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })?;

        let mut articles = Vec::new();
        for row in rows {
            let (url, author, title, description, url_to_image, published_at) = row?;
            articles.push(Article {
                source: None,
                author,
                title,
                description,
                url: Some(url),
                url_to_image,
                published_at: parse_published_at(published_at)?,
                content: None,
            });
        }
        Ok(articles)
    }

    fn remove_bookmark(&self, url: &str) -> Result<(), DbError> {
        let removed = self
            .conn
            .execute("DELETE FROM bookmarks WHERE url = ?1", params![url])?;
        tracing::debug!(url, removed, "bookmark removed");
        Ok(())
    }

    fn all_bookmark_urls(&self) -> Result<Vec<String>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT url FROM bookmarks ORDER BY position")?;
        let urls = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(urls)
    }

    fn is_bookmarked(&self, url: &str) -> Result<bool, DbError> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM bookmarks WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl PreferenceStore for Db {
    type Error = DbError;

    fn get_string(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DbError> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
        Ok(())
    }
}
