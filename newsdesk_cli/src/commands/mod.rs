//! CLI subcommand implementations.

pub mod bookmarks;
pub mod headlines;
pub mod source;
pub mod sources;

use std::path::PathBuf;

use anyhow::Result;
use newsdesk_lib::{ClientConfig, Db, NewsClient};
use tokio_util::sync::CancellationToken;

use crate::output::OutputFormat;

/// Shared state for one CLI invocation.
pub struct Context {
    pub format: OutputFormat,
    pub db_path: PathBuf,
    pub base_url: Option<String>,
    /// Fired on Ctrl-C.
    pub cancel: CancellationToken,
}

impl Context {
    pub fn open_db(&self) -> Result<Db> {
        let db = Db::open(&self.db_path)?;
        db.init()?;
        Ok(db)
    }

    /// Builds the news client from the environment, honouring `--base-url`.
    pub fn news_client(&self) -> Result<NewsClient> {
        let mut config = ClientConfig::from_env()?;
        if let Some(ref url) = self.base_url {
            config = config.with_base_url(url);
        }
        Ok(config.build()?)
    }
}
