use anyhow::{bail, Result};
use clap::Subcommand;
use newsdesk_lib::validation;
use newsdesk_lib::{BookmarkStore, SourcePreferences};

use super::Context;
use crate::output::print_articles;

#[derive(Subcommand)]
pub enum BookmarksCommand {
    /// List saved articles
    List,
    /// Save an article from the current headlines
    Add {
        /// Article URL as shown by `headlines`
        url: String,
        /// Source to look the article up in. Defaults to the selected source
        #[arg(long)]
        source: Option<String>,
    },
    /// Save the article if it is not saved, remove it otherwise
    Toggle {
        url: String,
        #[arg(long)]
        source: Option<String>,
    },
    /// Remove a saved article
    Remove {
        url: String,
    },
}

pub async fn run(cmd: &BookmarksCommand, ctx: &Context) -> Result<()> {
    let db = ctx.open_db()?;

    match cmd {
        BookmarksCommand::List => {
            let bookmarks = db.fetch_all_bookmarks()?;
            let urls = db.all_bookmark_urls()?;
            eprintln!("{} bookmarks", bookmarks.len());
            print_articles(&bookmarks, &urls, &ctx.format)?;
        }
        BookmarksCommand::Add { url, source } => {
            let url = validation::validate_bookmark_url(url)?;
            let article = find_in_headlines(ctx, &db, &url, source.as_deref()).await?;
            db.save_bookmark(&article)?;
            eprintln!("Saved: {}", article.title.as_deref().unwrap_or(&url));
        }
        BookmarksCommand::Toggle { url, source } => {
            let url = validation::validate_bookmark_url(url)?;
            let saved = if db.is_bookmarked(&url)? {
                db.remove_bookmark(&url)?;
                false
            } else {
                let article = find_in_headlines(ctx, &db, &url, source.as_deref()).await?;
                db.toggle_bookmark(&article)?
            };
            eprintln!("{}: {}", if saved { "Saved" } else { "Removed" }, url);
        }
        BookmarksCommand::Remove { url } => {
            let url = validation::validate_bookmark_url(url)?;
            db.remove_bookmark(&url)?;
            eprintln!("Removed: {}", url);
        }
    }
    Ok(())
}

async fn find_in_headlines(
    ctx: &Context,
    db: &newsdesk_lib::Db,
    url: &str,
    source: Option<&str>,
) -> Result<newsdesk_lib::types::Article> {
    let source = match source {
        Some(s) => validation::validate_source_id(s)?,
        None => SourcePreferences::new(db).selected_source_id()?,
    };
    let client = ctx.news_client()?;
    let articles = client.fetch_headlines(&source, &ctx.cancel).await?;
    match articles.into_iter().find(|a| a.url.as_deref() == Some(url)) {
        Some(article) => Ok(article),
        None => bail!("no article with url {} in the current {} headlines", url, source),
    }
}
