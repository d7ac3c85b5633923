use anyhow::Result;
use clap::Args;
use newsdesk_lib::validation;
use newsdesk_lib::{BookmarkStore, SourcePreferences};

use super::Context;
use crate::output::print_articles;

#[derive(Args)]
pub struct HeadlinesArgs {
    /// Source id (e.g. abc-news-au). Defaults to the selected source
    #[arg(long)]
    pub source: Option<String>,
}

pub async fn run(args: &HeadlinesArgs, ctx: &Context) -> Result<()> {
    let db = ctx.open_db()?;
    let source = match args.source {
        Some(ref s) => validation::validate_source_id(s)?,
        None => SourcePreferences::new(&db).selected_source_id()?,
    };

    let client = ctx.news_client()?;
    let articles = client.fetch_headlines(&source, &ctx.cancel).await?;
    let saved = db.all_bookmark_urls()?;

    eprintln!("{} headlines from {}", articles.len(), source);
    print_articles(&articles, &saved, &ctx.format)
}
