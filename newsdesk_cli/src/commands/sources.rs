use anyhow::Result;
use newsdesk_lib::SourcePreferences;

use super::Context;
use crate::output::print_sources;

pub async fn run(ctx: &Context) -> Result<()> {
    let db = ctx.open_db()?;
    let selected = SourcePreferences::new(&db).selected_source_id()?;

    let client = ctx.news_client()?;
    let sources = client.fetch_all_sources(&ctx.cancel).await?;

    eprintln!(
        "{} sources ({}, {})",
        sources.len(),
        client.config().language,
        client.config().country
    );
    print_sources(&sources, &selected, &ctx.format)
}
