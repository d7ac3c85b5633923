mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use newsdesk_lib::newsapi_client;
use newsdesk_lib::NewsdeskError;
use tokio_util::sync::CancellationToken;

use crate::commands::Context;
use crate::output::OutputFormat;

/// What the user sees for any failed news API call. Details go to the log.
const REQUEST_FAILED: &str = "Request failed, please try again later.";

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Read top headlines from NewsAPI and keep bookmarks")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// SQLite file for bookmarks and preferences
    #[arg(long, default_value = "newsdesk.db", global = true)]
    db: PathBuf,

    /// Override the API base URL (testing)
    #[arg(long, global = true, hide = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Top headlines for a source
    Headlines(commands::headlines::HeadlinesArgs),
    /// List available sources
    Sources,
    /// Show or change the selected source
    #[command(subcommand)]
    Source(commands::source::SourceCommand),
    /// Manage saved articles
    #[command(subcommand)]
    Bookmarks(commands::bookmarks::BookmarksCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("newsdesk=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let ctx = Context {
        format: OutputFormat::parse(&cli.output),
        db_path: cli.db,
        base_url: cli.base_url,
        cancel,
    };

    let result = match &cli.command {
        Commands::Headlines(args) => commands::headlines::run(args, &ctx).await,
        Commands::Sources => commands::sources::run(&ctx).await,
        Commands::Source(cmd) => commands::source::run(cmd, &ctx),
        Commands::Bookmarks(cmd) => commands::bookmarks::run(cmd, &ctx).await,
    };

    if let Err(e) = result {
        if is_request_failure(&e) {
            tracing::debug!(error = %e, "request failed");
            eprintln!("{}", REQUEST_FAILED);
            std::process::exit(1);
        }
        return Err(e);
    }

    Ok(())
}

fn is_request_failure(e: &anyhow::Error) -> bool {
    e.downcast_ref::<newsapi_client::Error>().is_some()
        || e.downcast_ref::<NewsdeskError>()
            .is_some_and(NewsdeskError::is_network)
}
