use anyhow::Result;
use chrono::{DateTime, Utc};
use newsdesk_lib::byline;
use newsdesk_lib::types::{Article, Source};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "json" => Self::Json,
            "csv" => Self::Csv,
            "md" | "markdown" => Self::Markdown,
            _ => Self::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ArticleRow {
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Byline")]
    #[serde(rename = "Byline")]
    byline: String,
    #[tabled(rename = "Saved")]
    #[serde(rename = "Saved")]
    saved: String,
    #[tabled(rename = "URL")]
    #[serde(rename = "URL")]
    url: String,
}

#[derive(Tabled, Serialize)]
struct SourceRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Country")]
    #[serde(rename = "Country")]
    country: String,
    #[tabled(rename = "Selected")]
    #[serde(rename = "Selected")]
    selected: String,
}

// -- Row builders --

fn build_article_rows(articles: &[Article], saved: &[String], now: DateTime<Utc>) -> Vec<ArticleRow> {
    articles
        .iter()
        .map(|a| {
            let url = a.url.clone().unwrap_or_default();
            ArticleRow {
                title: a.title.clone().unwrap_or_default(),
                byline: byline(a.published_at, a.author.as_deref(), now),
                saved: if saved.contains(&url) { "*".to_string() } else { String::new() },
                url,
            }
        })
        .collect()
}

fn build_source_rows(sources: &[Source], selected: &str) -> Vec<SourceRow> {
    sources
        .iter()
        .map(|s| SourceRow {
            id: s.id.clone().unwrap_or_default(),
            name: s.name.clone().unwrap_or_default(),
            category: s.category.clone().unwrap_or_default(),
            country: s.country.clone().unwrap_or_default(),
            selected: if s.id.as_deref() == Some(selected) {
                "*".to_string()
            } else {
                String::new()
            },
        })
        .collect()
}

// -- Printers --

pub fn print_articles(articles: &[Article], saved: &[String], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&articles),
        _ => print_rows(build_article_rows(articles, saved, Utc::now()), format)?,
    }
    Ok(())
}

pub fn print_sources(sources: &[Source], selected: &str, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&sources),
        _ => print_rows(build_source_rows(sources, selected), format)?,
    }
    Ok(())
}

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Table | OutputFormat::Json => println!("{}", Table::new(rows)),
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
