//! # Star News
//!
//! A news scraping and analysis tool for The Star (thestar.com.my). It
//! discovers article links on the homepage or on tag timelines, fetches the
//! articles concurrently, extracts their fields, and keeps them in a local
//! JSON store keyed by headline. Stored articles can then be scored for
//! sentiment or summarized.
//!
//! ## Usage
//!
//! ```sh
//! star_news scrape
//! star_news scrape --tag flood --tag politics
//! star_news news --tag flood
//! star_news sentiment <id>
//! star_news summarize <id>
//! star_news reset
//! ```
//!
//! ## Architecture
//!
//! Scraping follows a pipeline:
//! 1. **Indexing**: Discover candidate article links
//! 2. **Fetching**: Download and extract every candidate (5 at a time)
//! 3. **Storing**: Upsert the extracted articles by headline
//! 4. **Output**: Print the stored articles as JSON

use clap::Parser;
use std::error::Error;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod http;
mod models;
mod output;
mod scrapers;
mod sentiment;
mod store;
mod summarize;
mod utils;

use cli::{Cli, Command};
use config::ScraperConfig;
use http::{HttpFetcher, PageFetcher};
use output::{print_json, write_json};
use scrapers::batch::fetch_all;
use scrapers::links::{DiscoveryScope, discover};
use sentiment::SentimentAggregator;
use sentiment::vader::VaderScorer;
use serde::Serialize;
use store::JsonFileStore;
use summarize::{FrequencySummarizer, Summarizer};
use utils::ensure_writable_parent;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr; stdout carries the JSON output) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = args
        .apply_overrides(ScraperConfig::load(args.config.as_deref()).await?)
        .sanitized();
    info!(
        base_url = %config.base_url,
        workers = config.workers,
        timeout_secs = config.timeout_secs,
        "star_news starting up"
    );

    match &args.command {
        Command::Scrape { tags } => {
            let fetcher = HttpFetcher::new(config.timeout())?;
            scrape(&fetcher, &config, &args.store, tags, std::io::stdout()).await?
        }
        Command::News { tags } => news(&args.store, tags).await?,
        Command::Reset => reset(&args.store).await?,
        Command::Sentiment { id } => sentiment(&args.store, *id).await?,
        Command::Summarize { id } => summarize(&config, &args.store, *id).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

fn tag_filter(tags: &[String]) -> Option<&[String]> {
    (!tags.is_empty()).then_some(tags)
}

/// Discover, fetch, store, then write the stored articles to `out`.
///
/// Store failures are logged and the freshly fetched articles are written
/// instead; a scrape never fails because of the store.
#[instrument(level = "info", skip(fetcher, config, out))]
async fn scrape<F: PageFetcher, W: Write>(
    fetcher: &F,
    config: &ScraperConfig,
    store_path: &Path,
    tags: &[String],
    out: W,
) -> Result<(), Box<dyn Error>> {
    let scope = if tags.is_empty() {
        DiscoveryScope::Latest
    } else {
        DiscoveryScope::Tags(tags.to_vec())
    };

    let candidates = discover(fetcher, config, &scope).await;
    let report = fetch_all(fetcher, candidates, config.workers, config.timeout()).await;
    for (url, reason) in &report.skipped {
        debug!(%url, %reason, "Skipped candidate");
    }

    info!("Updating store with scraped data");
    match save(store_path, report.records.clone()).await {
        Ok(store) => {
            info!(stored = store.len(), "Store updated");
            write_json(&store.find_all(tag_filter(tags)), out)?
        }
        Err(e) => {
            error!(path = %store_path.display(), error = %e, "Error updating store; returning scraped articles");
            write_json(&report.records, out)?
        }
    }
    info!("Scraping process completed");
    Ok(())
}

async fn save(
    store_path: &Path,
    records: Vec<models::ArticleRecord>,
) -> Result<JsonFileStore, Box<dyn Error>> {
    ensure_writable_parent(store_path).await?;
    let mut store = JsonFileStore::open(store_path).await?;
    store.upsert_by_name(records).await?;
    Ok(store)
}

#[instrument(level = "info")]
async fn news(store_path: &Path, tags: &[String]) -> Result<(), Box<dyn Error>> {
    let store = JsonFileStore::open(store_path).await?;
    let articles = store.find_all(tag_filter(tags));
    info!(count = articles.len(), "Obtained stored news");
    print_json(&articles)
}

#[instrument(level = "info")]
async fn reset(store_path: &Path) -> Result<(), Box<dyn Error>> {
    let mut store = JsonFileStore::open(store_path).await?;
    let removed = store.reset().await?;
    print_json(&serde_json::json!({ "status": "success", "removed": removed }))
}

#[derive(Serialize)]
struct Summary<'a> {
    id: Uuid,
    name: &'a str,
    summary: String,
}

#[instrument(level = "info")]
async fn sentiment(store_path: &Path, id: Uuid) -> Result<(), Box<dyn Error>> {
    let store = JsonFileStore::open(store_path).await?;
    let target = store.find_by_id(id)?;

    let scorer = VaderScorer::default();
    let aggregator = SentimentAggregator::new(Arc::new(scorer));
    let result = aggregator.analyse(&target.article).await?;
    print_json(&result)
}

#[instrument(level = "info", skip(config))]
async fn summarize(config: &ScraperConfig, store_path: &Path, id: Uuid) -> Result<(), Box<dyn Error>> {
    let store = JsonFileStore::open(store_path).await?;
    let target = store.find_by_id(id)?;

    if target.article.content.is_empty() {
        warn!(%id, "Article has no content to summarize");
    }
    let summarizer = FrequencySummarizer::new(config.summary_sentences);
    print_json(&Summary {
        id,
        name: &target.article.name,
        summary: summarizer.summarize(&target.article.content),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::StubFetcher;
    use crate::models::{ArticleRecord, StoredArticle};

    const HOME_URL: &str = "https://www.thestar.com.my/";
    const ARTICLE_URL: &str = "https://www.thestar.com.my/news/nation/2026/02/16/flood-warning-issued";
    const ARTICLE: &str = r#"
        <a class="kicker">Nation</a><span class="date"> Monday, 16 Feb 2026 </span>
        <div id="story-body"><p>Rivers in Kelantan rose overnight after heavy rain.</p></div>
    "#;

    fn home_fetcher() -> StubFetcher {
        let home = format!(
            r#"<div class="focus-story"><a href="{ARTICLE_URL}">Flood warning issued for Kelantan</a></div>"#
        );
        StubFetcher::new()
            .page(HOME_URL, &home)
            .page(ARTICLE_URL, ARTICLE)
    }

    async fn run_scrape(fetcher: &StubFetcher, store_path: &Path, tags: &[String]) -> Vec<u8> {
        let mut out = Vec::new();
        scrape(fetcher, &ScraperConfig::default(), store_path, tags, &mut out)
            .await
            .unwrap();
        out
    }

    #[tokio::test]
    async fn test_scrape_writes_stored_articles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let out = run_scrape(&home_fetcher(), &path, &[]).await;
        let printed: Vec<StoredArticle> = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed.len(), 1);
        assert_eq!(printed[0].article.name, "Flood warning issued for Kelantan");
        assert_eq!(printed[0].article.category, "Nation");

        let store = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(store.find_by_id(printed[0].id).unwrap().article.url, ARTICLE_URL);
    }

    #[tokio::test]
    async fn test_scrape_corrupt_store_writes_fetched_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let out = run_scrape(&home_fetcher(), &path, &[]).await;
        let printed: Vec<ArticleRecord> = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed.len(), 1);
        assert_eq!(printed[0].url, ARTICLE_URL);
        assert_eq!(
            printed[0].content,
            "Rivers in Kelantan rose overnight after heavy rain."
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn test_scrape_unwritable_store_writes_fetched_records() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "").unwrap();

        let out = run_scrape(&home_fetcher(), &blocker.join("store.json"), &[]).await;
        let printed: Vec<ArticleRecord> = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed.len(), 1);
        assert_eq!(printed[0].name, "Flood warning issued for Kelantan");
    }

    #[tokio::test]
    async fn test_scrape_tags_limits_output_to_those_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = JsonFileStore::open(&path).await.unwrap();
        store
            .upsert_by_name(vec![ArticleRecord {
                name: "Haze returns to the Klang Valley".to_string(),
                url: "https://www.thestar.com.my/news/nation/haze".to_string(),
                category: "Nation".to_string(),
                published_date: "Unknown".to_string(),
                content: String::new(),
                tag: "haze".to_string(),
            }])
            .await
            .unwrap();

        let timeline = format!(
            r#"<div class="timeline-content"><h2><a href="{ARTICLE_URL}">Flood warning</a></h2></div>"#
        );
        let fetcher = StubFetcher::new()
            .page("https://www.thestar.com.my/news/latest?tag=flood", &timeline)
            .page(ARTICLE_URL, ARTICLE);

        let out = run_scrape(&fetcher, &path, &["flood".to_string()]).await;
        let printed: Vec<StoredArticle> = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed.len(), 1);
        assert_eq!(printed[0].article.tag, "flood");
        assert_eq!(printed[0].article.name, "Flood warning");

        assert_eq!(JsonFileStore::open(&path).await.unwrap().len(), 2);
    }
}
