//! Command-line interface definitions for Star News.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. Settings can also come from environment variables or a YAML
//! config file; flags given here win over the file.

use crate::config::ScraperConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

/// Command-line arguments for the Star News application.
///
/// # Examples
///
/// ```sh
/// # Scrape the homepage and store the results
/// star_news scrape
///
/// # Scrape two tag timelines
/// star_news scrape --tag flood --tag "kuala lumpur"
///
/// # Score a stored article
/// star_news sentiment 67e55044-10b1-426f-9247-bb680e5fe0c8
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the JSON article store
    #[arg(short, long, global = true, env = "STAR_NEWS_STORE", default_value = "news_store.json")]
    pub store: PathBuf,

    /// Optional path to a config.yaml file
    #[arg(short, long, global = true, env = "STAR_NEWS_CONFIG")]
    pub config: Option<String>,

    /// Site origin to scrape
    #[arg(long, global = true, env = "STAR_NEWS_BASE_URL")]
    pub base_url: Option<String>,

    /// Prefix of tag listing pages
    #[arg(long, global = true, env = "STAR_NEWS_TAG_URL")]
    pub tag_url: Option<String>,

    /// Number of article pages fetched at once
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(short, long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Scrape the latest news (or the given tags) and store it
    Scrape {
        /// Scrape these tag timelines instead of the homepage
        #[arg(long = "tag", value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Print stored news
    News {
        /// Only print news scraped for these tags
        #[arg(long = "tag", value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Delete all stored news
    Reset,
    /// Aggregate sentiment of a stored article
    Sentiment { id: Uuid },
    /// Extractive summary of a stored article
    Summarize { id: Uuid },
}

impl Cli {
    /// Apply flag and environment overrides on top of `config`.
    pub fn apply_overrides(&self, mut config: ScraperConfig) -> ScraperConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(tag_url) = &self.tag_url {
            config.tag_url = tag_url.clone();
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        config
    }
}
