//! Article link discovery from The Star listing pages.
//!
//! Two listing sources are supported:
//!
//! - **Latest**: the homepage, where story links sit inside
//!   `div.in-sec-story` and `div.focus-story` blocks. These are mixed with
//!   section labels, captions and lifestyle content, so they are filtered.
//! - **Tags**: `<tag_url><tag>` timeline pages, where every
//!   `div.timeline-content h2 a` is an article. These are taken as-is and
//!   stamped with the tag.
//!
//! Within one discovery pass no two candidates share a normalized URL.

use crate::config::ScraperConfig;
use crate::http::{PageFetcher, get_page};
use crate::models::Candidate;
use crate::scrapers::element_text;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Shorter anchor texts are captions or fragments, not headlines.
pub const MIN_TITLE_CHARS: usize = 15;

/// Sections that live under `/news/` on paper but are not news.
pub const EXCLUDED_SECTIONS: &[&str] = &[
    "/lifestyle/",
    "/food/",
    "/tech/",
    "/travel/",
    "/business/",
    "/entertainment/",
    "/culture/",
];

static STORY_LINKS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.in-sec-story a, div.focus-story a").expect("valid story selector")
});
static TIMELINE_LINKS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.timeline-content h2 a").expect("valid timeline selector")
});

/// Which listing pages to discover links from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryScope {
    /// The site homepage.
    Latest,
    /// One timeline page per tag.
    Tags(Vec<String>),
}

/// Discover article candidates for `scope`.
///
/// Never fails: a listing page that cannot be fetched or understood is
/// logged and contributes no candidates.
#[instrument(level = "info", skip(fetcher, config))]
pub async fn discover<F: PageFetcher>(
    fetcher: &F,
    config: &ScraperConfig,
    scope: &DiscoveryScope,
) -> Vec<Candidate> {
    let base = match Url::parse(&config.base_url) {
        Ok(base) => base,
        Err(e) => {
            error!(base_url = %config.base_url, error = %e, "Invalid base url; nothing to discover");
            return Vec::new();
        }
    };

    let candidates = match scope {
        DiscoveryScope::Latest => discover_latest(fetcher, config, &base).await,
        DiscoveryScope::Tags(tags) => discover_tags(fetcher, config, &base, tags).await,
    };

    info!(count = candidates.len(), "Discovered article candidates");
    debug!(urls = ?candidates.iter().map(|c| &c.url).collect::<Vec<_>>(), "Candidate URLs");
    candidates
}

async fn discover_latest<F: PageFetcher>(
    fetcher: &F,
    config: &ScraperConfig,
    base: &Url,
) -> Vec<Candidate> {
    match get_page(fetcher, base.as_str(), config.timeout()).await {
        Ok(html) => parse_story_links(&html, base),
        Err(e) => {
            error!(url = %base, error = %e, "Error getting articles to scrape");
            Vec::new()
        }
    }
}

async fn discover_tags<F: PageFetcher>(
    fetcher: &F,
    config: &ScraperConfig,
    base: &Url,
    tags: &[String],
) -> Vec<Candidate> {
    let per_tag: Vec<Vec<Candidate>> = stream::iter(tags.iter().map(|t| t.trim()))
        .filter(|tag| std::future::ready(!tag.is_empty()))
        .then(|tag| async move {
            let url = tag_listing_url(&config.tag_url, tag);
            match get_page(fetcher, &url, config.timeout()).await {
                Ok(html) => {
                    let found = parse_tag_links(&html, base, tag);
                    info!(%tag, count = found.len(), "Indexed tag listing");
                    found
                }
                Err(e) => {
                    error!(%tag, %url, error = %e, "Error getting articles by tag");
                    Vec::new()
                }
            }
        })
        .collect()
        .await;

    per_tag
        .into_iter()
        .flatten()
        .unique_by(|c| c.url.clone())
        .collect()
}

/// Build the listing URL for one tag.
pub fn tag_listing_url(tag_url: &str, tag: &str) -> String {
    format!("{}{}", tag_url, urlencoding::encode(tag))
}

/// Extract and filter homepage story links.
pub fn parse_story_links(html: &str, base: &Url) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for anchor in document.select(&STORY_LINKS) {
        let title = element_text(&anchor);
        let href = anchor.value().attr("href").unwrap_or("").trim();
        if title.is_empty() || href.is_empty() {
            continue;
        }
        if title.chars().count() < MIN_TITLE_CHARS {
            continue;
        }
        let Some(url) = normalize_url(base, href) else {
            continue;
        };
        if seen.contains(url.as_str()) {
            continue;
        }
        if !is_news_url(&url, base) || is_all_caps(&title) || is_excluded_section(&url) {
            continue;
        }

        seen.insert(url.to_string());
        candidates.push(Candidate {
            title,
            url: url.into(),
            tag: String::new(),
        });
    }
    candidates
}

/// Extract every timeline link, stamped with `tag`. Only href-less anchors
/// are dropped.
pub fn parse_tag_links(html: &str, base: &Url, tag: &str) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    document
        .select(&TIMELINE_LINKS)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            let url = normalize_url(base, href)?;
            Some(Candidate {
                title: element_text(&anchor),
                url: url.into(),
                tag: tag.to_string(),
            })
        })
        .unique_by(|c| c.url.clone())
        .collect()
}

/// Resolve `href` against the site origin and drop query and fragment.
///
/// Returns `None` for unparseable or non-HTTP links (`mailto:`,
/// `javascript:`).
pub fn normalize_url(base: &Url, href: &str) -> Option<Url> {
    let mut url = base.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_query(None);
    url.set_fragment(None);
    Some(url)
}

fn is_news_url(url: &Url, base: &Url) -> bool {
    url.scheme() == base.scheme()
        && url.host_str() == base.host_str()
        && url.path().starts_with("/news/")
}

/// Section labels are written in capitals ("NATION", "WORLD").
fn is_all_caps(title: &str) -> bool {
    title.to_uppercase() == title
}

fn is_excluded_section(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    EXCLUDED_SECTIONS.iter().any(|section| path.contains(section))
}
