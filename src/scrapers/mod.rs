//! Scraping pipeline for The Star (thestar.com.my).
//!
//! Scraping follows the same two-phase pattern for every run:
//!
//! 1. **Indexing**: Discover article links from the homepage or tag pages
//! 2. **Fetching**: Download each article page and extract its fields
//!
//! | Stage | Module | Notes |
//! |-------|--------|-------|
//! | Link discovery | [`links`] | Homepage links are filtered, tag links are not |
//! | Field extraction | [`article`] | Category, date and filtered story paragraphs |
//! | Batch fetching | [`batch`] | Bounded worker pool, per-article failure isolation |
//!
//! Failed requests are logged and skipped; a run that finds or fetches
//! nothing still completes with an empty result.

pub mod article;
pub mod batch;
pub mod links;

use crate::utils::collapse_whitespace;
use scraper::ElementRef;

/// Text content of an element: text nodes concatenated as-is, then runs of
/// whitespace collapsed to one space and the ends trimmed.
pub(crate) fn element_text(el: &ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}
