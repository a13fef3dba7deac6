//! Article page fetching and field extraction.
//!
//! Article pages on The Star carry the section name in an `a.kicker` link,
//! the publication date in a `.date` element and the story itself as `<p>`
//! elements inside `#story-body`. The story body is interleaved with ad
//! slots, newsletter prompts and "read also" links, which are dropped.
//!
//! Missing elements never fail extraction: category and date fall back to
//! [`UNKNOWN`] and a page without a story body yields empty content.

use crate::http::{PageFetcher, get_page};
use crate::models::{ArticleRecord, Candidate, FetchOutcome, SkipReason, UNKNOWN};
use crate::scrapers::element_text;
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Paragraphs this short (after trimming) are bylines, captions or labels.
pub const MIN_PARAGRAPH_CHARS: usize = 10;

/// Lower-case markers of non-story paragraphs.
pub const BOILERPLATE_MARKERS: &[&str] = &[
    "advertisement",
    "subscribe",
    "read also",
    "related story",
    "watching:",
];

static KICKER: Lazy<Selector> = Lazy::new(|| Selector::parse("a.kicker").expect("valid selector"));
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse(".date").expect("valid selector"));
static STORY_BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#story-body").expect("valid selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));

/// Fetch one candidate's page and extract it.
///
/// Any failure is logged and reported as [`FetchOutcome::Skipped`]; this
/// function never returns an error.
#[instrument(level = "info", skip_all, fields(url = %candidate.url))]
pub async fn fetch_article<F: PageFetcher>(
    fetcher: &F,
    candidate: Candidate,
    timeout: Duration,
) -> FetchOutcome {
    if candidate.url.trim().is_empty() {
        warn!(title = %candidate.title, "Candidate has no url; skipping");
        return FetchOutcome::Skipped {
            url: candidate.url,
            reason: SkipReason::MissingUrl,
        };
    }

    match get_page(fetcher, &candidate.url, timeout).await {
        Ok(html) => {
            let record = extract_article(&html, &candidate);
            debug!(
                bytes = record.content.len(),
                category = %record.category,
                preview = %truncate_for_log(&record.content, 80),
                "Parsed article"
            );
            FetchOutcome::Fetched(record)
        }
        Err(e) => {
            warn!(error = %e, title = %candidate.title, "Error requesting article; skipping");
            FetchOutcome::Skipped {
                url: candidate.url,
                reason: SkipReason::Fetch(e),
            }
        }
    }
}

/// Build an [`ArticleRecord`] from an article page.
pub fn extract_article(html: &str, candidate: &Candidate) -> ArticleRecord {
    let document = Html::parse_document(html);

    let category = document
        .select(&KICKER)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let published_date = document
        .select(&DATE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let content = match document.select(&STORY_BODY).next() {
        Some(body) => body
            .select(&PARAGRAPH)
            .map(|p| element_text(&p))
            .filter(|text| is_story_paragraph(text))
            .collect::<Vec<_>>()
            .join(" "),
        None => String::new(),
    };

    ArticleRecord {
        name: candidate.title.clone(),
        url: candidate.url.clone(),
        category,
        published_date,
        content,
        tag: candidate.tag.clone(),
    }
}

/// Keep paragraphs longer than [`MIN_PARAGRAPH_CHARS`] that carry no
/// boilerplate marker.
pub fn is_story_paragraph(text: &str) -> bool {
    if text.chars().count() <= MIN_PARAGRAPH_CHARS {
        return false;
    }
    let lower = text.to_lowercase();
    !BOILERPLATE_MARKERS.iter().any(|m| lower.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::http::testing::StubFetcher;

    const ARTICLE: &str = r#"
        <html><body>
          <a class="kicker" href="/news/nation">Nation</a>
          <a class="kicker" href="/news/world">World</a>
          <p class="date">
              Monday, 16 Feb 2026
          </p>
          <div id="story-body">
            <p>KOTA BHARU: The Meteorological Department has issued a flood warning.</p>
            <p>ADVERTISEMENT</p>
            <p>Short.</p>
            <p>Residents are advised to move to higher ground.</p>
            <p>Read Also: Rain to continue until Friday, says MetMalaysia</p>
            <p>Subscribe to our newsletter for the latest updates</p>
            <div class="inline"><p>Relief centres have been opened in   three districts.</p></div>
            <p>Watching: Flood waters rise in Kelantan</p>
          </div>
          <p>Paragraph outside the story body should be ignored.</p>
        </body></html>
    "#;

    fn candidate() -> Candidate {
        Candidate {
            title: "Flood warning issued for Kelantan".to_string(),
            url: "https://www.thestar.com.my/news/nation/2026/02/16/flood".to_string(),
            tag: "flood".to_string(),
        }
    }

    #[test]
    fn test_extract_article_fields() {
        let record = extract_article(ARTICLE, &candidate());
        assert_eq!(record.name, "Flood warning issued for Kelantan");
        assert_eq!(record.url, "https://www.thestar.com.my/news/nation/2026/02/16/flood");
        assert_eq!(record.tag, "flood");
        assert_eq!(record.category, "Nation");
        assert_eq!(record.published_date, "Monday, 16 Feb 2026");
        assert_eq!(
            record.content,
            "KOTA BHARU: The Meteorological Department has issued a flood warning. \
             Residents are advised to move to higher ground. \
             Relief centres have been opened in three districts."
        );
    }

    #[test]
    fn test_extract_article_defaults() {
        let html = "<html><body><h1>Nothing here</h1><p>Loose paragraph text here.</p></body></html>";
        let record = extract_article(html, &candidate());
        assert_eq!(record.category, UNKNOWN);
        assert_eq!(record.published_date, UNKNOWN);
        assert_eq!(record.content, "");
    }

    #[test]
    fn test_extract_article_empty_story_body() {
        let html = r#"<div id="story-body"><p>tiny</p></div>"#;
        let record = extract_article(html, &candidate());
        assert_eq!(record.content, "");
    }

    #[test]
    fn test_is_story_paragraph() {
        assert!(!is_story_paragraph("0123456789"));
        assert!(is_story_paragraph("0123456789a"));
        assert!(!is_story_paragraph("Please SUBSCRIBE for more stories"));
        assert!(!is_story_paragraph("Related Story: Another flood"));
        assert!(is_story_paragraph("The river burst its banks overnight."));
    }

    #[tokio::test]
    async fn test_fetch_article_success() {
        let c = candidate();
        let fetcher = StubFetcher::new().page(&c.url, ARTICLE);
        match fetch_article(&fetcher, c, Duration::from_secs(1)).await {
            FetchOutcome::Fetched(record) => assert_eq!(record.category, "Nation"),
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_article_status_is_skipped() {
        let c = candidate();
        let fetcher = StubFetcher::new().status(&c.url, 404);
        let outcome = fetch_article(&fetcher, c.clone(), Duration::from_secs(1)).await;
        assert_eq!(
            outcome,
            FetchOutcome::Skipped {
                url: c.url.clone(),
                reason: SkipReason::Fetch(FetchError::Status { url: c.url, status: 404 }),
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_article_without_url_is_skipped() {
        let fetcher = StubFetcher::new();
        let c = Candidate {
            url: String::new(),
            ..candidate()
        };
        let outcome = fetch_article(&fetcher, c, Duration::from_secs(1)).await;
        assert!(matches!(
            outcome,
            FetchOutcome::Skipped { reason: SkipReason::MissingUrl, .. }
        ));
        assert!(fetcher.requested().is_empty());
    }
}
