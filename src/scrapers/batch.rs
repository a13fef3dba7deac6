//! Concurrent fetching of a batch of article candidates.
//!
//! Candidates are drained through a fixed number of in-flight requests
//! (`buffer_unordered`). Each candidate ends as exactly one
//! [`FetchOutcome`], so a slow or failing page only costs its own slot and
//! its own timeout. The batch returns once every candidate has an outcome.

use crate::http::PageFetcher;
use crate::models::{BatchReport, Candidate, FetchOutcome};
use crate::scrapers::article::fetch_article;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{info, instrument};

/// Fetch and extract every candidate with at most `workers` requests in flight.
///
/// Output order is completion order, not input order.
#[instrument(level = "info", skip_all, fields(candidates = candidates.len(), workers = workers))]
pub async fn fetch_all<F: PageFetcher>(
    fetcher: &F,
    candidates: Vec<Candidate>,
    workers: usize,
    timeout: Duration,
) -> BatchReport {
    let total = candidates.len();

    let outcomes: Vec<FetchOutcome> = stream::iter(candidates)
        .map(|candidate| fetch_article(fetcher, candidate, timeout))
        .buffer_unordered(workers.max(1))
        .collect()
        .await;

    let report: BatchReport = outcomes.into_iter().collect();
    debug_assert_eq!(report.total(), total);
    info!(
        total,
        fetched = report.records.len(),
        skipped = report.skipped.len(),
        "Fetched article details"
    );
    report
}
