//! Page fetching over HTTP.
//!
//! Every network request in the scraper goes through the [`PageFetcher`]
//! trait so the pipeline can be driven by a real client in production and by
//! canned pages in tests.
//!
//! - [`PageFetcher`]: Core trait returning the body of a page
//! - [`HttpFetcher`]: `reqwest` implementation with a per-request timeout
//! - [`get_page`]: Wraps any fetcher call in the same hard timeout

use crate::error::FetchError;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Trait for fetching the body of a web page.
///
/// Implementations must treat any non-2xx status as a failure and must not
/// retry on their own.
pub trait PageFetcher {
    /// Fetch `url` and return its body as text.
    async fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// `reqwest` backed [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self { client, timeout })
    }
}

impl PageFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    timeout: self.timeout,
                }
            } else {
                FetchError::network(url, e)
            }
        };

        let resp = self.client.get(url).send().await.map_err(&map_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(&map_err)
    }
}

/// Fetch one page, giving up after `timeout` whatever the fetcher does.
///
/// Errors are returned untouched; callers decide how to log and skip.
#[instrument(level = "debug", skip(fetcher, timeout))]
pub async fn get_page<F: PageFetcher>(
    fetcher: &F,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    let t0 = Instant::now();
    let res = match tokio::time::timeout(timeout, fetcher.get(url)).await {
        Ok(res) => res,
        Err(_) => Err(FetchError::Timeout {
            url: url.to_string(),
            timeout,
        }),
    };
    let elapsed_ms = t0.elapsed().as_millis();

    match &res {
        Ok(body) => debug!(elapsed_ms, bytes = body.len(), "Fetched page"),
        Err(e) => debug!(elapsed_ms, error = %e, "Page request failed"),
    }
    res
}
