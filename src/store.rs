//! JSON-file article store keyed by headline.
//!
//! The whole table is kept in memory and written back after every
//! mutation. Writes go to a temporary file which is then renamed over the
//! store, so a crash mid-write leaves the previous table intact.
//!
//! # Identity
//!
//! Articles are upserted by `name`: a headline seen before keeps its `id`
//! and has every other field overwritten. Ids are never reused.

use crate::error::StoreError;
use crate::models::{ArticleRecord, StoredArticle};
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Counts from one bulk upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    pub inserted: usize,
    pub updated: usize,
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    articles: Vec<StoredArticle>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let articles = match fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(count = articles.len(), "Opened article store");
        Ok(Self { path, articles })
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Insert or overwrite every record by `name`, then persist once.
    ///
    /// Later records in `records` win over earlier ones with the same name.
    #[instrument(level = "info", skip_all, fields(records = records.len()))]
    pub async fn upsert_by_name(
        &mut self,
        records: Vec<ArticleRecord>,
    ) -> Result<UpsertSummary, StoreError> {
        let mut summary = UpsertSummary::default();
        if records.is_empty() {
            return Ok(summary);
        }

        let mut by_name: HashMap<String, usize> = self
            .articles
            .iter()
            .enumerate()
            .map(|(i, a)| (a.article.name.clone(), i))
            .collect();
        let now = Utc::now();

        for record in records {
            match by_name.get(&record.name) {
                Some(&i) => {
                    let existing = &mut self.articles[i];
                    existing.article = record;
                    existing.scraped_at = now;
                    summary.updated += 1;
                }
                None => {
                    by_name.insert(record.name.clone(), self.articles.len());
                    self.articles.push(StoredArticle {
                        id: Uuid::new_v4(),
                        scraped_at: now,
                        article: record,
                    });
                    summary.inserted += 1;
                }
            }
        }

        self.persist().await?;
        info!(
            inserted = summary.inserted,
            updated = summary.updated,
            total = self.articles.len(),
            "Upserted articles"
        );
        Ok(summary)
    }

    /// All articles, or only those whose tag is in `tags`.
    pub fn find_all(&self, tags: Option<&[String]>) -> Vec<&StoredArticle> {
        self.articles
            .iter()
            .filter(|a| tags.is_none_or(|tags| tags.contains(&a.article.tag)))
            .collect()
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<&StoredArticle, StoreError> {
        self.articles
            .iter()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Remove every article. Returns how many were removed.
    #[instrument(level = "info", skip_all)]
    pub async fn reset(&mut self) -> Result<usize, StoreError> {
        let removed = self.articles.len();
        self.articles.clear();
        self.persist().await?;
        info!(removed, "Reset article store");
        Ok(removed)
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&self.articles)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "Persisted article store");
        Ok(())
    }
}
