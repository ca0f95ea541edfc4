//! Data models for analysis results.
//!
//! - [`ProcessingStatus`]: terminal outcome of one article pipeline
//! - [`ArticleInfo`]: the single record each pipeline produces
//! - [`ResultCollection`]: append-only collector shared by concurrent pipelines
//!
//! Statuses stay an enum throughout the crate; they only become strings
//! (`"OK"`, `"FETCH_ERROR"`, ...) when serialized.

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Outcome of processing a single article URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    /// Fetched, parsed and rated.
    Ok,
    /// The server answered with a non-success status or could not be reached.
    FetchError,
    /// The page layout was not recognized by the sanitizer.
    ParsingError,
    /// Either the fetch or the processing budget ran out.
    Timeout,
}

impl ProcessingStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Ok => "OK",
            ProcessingStatus::FetchError => "FETCH_ERROR",
            ProcessingStatus::ParsingError => "PARSING_ERROR",
            ProcessingStatus::Timeout => "TIMEOUT",
        }
    }
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of analyzing one article.
///
/// `rating` and `words_count` are present only when `status` is
/// [`ProcessingStatus::Ok`]. The constructors are the only way to build one,
/// so the invariant holds everywhere.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleInfo {
    /// The URL the pipeline was started with.
    pub url: String,
    /// Terminal status of the pipeline.
    pub status: ProcessingStatus,
    /// Percentage of charged words, rounded to two decimals.
    pub rating: Option<f64>,
    /// Number of words the tokenizer produced.
    pub words_count: Option<usize>,
}

impl ArticleInfo {
    /// A successfully rated article.
    pub fn ok(url: impl Into<String>, rating: f64, words_count: usize) -> Self {
        Self {
            url: url.into(),
            status: ProcessingStatus::Ok,
            rating: Some(rating),
            words_count: Some(words_count),
        }
    }

    /// An article that stopped at `status`.
    ///
    /// Passing [`ProcessingStatus::Ok`] here is a bug; use [`ArticleInfo::ok`].
    pub fn failed(url: impl Into<String>, status: ProcessingStatus) -> Self {
        debug_assert!(status != ProcessingStatus::Ok);
        Self {
            url: url.into(),
            status,
            rating: None,
            words_count: None,
        }
    }
}

/// Ordered collection of [`ArticleInfo`] written by concurrent pipelines.
///
/// Records appear in completion order. Each `push` takes the lock, so no
/// append is lost and no record is observed half-written.
#[derive(Debug, Default)]
pub struct ResultCollection {
    inner: Mutex<Vec<ArticleInfo>>,
}

impl ResultCollection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one finished record.
    pub async fn push(&self, article: ArticleInfo) {
        self.inner.lock().await.push(article);
    }

    /// Hand the records to the caller once every writer is done.
    pub fn into_inner(self) -> Vec<ArticleInfo> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&ProcessingStatus::FetchError).unwrap();
        assert_eq!(json, "\"FETCH_ERROR\"");
        let json = serde_json::to_string(&ProcessingStatus::Ok).unwrap();
        assert_eq!(json, "\"OK\"");
    }

    #[test]
    fn test_status_display_matches_serde() {
        for status in [
            ProcessingStatus::Ok,
            ProcessingStatus::FetchError,
            ProcessingStatus::ParsingError,
            ProcessingStatus::Timeout,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn test_ok_article_serialization() {
        let article = ArticleInfo::ok("https://inosmi.ru/a.html", 1.25, 400);
        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["url"], "https://inosmi.ru/a.html");
        assert_eq!(value["status"], "OK");
        assert_eq!(value["rating"], 1.25);
        assert_eq!(value["words_count"], 400);
    }

    #[test]
    fn test_failed_article_has_null_rating_and_count() {
        let article = ArticleInfo::failed("https://dvmn.org/media/", ProcessingStatus::FetchError);
        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["status"], "FETCH_ERROR");
        assert!(value["rating"].is_null());
        assert!(value["words_count"].is_null());
    }

    #[tokio::test]
    async fn test_result_collection_keeps_every_push() {
        let results = ResultCollection::new();
        assert!(ResultCollection::new().into_inner().is_empty());

        results
            .push(ArticleInfo::failed("a", ProcessingStatus::Timeout))
            .await;
        results.push(ArticleInfo::ok("b", 0.0, 10)).await;

        let records = results.into_inner();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url, "a");
        assert_eq!(records[1].status, ProcessingStatus::Ok);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_result_collection_concurrent_pushes() {
        let results = std::sync::Arc::new(ResultCollection::new());
        let handles: Vec<_> = (0..64)
            .map(|i| {
                let results = std::sync::Arc::clone(&results);
                tokio::spawn(async move {
                    results.push(ArticleInfo::ok(format!("u{i}"), 0.0, i)).await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let records = std::sync::Arc::try_unwrap(results).unwrap().into_inner();
        let mut urls: Vec<String> = records.into_iter().map(|r| r.url).collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), 64);
    }
}
