//! Error types shared across the crate.
//!
//! Pipeline failures (fetch errors, timeouts, unrecognized layouts) never show
//! up here: they are folded into a [`ProcessingStatus`](crate::models::ProcessingStatus)
//! inside the pipeline. What remains are startup failures that stop the
//! process before any article is analyzed.

use crate::models::ProcessingStatus;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, JaundiceError>;

/// Errors raised while setting up or serving the analyzer.
#[derive(Error, Debug)]
pub enum JaundiceError {
    #[error("failed to read charged words from {path}: {source}")]
    ChargedWords {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClient {
        #[from]
        source: reqwest::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("server error: {source}")]
    Server {
        #[from]
        source: std::io::Error,
    },
}

/// Why a single article pipeline stopped early.
///
/// Never leaves the pipeline: [`PipelineError::status`] folds it into the
/// status recorded for the article.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("fetch failed: {source}")]
    Fetch {
        #[from]
        source: reqwest::Error,
    },

    #[error("{stage} exceeded its {limit:?} budget")]
    Timeout {
        stage: &'static str,
        limit: std::time::Duration,
    },

    #[error("parsing failed: {source}")]
    Parsing {
        #[from]
        source: SanitizeError,
    },
}

impl PipelineError {
    pub fn status(&self) -> ProcessingStatus {
        match self {
            PipelineError::Fetch { source } if source.is_timeout() => ProcessingStatus::Timeout,
            PipelineError::Fetch { .. } => ProcessingStatus::FetchError,
            PipelineError::Timeout { .. } => ProcessingStatus::Timeout,
            PipelineError::Parsing { .. } => ProcessingStatus::ParsingError,
        }
    }
}

/// Failure reported by a [`Sanitizer`](crate::adapters::Sanitizer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    /// The page does not have the layout the adapter knows how to read.
    #[error("article not found: {0}")]
    ArticleNotFound(String),
}
