//! # jaundice_rate
//!
//! Rates news articles by their "jaundice": the percentage of emotionally
//! charged words they contain. A batch of URLs is analyzed concurrently and
//! every URL ends with exactly one status: `OK`, `FETCH_ERROR`,
//! `PARSING_ERROR` or `TIMEOUT`.
//!
//! ## Architecture
//!
//! Each article goes through a pipeline:
//! 1. **Fetching**: download the page, bounded by the fetch timeout
//! 2. **Sanitizing**: extract the article text with a site adapter
//! 3. **Processing**: tokenize and score, bounded by a separate timeout
//!
//! [`analyzer::ArticleAnalyzer::analyze`] fans out one pipeline per URL and
//! collects the results; [`server`] exposes it over HTTP.

pub mod adapters;
pub mod analyzer;
pub mod cli;
pub mod error;
pub mod models;
pub mod server;
pub mod text_tools;
pub mod utils;

pub use analyzer::{AnalyzerConfig, ArticleAnalyzer};
pub use error::{JaundiceError, Result};
pub use models::{ArticleInfo, ProcessingStatus};
