//! Article pipeline and batch orchestration.
//!
//! [`ArticleAnalyzer::process_article`] runs one URL through
//! fetch → sanitize → tokenize → score and records exactly one
//! [`ArticleInfo`]. [`ArticleAnalyzer::analyze`] runs one pipeline per URL,
//! all at once, and returns when every one of them has recorded its result.
//!
//! # Budgets
//!
//! Fetching and processing have separate timeouts. A slow server cannot eat
//! into the tokenizer's budget and a long article cannot eat into the fetch
//! budget; either one running out is recorded as `TIMEOUT`.

use crate::adapters::{InosmiRu, Sanitizer};
use crate::error::{PipelineError, Result};
use crate::models::{ArticleInfo, ProcessingStatus, ResultCollection};
use crate::text_tools::{
    Morph, SnowballMorph, calculate_jaundice_rate, load_charged_words, normalize_charged_words,
    split_by_words,
};
use crate::utils::{ElapsedTimer, truncate_for_log};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

/// Budget for downloading an article.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Budget for tokenizing and scoring an article.
pub const DEFAULT_PROCESSING_TIMEOUT: Duration = Duration::from_secs(3);

/// Default location of the charged-word dictionary.
pub const DEFAULT_CHARGED_WORDS_PATH: &str = "charged_dict/negative_words.txt";

/// Articles analyzed when the CLI is run without URLs.
pub const TEST_ARTICLES: &[&str] = &[
    "https://dvmn.org/media/",
    "https://inosmi.ru/politic/20211105/250848301.html",
    "https://inosmi.ru/politic/20211014/250703064.html",
    "https://inosmi.ru/economic/20211105/250848061.html",
    "https://inosmi.ru/social/20211105/250847851.html",
    "https://inosmi.ru/social/20211105/250838815.html",
];

/// Settings needed to build an [`ArticleAnalyzer`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    pub charged_words_path: PathBuf,
    pub fetch_timeout: Duration,
    pub processing_timeout: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            charged_words_path: PathBuf::from(DEFAULT_CHARGED_WORDS_PATH),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            processing_timeout: DEFAULT_PROCESSING_TIMEOUT,
        }
    }
}

/// Rates articles by their share of charged words.
///
/// Everything inside is read-only once built, so one analyzer serves any
/// number of concurrent pipelines and batches.
pub struct ArticleAnalyzer {
    client: reqwest::Client,
    sanitizer: Arc<dyn Sanitizer>,
    morph: Arc<dyn Morph>,
    /// Dictionary as loaded, kept so a new normalizer can re-derive `charged_words`.
    dictionary: Arc<HashSet<String>>,
    /// Dictionary run through `morph`.
    charged_words: Arc<HashSet<String>>,
    fetch_timeout: Duration,
    processing_timeout: Duration,
}

impl std::fmt::Debug for ArticleAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleAnalyzer")
            .field("sanitizer", &self.sanitizer.name())
            .field("charged_words", &self.charged_words.len())
            .field("fetch_timeout", &self.fetch_timeout)
            .field("processing_timeout", &self.processing_timeout)
            .finish()
    }
}

impl ArticleAnalyzer {
    /// Analyzer with the built-in InoSMI adapter and the Russian Snowball
    /// normalizer.
    pub fn new(dictionary: HashSet<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let morph: Arc<dyn Morph> = Arc::new(SnowballMorph::russian());
        let charged_words = normalize_charged_words(morph.as_ref(), &dictionary);
        Ok(Self {
            client,
            sanitizer: Arc::new(InosmiRu),
            morph,
            dictionary: Arc::new(dictionary),
            charged_words: Arc::new(charged_words),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            processing_timeout: DEFAULT_PROCESSING_TIMEOUT,
        })
    }

    /// Load the charged words from disk and apply the configured budgets.
    #[instrument(level = "info", skip_all, fields(path = %config.charged_words_path.display()))]
    pub async fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        let charged_words = load_charged_words(&config.charged_words_path).await?;
        Ok(Self::new(charged_words)?
            .with_fetch_timeout(config.fetch_timeout)
            .with_processing_timeout(config.processing_timeout))
    }

    /// Replace the site adapter used to extract article text.
    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn Sanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Replace the word normalizer; the dictionary is re-normalized with it.
    pub fn with_morph(mut self, morph: Arc<dyn Morph>) -> Self {
        self.charged_words = Arc::new(normalize_charged_words(morph.as_ref(), &self.dictionary));
        self.morph = morph;
        self
    }

    /// Budget used by [`ArticleAnalyzer::analyze`] for each download.
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Budget for tokenizing and scoring one article.
    pub fn with_processing_timeout(mut self, processing_timeout: Duration) -> Self {
        self.processing_timeout = processing_timeout;
        self
    }

    /// Analyze every URL concurrently and return one result per URL.
    ///
    /// Results are in completion order. A failing article never affects the
    /// others; each one ends up as its own status.
    #[instrument(level = "info", skip_all)]
    pub async fn analyze<I, S>(&self, urls: I) -> Vec<ArticleInfo>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let started = Instant::now();
        let results = ResultCollection::new();

        stream::iter(urls)
            .for_each_concurrent(None, |url| {
                let results = &results;
                async move {
                    self.process_article(url.as_ref(), results, self.fetch_timeout)
                        .await;
                }
            })
            .await;

        let articles = results.into_inner();
        let ok = articles
            .iter()
            .filter(|a| a.status == ProcessingStatus::Ok)
            .count();
        info!(
            total = articles.len(),
            ok,
            failed = articles.len() - ok,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Batch analysis complete"
        );
        articles
    }

    /// Run one article through the pipeline and append its result.
    ///
    /// Always appends exactly one record to `results` and never fails:
    /// every error is recorded as a status instead.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn process_article(
        &self,
        url: &str,
        results: &ResultCollection,
        fetch_timeout: Duration,
    ) {
        let article = match self.run_pipeline(url, fetch_timeout).await {
            Ok((rating, words_count)) => {
                info!(rating, words_count, "Article rated");
                ArticleInfo::ok(url, rating, words_count)
            }
            Err(e) => {
                let status = e.status();
                warn!(%status, error = %truncate_for_log(&e.to_string(), 300), "Article analysis failed");
                ArticleInfo::failed(url, status)
            }
        };
        results.push(article).await;
    }

    async fn run_pipeline(
        &self,
        url: &str,
        fetch_timeout: Duration,
    ) -> std::result::Result<(f64, usize), PipelineError> {
        let html = timeout(fetch_timeout, self.fetch(url))
            .await
            .map_err(|_| PipelineError::Timeout {
                stage: "fetch",
                limit: fetch_timeout,
            })??;
        debug!(bytes = html.len(), "Fetched article");

        let text = self.sanitizer.sanitize(&html)?;

        let _timer = ElapsedTimer::start("processing");
        let (rating, words_count) = timeout(self.processing_timeout, self.score(&text))
            .await
            .map_err(|_| PipelineError::Timeout {
                stage: "processing",
                limit: self.processing_timeout,
            })?;
        Ok((rating, words_count))
    }

    async fn fetch(&self, url: &str) -> reqwest::Result<String> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    async fn score(&self, text: &str) -> (f64, usize) {
        let words = split_by_words(self.morph.as_ref(), text).await;
        let rating = calculate_jaundice_rate(&words, &self.charged_words);
        (rating, words.len())
    }
}
