//! Tokenization and scoring.
//!
//! - [`Morph`]: word normalizer injected into the pipeline
//! - [`SnowballMorph`]: default normalizer, a Snowball stemmer
//! - [`split_by_words`]: cooperative tokenizer producing normalized words
//! - [`calculate_jaundice_rate`]: share of charged words, in percent
//! - [`load_charged_words`]: reads the charged-word dictionary

use crate::error::{JaundiceError, Result};
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Characters removed from anywhere in a word before normalization.
const EXTRA_PUNCTUATION: &[char] = &['«', '»', '…'];

/// Short particle that is kept even though it fails the length filter.
const KEPT_SHORT_WORD: &str = "не";

/// Reduces a word to its dictionary form.
///
/// Implementations are shared by every concurrent pipeline, so they must be
/// callable through `&self` from many tasks at once.
pub trait Morph: Send + Sync {
    /// Normalized form of `word`; callers compare these for equality.
    fn normal_form(&self, word: &str) -> String;
}

/// Lowercases, then strips inflection with a Snowball stemmer.
///
/// Inflected forms of a word share one stem ("войну" and "война" both become
/// "войн"), so the charged-word dictionary must go through the same
/// normalizer; see [`normalize_charged_words`].
pub struct SnowballMorph {
    stemmer: Stemmer,
}

impl SnowballMorph {
    /// Stemmer for any language Snowball supports.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            stemmer: Stemmer::create(algorithm),
        }
    }

    /// Stemmer for Russian, the language of the built-in adapter.
    pub fn russian() -> Self {
        Self::new(Algorithm::Russian)
    }
}

impl Default for SnowballMorph {
    fn default() -> Self {
        Self::russian()
    }
}

impl std::fmt::Debug for SnowballMorph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballMorph").finish_non_exhaustive()
    }
}

impl Morph for SnowballMorph {
    fn normal_form(&self, word: &str) -> String {
        self.stemmer.stem(&word.to_lowercase()).into_owned()
    }
}

/// Normalizer that only lowercases.
///
/// Good enough for dictionaries that already list every inflected form.
#[derive(Debug, Default, Clone, Copy)]
pub struct LowercaseMorph;

impl Morph for LowercaseMorph {
    fn normal_form(&self, word: &str) -> String {
        word.to_lowercase()
    }
}

fn clean_word(word: &str) -> String {
    let without_quotes: String = word
        .chars()
        .filter(|c| !EXTRA_PUNCTUATION.contains(c))
        .collect();
    without_quotes
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_string()
}

/// Split `text` on whitespace and normalize every word with `morph`.
///
/// Words of two characters or fewer are dropped, except for "не". The
/// function yields to the runtime after each word so an enclosing
/// `tokio::time::timeout` can cut a long article short.
pub async fn split_by_words(morph: &dyn Morph, text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for word in text.split_whitespace() {
        let cleaned = clean_word(word);
        if !cleaned.is_empty() {
            let normalized = morph.normal_form(&cleaned);
            if normalized.chars().count() > 2 || normalized == KEPT_SHORT_WORD {
                words.push(normalized);
            }
        }
        tokio::task::yield_now().await;
    }
    words
}

/// Percentage of `article_words` found in `charged_words`, rounded to two
/// decimals.
///
/// An empty article rates `0.0`.
pub fn calculate_jaundice_rate(article_words: &[String], charged_words: &HashSet<String>) -> f64 {
    if article_words.is_empty() {
        return 0.0;
    }

    let found = article_words
        .iter()
        .filter(|word| charged_words.contains(word.as_str()))
        .count();
    let score = found as f64 / article_words.len() as f64 * 100.0;
    (score * 100.0).round() / 100.0
}

/// Build the charged-word set from line-delimited text.
///
/// Lines are trimmed; blank lines are skipped.
pub fn parse_charged_words(contents: &str) -> HashSet<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run every dictionary entry through `morph` so it compares equal to the
/// article words [`split_by_words`] produces with the same normalizer.
pub fn normalize_charged_words(morph: &dyn Morph, charged_words: &HashSet<String>) -> HashSet<String> {
    charged_words
        .iter()
        .map(|word| morph.normal_form(word))
        .filter(|word| !word.is_empty())
        .collect()
}

/// Read the charged-word dictionary at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_charged_words(path: impl AsRef<Path>) -> Result<HashSet<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .await
        .map_err(|source| JaundiceError::ChargedWords {
            path: path.display().to_string(),
            source,
        })?;
    let words = parse_charged_words(&contents);
    info!(count = words.len(), "Loaded charged words");
    Ok(words)
}
