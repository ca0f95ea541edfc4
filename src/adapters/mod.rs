//! Site adapters that turn raw article HTML into plain text.
//!
//! Each adapter knows the markup of one news source and implements
//! [`Sanitizer`]. A page whose layout the adapter does not recognize is
//! reported as [`SanitizeError::ArticleNotFound`], which the pipeline turns
//! into a `PARSING_ERROR` result.
//!
//! # Supported Sources
//!
//! | Source | Adapter | Notes |
//! |--------|---------|-------|
//! | InoSMI | [`inosmi_ru::InosmiRu`] | Expects exactly one `article.article` element |

pub mod inosmi_ru;

pub use crate::error::SanitizeError;
pub use inosmi_ru::InosmiRu;

/// Extracts the readable text of an article from its HTML.
///
/// Adapters are shared by all concurrent pipelines and called synchronously.
pub trait Sanitizer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Return the article text, or [`SanitizeError::ArticleNotFound`] when
    /// the page does not look like an article of this source.
    fn sanitize(&self, html: &str) -> Result<String, SanitizeError>;
}
