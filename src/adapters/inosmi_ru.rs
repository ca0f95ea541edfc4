//! InoSMI article adapter.
//!
//! Article pages on [inosmi.ru](https://inosmi.ru) wrap the story in a single
//! `<article class="article">` element. Everything outside it is navigation
//! and ads; inside it, scripts, embedded media and the editorial disclaimer
//! are dropped before the text is collected.

use super::{SanitizeError, Sanitizer};
use once_cell::sync::Lazy;
use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

static ARTICLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.article").expect("valid article selector"));

/// Tags whose whole subtree is never part of the article text.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "figure", "aside", "button", "form",
];

/// Classes marking blocks inside the article that are not story text.
const SKIPPED_CLASSES: &[&str] = &["article-disclaimer", "article-metadata", "article-tags"];

/// Adapter for inosmi.ru article pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct InosmiRu;

impl Sanitizer for InosmiRu {
    fn name(&self) -> &'static str {
        "inosmi_ru"
    }

    #[instrument(level = "debug", skip_all, fields(adapter = "inosmi_ru", bytes = html.len()))]
    fn sanitize(&self, html: &str) -> Result<String, SanitizeError> {
        let document = Html::parse_document(html);
        let articles: Vec<ElementRef<'_>> = document.select(&ARTICLE_SELECTOR).collect();

        let [article] = articles.as_slice() else {
            return Err(SanitizeError::ArticleNotFound(format!(
                "expected one article.article element, found {}",
                articles.len()
            )));
        };

        let mut fragments = Vec::new();
        collect_text(*article, &mut fragments);
        let text = fragments.join(" ");
        debug!(chars = text.chars().count(), "Sanitized article");
        Ok(text)
    }
}

fn is_skipped(element: &Element) -> bool {
    SKIPPED_TAGS.contains(&element.name())
        || element
            .classes()
            .any(|class| SKIPPED_CLASSES.contains(&class))
}

fn collect_text(element: ElementRef<'_>, fragments: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let text = text.trim();
            if !text.is_empty() {
                fragments.push(text.to_string());
            }
        } else if let Some(child) = ElementRef::wrap(child) {
            if !is_skipped(child.value()) {
                collect_text(child, fragments);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_PAGE: &str = r#"
        <html><head><title>ИноСМИ</title><script>var x = 1;</script></head>
        <body>
          <nav>Главная Политика</nav>
          <article class="article">
            <h1 class="article-header__title">Провал переговоров</h1>
            <div class="article-disclaimer">Материалы ИноСМИ содержат оценки</div>
            <p>Первый <b>абзац</b> текста.</p>
            <script>track("view");</script>
            <figure><img src="a.jpg"><figcaption>Подпись</figcaption></figure>
            <p>Второй абзац.</p>
          </article>
          <footer>Контакты</footer>
        </body></html>
    "#;

    #[test]
    fn test_sanitize_extracts_article_text_only() {
        let text = InosmiRu.sanitize(ARTICLE_PAGE).unwrap();
        assert_eq!(
            text,
            "Провал переговоров Первый абзац текста. Второй абзац."
        );
    }

    #[test]
    fn test_sanitize_unknown_layout() {
        let html = "<html><body><div class=\"b-topic__content\">Текст</div></body></html>";
        let err = InosmiRu.sanitize(html).unwrap_err();
        assert!(matches!(err, SanitizeError::ArticleNotFound(_)));
    }

    #[test]
    fn test_sanitize_rejects_multiple_articles() {
        let html = r#"<article class="article">a</article><article class="article">b</article>"#;
        assert!(InosmiRu.sanitize(html).is_err());
    }

    #[test]
    fn test_sanitize_empty_article_is_empty_text() {
        let html = r#"<article class="article"><script>x()</script></article>"#;
        assert_eq!(InosmiRu.sanitize(html).unwrap(), "");
    }
}
