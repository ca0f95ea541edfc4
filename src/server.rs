//! HTTP endpoint exposing the analyzer.
//!
//! `GET /?urls=https://a,https://b` analyzes the listed articles and answers
//! with a JSON array of results. Requests without URLs, with unparseable
//! URLs, or with more than `max_urls` URLs are rejected with `400` before any
//! article is fetched.

use crate::analyzer::ArticleAnalyzer;
use crate::error::Result;
use crate::models::ArticleInfo;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;

/// Largest number of URLs accepted in one request.
pub const MAX_LIMIT_URLS: usize = 10;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub analyzer: Arc<ArticleAnalyzer>,
    pub max_urls: usize,
}

impl AppState {
    /// State with the default URL limit.
    pub fn new(analyzer: Arc<ArticleAnalyzer>) -> Self {
        Self {
            analyzer,
            max_urls: MAX_LIMIT_URLS,
        }
    }

    /// Override the largest number of URLs accepted per request.
    pub fn with_max_urls(mut self, max_urls: usize) -> Self {
        self.max_urls = max_urls;
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub urls: Option<String>,
}

/// Request rejected before the analyzer runs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("Missing 'urls' query parameter")]
    MissingUrls,

    #[error("Too many urls in request, should be {limit} or less")]
    TooManyUrls { limit: usize },

    #[error("Invalid url in request: {0}")]
    InvalidUrl(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// Split the comma-separated `urls` parameter and check it against `max_urls`.
pub fn parse_urls(raw: Option<&str>, max_urls: usize) -> std::result::Result<Vec<String>, ApiError> {
    let urls: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        return Err(ApiError::MissingUrls);
    }
    if urls.len() > max_urls {
        return Err(ApiError::TooManyUrls { limit: max_urls });
    }
    if let Some(bad) = urls.iter().find(|url| Url::parse(url).is_err()) {
        return Err(ApiError::InvalidUrl(bad.clone()));
    }
    Ok(urls)
}

#[instrument(level = "info", skip_all)]
async fn analyze_handler(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
) -> std::result::Result<Json<Vec<ArticleInfo>>, ApiError> {
    let urls = parse_urls(query.urls.as_deref(), state.max_urls).inspect_err(|e| {
        warn!(error = %e, "Rejected analyze request");
    })?;
    info!(count = urls.len(), "Analyzing requested articles");
    Ok(Json(state.analyzer.analyze(&urls).await))
}

async fn health_handler() -> &'static str {
    "OK"
}

/// Build the router; split out from [`run_server`] so tests can drive it
/// without a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(analyze_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Serve the analyzer on `addr` until the process is stopped.
pub async fn run_server(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, max_urls = state.max_urls, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use std::collections::HashSet;
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state() -> AppState {
        let analyzer = ArticleAnalyzer::new(HashSet::from(["провал".to_string()])).unwrap();
        AppState::new(Arc::new(analyzer))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_parse_urls_splits_on_commas() {
        let urls = parse_urls(Some("https://a.ru/1, https://b.ru/2,"), 10).unwrap();
        assert_eq!(urls, vec!["https://a.ru/1", "https://b.ru/2"]);
    }

    #[test]
    fn test_parse_urls_missing_or_empty() {
        assert_eq!(parse_urls(None, 10), Err(ApiError::MissingUrls));
        assert_eq!(parse_urls(Some(""), 10), Err(ApiError::MissingUrls));
        assert_eq!(parse_urls(Some(" , "), 10), Err(ApiError::MissingUrls));
    }

    #[test]
    fn test_parse_urls_limit_is_inclusive() {
        let ten = vec!["https://inosmi.ru/a"; 10].join(",");
        assert_eq!(parse_urls(Some(&ten), 10).unwrap().len(), 10);

        let eleven = vec!["https://inosmi.ru/a"; 11].join(",");
        assert_eq!(
            parse_urls(Some(&eleven), 10),
            Err(ApiError::TooManyUrls { limit: 10 })
        );
    }

    #[test]
    fn test_parse_urls_rejects_garbage() {
        assert_eq!(
            parse_urls(Some("not a url"), 10),
            Err(ApiError::InvalidUrl("not a url".into()))
        );
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(router(state()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_missing_urls_is_bad_request() {
        let (status, _) = get(router(state()), "/").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_too_many_urls_is_bad_request() {
        let urls = vec!["https://inosmi.ru/a"; 11].join(",");
        let (status, body) = get(router(state()), &format!("/?urls={urls}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Too many urls in request, should be 10 or less");
    }

    #[tokio::test]
    async fn test_custom_limit_applies() {
        let app = router(state().with_max_urls(1));
        let (status, body) = get(app, "/?urls=https://a.ru/1,https://b.ru/2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("should be 1 or less"));
    }

    #[tokio::test]
    async fn test_analyze_returns_json_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/media/", server.uri());
        let (status, body) = get(router(state()), &format!("/?urls={url}")).await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["url"], url.as_str());
        assert_eq!(items[0]["status"], "FETCH_ERROR");
        assert!(items[0]["rating"].is_null());
        assert!(items[0]["words_count"].is_null());
    }
}
