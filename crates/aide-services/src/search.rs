//! Web search with a reference-page fallback.
//!
//! The primary path queries a SerpAPI-compatible endpoint. When no key is
//! configured, or the primary call fails in any way, the query is turned into
//! a reference-site article URL whose text becomes a single synthetic hit.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use aide_core::SearchHit;

use crate::error::SearchError;
use crate::extract;

/// Maximum snippet length of a fallback hit, in characters.
const SNIPPET_CHARS: usize = 200;

/// A source of ranked web results.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search for `query`.
    ///
    /// Returns `None` when neither the provider nor the fallback produced
    /// anything usable. `Some(vec![])` means the provider answered with no
    /// results.
    async fn search_web(&self, query: &str, credential: Option<&str>) -> Option<Vec<SearchHit>>;
}

/// SerpAPI client with a reference-page fallback.
pub struct SerpApiClient {
    http: Client,
    endpoint: String,
    fallback: ReferenceFallback,
}

impl SerpApiClient {
    pub fn new(http: Client, endpoint: impl Into<String>, fallback: ReferenceFallback) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            fallback,
        }
    }

    async fn primary(&self, query: &str, api_key: &str) -> Result<Vec<SearchHit>, SearchError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query), ("api_key", api_key), ("engine", "google")])
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(SearchError::Status(resp.status().as_u16()));
        }

        let body: SerpResponse = resp
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(body
            .organic_results
            .into_iter()
            .map(|r| SearchHit {
                title: r.title,
                link: r.link,
                snippet: r.snippet,
            })
            .collect())
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search_web(&self, query: &str, credential: Option<&str>) -> Option<Vec<SearchHit>> {
        match credential {
            Some(api_key) => match self.primary(query, api_key).await {
                Ok(hits) => {
                    tracing::debug!(query, hits = hits.len(), "Search provider answered");
                    return Some(hits);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Search provider failed, using reference fallback");
                }
            },
            None => tracing::debug!("No search key configured, using reference fallback"),
        }
        self.fallback.lookup(query).await
    }
}

// =============================================================================
// Reference-page fallback
// =============================================================================

/// Fetches `{base}/wiki/{Query_With_Underscores}` and excerpts its text.
pub struct ReferenceFallback {
    http: Client,
    base_url: String,
}

impl ReferenceFallback {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Article URL for a query: its spaces become underscores and the rest is
    /// percent-encoded as a single path segment.
    pub fn url_for(&self, query: &str) -> Result<String, SearchError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| SearchError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| SearchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("wiki")
            .push(&query.replace(' ', "_"));
        Ok(url.into())
    }

    /// Fetch the article for `query` as a single synthetic hit.
    pub async fn lookup(&self, query: &str) -> Option<Vec<SearchHit>> {
        let url = match self.url_for(query) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "Reference fallback skipped");
                return None;
            }
        };
        let content = match self.fetch_text(&url).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(%url, error = %e, "Reference fallback failed");
                return None;
            }
        };

        if content.trim().is_empty() {
            tracing::debug!(%url, "Reference page had no readable text");
            return None;
        }

        Some(vec![SearchHit {
            title: format!("Wikipedia: {}", query),
            link: url,
            snippet: excerpt(&content, SNIPPET_CHARS),
        }])
    }

    async fn fetch_text(&self, url: &str) -> Result<String, SearchError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(SearchError::Status(resp.status().as_u16()));
        }
        let html = resp
            .text()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        Ok(extract::readable_text(&html))
    }
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<SerpResult>,
}

#[derive(Debug, Deserialize)]
struct SerpResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SerpApiClient {
        let http = Client::new();
        SerpApiClient::new(
            http.clone(),
            format!("{}/search", server.uri()),
            ReferenceFallback::new(http, server.uri()),
        )
    }

    fn article(paragraph: &str) -> String {
        format!(
            "<html><body><div id=\"mw-content-text\"><p>{}</p></div></body></html>",
            paragraph
        )
    }

    async fn mount_article(server: &MockServer, wiki_path: &str, html: String) {
        Mock::given(method("GET"))
            .and(path(wiki_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(server)
            .await;
    }

    #[test]
    fn test_excerpt_short_text_untouched() {
        assert_eq!(excerpt("short", 200), "short");
        let exact = "a".repeat(200);
        assert_eq!(excerpt(&exact, 200), exact);
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let long = "é".repeat(250);
        let cut = excerpt(&long, 200);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn test_reference_url_replaces_spaces() {
        let fallback = ReferenceFallback::new(Client::new(), "https://en.wikipedia.org/");
        assert_eq!(
            fallback.url_for("rust programming").unwrap(),
            "https://en.wikipedia.org/wiki/rust_programming"
        );
    }

    #[test]
    fn test_reference_url_escapes_reserved_characters() {
        let fallback = ReferenceFallback::new(Client::new(), "https://en.wikipedia.org");
        assert_eq!(
            fallback.url_for("c# language").unwrap(),
            "https://en.wikipedia.org/wiki/c%23_language"
        );
        assert_eq!(
            fallback.url_for("100% rust?").unwrap(),
            "https://en.wikipedia.org/wiki/100%25_rust%3F"
        );
        assert_eq!(
            fallback.url_for("tcp/ip").unwrap(),
            "https://en.wikipedia.org/wiki/tcp%2Fip"
        );
    }

    #[test]
    fn test_reference_url_rejects_invalid_base() {
        let fallback = ReferenceFallback::new(Client::new(), "not a url");
        assert!(matches!(
            fallback.url_for("rust"),
            Err(SearchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_no_credential_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(path("/search"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        mount_article(
            &server,
            "/wiki/rust_programming",
            article("Rust is a general-purpose programming language."),
        )
        .await;

        let hits = client_for(&server)
            .search_web("rust programming", None)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Wikipedia: rust programming");
        assert!(hits[0].link.ends_with("/wiki/rust_programming"));
        assert_eq!(
            hits[0].snippet,
            "Rust is a general-purpose programming language."
        );
    }

    #[tokio::test]
    async fn test_fallback_fetches_escaped_article() {
        let server = MockServer::start().await;
        mount_article(&server, "/wiki/c%23_language", article("C# is a language.")).await;

        let hits = client_for(&server).search_web("c# language", None).await.unwrap();
        assert_eq!(hits[0].title, "Wikipedia: c# language");
        assert!(hits[0].link.ends_with("/wiki/c%23_language"));
        assert_eq!(hits[0].snippet, "C# is a language.");
    }

    #[tokio::test]
    async fn test_fallback_snippet_truncated() {
        let server = MockServer::start().await;
        mount_article(&server, "/wiki/long", article(&"word ".repeat(100))).await;

        let hits = client_for(&server).search_web("long", None).await.unwrap();
        assert!(hits[0].snippet.ends_with("..."));
        assert_eq!(hits[0].snippet.chars().count(), SNIPPET_CHARS + 3);
    }

    #[tokio::test]
    async fn test_primary_success_preserves_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "tokio"))
            .and(query_param("api_key", "s-key"))
            .and(query_param("engine", "google"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic_results": [
                    {"title": "Tokio", "link": "https://tokio.rs", "snippet": "An async runtime"},
                    {"title": "Docs", "link": "https://docs.rs/tokio"},
                    {"title": "GitHub", "link": "https://github.com/tokio-rs/tokio", "snippet": "Source"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hits = client_for(&server)
            .search_web("tokio", Some("s-key"))
            .await
            .unwrap();
        let titles: Vec<&str> = hits.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["Tokio", "Docs", "GitHub"]);
        assert_eq!(hits[1].snippet, "");
    }

    #[tokio::test]
    async fn test_primary_without_results_is_empty_not_none() {
        let server = MockServer::start().await;
        Mock::given(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"search_metadata": {}})))
            .mount(&server)
            .await;

        let hits = client_for(&server).search_web("nothing", Some("k")).await;
        assert_eq!(hits, Some(vec![]));
    }

    #[tokio::test]
    async fn test_primary_error_falls_back() {
        let server = MockServer::start().await;
        Mock::given(path("/search"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid API key"})))
            .expect(1)
            .mount(&server)
            .await;
        mount_article(&server, "/wiki/tokio", article("Tokio is a runtime.")).await;

        let hits = client_for(&server)
            .search_web("tokio", Some("bad"))
            .await
            .unwrap();
        assert_eq!(hits[0].title, "Wikipedia: tokio");
    }

    #[tokio::test]
    async fn test_fallback_without_content_is_none() {
        let server = MockServer::start().await;
        mount_article(&server, "/wiki/blank", "<html><body></body></html>".to_string()).await;

        assert!(client_for(&server).search_web("blank", None).await.is_none());
    }

    #[tokio::test]
    async fn test_fallback_missing_page_is_none() {
        let server = MockServer::start().await;
        Mock::given(path("/wiki/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(client_for(&server).search_web("missing", None).await.is_none());
    }

    #[tokio::test]
    async fn test_everything_unreachable_is_none() {
        let http = Client::new();
        let client = SerpApiClient::new(
            http.clone(),
            "http://127.0.0.1:1/search",
            ReferenceFallback::new(http, "http://127.0.0.1:1"),
        );
        assert!(client.search_web("rust", Some("k")).await.is_none());
    }
}
