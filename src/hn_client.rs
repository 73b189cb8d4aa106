use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, ScoutError};
use crate::models::{ItemNode, SearchPage};

pub const HITS_PER_PAGE: u32 = 20;
const SECONDS_PER_DAY: i64 = 86400;

/// Parameters of one `/search_by_date` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based, as the API expects.
    pub page_index: u32,
    pub hits_per_page: u32,
    pub created_after: i64,
    pub domain: Option<String>,
}

impl PageRequest {
    /// Request for the 1-based `page` of stories newer than `window_days` before `now`.
    pub fn new(page: u32, window_days: u32, domain: Option<&str>, now: i64) -> Self {
        Self {
            page_index: page.saturating_sub(1),
            hits_per_page: HITS_PER_PAGE,
            created_after: now - SECONDS_PER_DAY * i64::from(window_days),
            domain: domain.map(str::to_string),
        }
    }

    pub fn to_url(&self, base_url: &str) -> String {
        let mut url = format!(
            "{}/search_by_date?tags=story&page={}&hitsPerPage={}&numericFilters=created_at_i>{}",
            base_url.trim_end_matches('/'),
            self.page_index,
            self.hits_per_page,
            self.created_after
        );
        if let Some(domain) = self.domain.as_deref().filter(|d| !d.is_empty()) {
            url.push_str("&restrictSearchableAttributes=url&query=");
            url.push_str(&urlencoding::encode(domain));
        }
        url
    }
}

/// The two read-only endpoints the app needs.
pub trait HnApi: Send + Sync {
    fn search_page(&self, request: &PageRequest) -> Result<SearchPage>;
    fn item(&self, id: &str) -> Result<ItemNode>;
}

pub struct HackerNewsClient {
    client: Client,
    base_url: String,
}

impl HackerNewsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hn_scout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_body(&self, url: &str) -> Result<String> {
        debug!(url, "GET");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Upstream returned an error status");
            return Err(ScoutError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}

impl HnApi for HackerNewsClient {
    fn search_page(&self, request: &PageRequest) -> Result<SearchPage> {
        let body = self.get_body(&request.to_url(&self.base_url))?;
        parse_search_page(&body)
    }

    fn item(&self, id: &str) -> Result<ItemNode> {
        let url = format!("{}/items/{}", self.base_url, urlencoding::encode(id));
        let body = self.get_body(&url)?;
        parse_item(&body)
    }
}

pub fn parse_search_page(body: &str) -> Result<SearchPage> {
    serde_json::from_str(body).map_err(|e| ScoutError::MalformedResponse(e.to_string()))
}

pub fn parse_item(body: &str) -> Result<ItemNode> {
    serde_json::from_str(body).map_err(|e| ScoutError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://hn.algolia.com/api/v1";

    #[test]
    fn builds_search_url_without_domain() {
        let request = PageRequest::new(1, 30, None, 1_700_000_000);
        assert_eq!(
            request.to_url(BASE),
            "https://hn.algolia.com/api/v1/search_by_date?tags=story&page=0&hitsPerPage=20&numericFilters=created_at_i>1697408000"
        );
    }

    #[test]
    fn builds_search_url_with_encoded_domain() {
        let request = PageRequest::new(3, 7, Some("my blog.io"), 1_000_000);
        let url = request.to_url("http://localhost:8080/");
        assert_eq!(
            url,
            "http://localhost:8080/search_by_date?tags=story&page=2&hitsPerPage=20&numericFilters=created_at_i>395200&restrictSearchableAttributes=url&query=my%20blog.io"
        );
    }

    #[test]
    fn body_without_hits_is_malformed() {
        let err = parse_search_page(r#"{"message": "rate limited"}"#).unwrap_err();
        assert!(matches!(err, ScoutError::MalformedResponse(_)));

        let err = parse_search_page(r#"{"hits": "nope"}"#).unwrap_err();
        assert!(matches!(err, ScoutError::MalformedResponse(_)));

        let err = parse_search_page("<html>").unwrap_err();
        assert!(matches!(err, ScoutError::MalformedResponse(_)));
    }

    #[test]
    fn parses_search_body() {
        let page = parse_search_page(
            r#"{"hits": [{"objectID": "1", "title": "A", "author": "pg", "points": 3,
                "num_comments": 1, "created_at_i": 1700000000, "url": "https://a.com"}],
                "nbPages": 4, "page": 0}"#,
        )
        .unwrap();
        assert_eq!(page.hits.len(), 1);
        assert_eq!(page.total_pages(), 4);
    }

    #[test]
    fn parses_item_tree() {
        let item = parse_item(
            r#"{"id": 9, "title": "Story", "author": "a", "points": 5,
                "created_at": "2024-01-01T00:00:00.000Z", "url": null,
                "children": [{"text": "<p>hi</p>", "author": "b",
                              "created_at": "2024-01-01T01:00:00.000Z", "children": []}]}"#,
        )
        .unwrap();
        assert_eq!(item.id, Some(9));
        assert_eq!(item.children[0].author.as_deref(), Some("b"));
    }
}
