//! Google Books Client - 调用 Google Books 公共检索接口
//!
//! 实现 BookSearchPort trait
//!
//! 外部 API:
//! GET https://www.googleapis.com/books/v1/volumes?q=...&maxResults=10
//! Response: {"items": [{"id": "...", "volumeInfo": {...}, "saleInfo": {...}}]}

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{BookSearchPort, BookSearchResult, SearchError};

// ============================================================================
// 响应结构
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<VolumeItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeItem {
    #[serde(default)]
    id: String,
    #[serde(default)]
    volume_info: VolumeInfo,
    #[serde(default)]
    sale_info: SaleInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    publisher: Option<String>,
    published_date: Option<String>,
    description: Option<String>,
    #[serde(default)]
    industry_identifiers: Vec<IndustryIdentifier>,
    page_count: Option<i64>,
    #[serde(default)]
    categories: Vec<String>,
    average_rating: Option<Decimal>,
    ratings_count: Option<i64>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct IndustryIdentifier {
    #[serde(rename = "type")]
    kind: String,
    identifier: String,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaleInfo {
    saleability: Option<String>,
    list_price: Option<ListPrice>,
}

#[derive(Debug, Deserialize)]
struct ListPrice {
    amount: Option<Decimal>,
}

impl From<VolumeItem> for BookSearchResult {
    fn from(item: VolumeItem) -> Self {
        let info = item.volume_info;

        // 优先 ISBN，没有时退回卷 ID
        let isbn = info
            .industry_identifiers
            .iter()
            .find(|id| id.kind == "ISBN_13" || id.kind == "ISBN_10")
            .map(|id| id.identifier.clone())
            .unwrap_or(item.id);

        // 只有可售卷的标价才有意义
        let price = match item.sale_info.saleability.as_deref() {
            Some("FOR_SALE") => item.sale_info.list_price.and_then(|p| p.amount),
            _ => None,
        };

        let author = if info.authors.is_empty() {
            "Unknown Author".to_string()
        } else {
            info.authors.join(", ")
        };

        BookSearchResult {
            isbn,
            title: info.title.unwrap_or_else(|| "Unknown Title".to_string()),
            author,
            price,
            rating: info.average_rating,
            reviews_count: info.ratings_count,
            page_count: info.page_count,
            category: info.categories.join(", "),
            publisher: info.publisher,
            published_date: info.published_date,
            description: info.description.unwrap_or_default(),
            thumbnail_url: info.image_links.and_then(|links| links.thumbnail),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Google Books 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleBooksClientConfig {
    /// volumes 接口 URL
    pub api_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GoogleBooksClientConfig {
    fn default() -> Self {
        Self {
            api_url: "https://www.googleapis.com/books/v1/volumes".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Google Books 客户端
pub struct GoogleBooksClient {
    client: Client,
    config: GoogleBooksClientConfig,
}

impl GoogleBooksClient {
    pub fn new(config: GoogleBooksClientConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl BookSearchPort for GoogleBooksClient {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<BookSearchResult>, SearchError> {
        tracing::debug!(url = %self.config.api_url, query = %query, "Sending book search request");

        let max_results = max_results.to_string();
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[("q", query), ("maxResults", max_results.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else if e.is_connect() {
                    SearchError::NetworkError(format!("Cannot connect to book catalogue: {}", e))
                } else {
                    SearchError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::ServiceError(format!("HTTP {}: {}", status, error_text)));
        }

        let body: VolumesResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        Ok(body.items.into_iter().map(BookSearchResult::from).collect())
    }
}
