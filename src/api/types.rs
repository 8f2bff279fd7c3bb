//! Wire types for the platform API.
//!
//! Request and response bodies for the dataset configuration, crawl options,
//! API key issuance, and RAG analytics endpoints. Field names mirror the
//! server's JSON exactly; the public-page `extra_params` payload itself is
//! defined in [`crate::public_page`] since it is the domain model this crate
//! edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::public_page::PublicPageParams;

// ---------------------------------------------------------------------------
// Dataset configuration
// ---------------------------------------------------------------------------

/// Dataset record as returned by `GET /api/dataset/{dataset_id}`.
///
/// Only the fields this crate reads are modeled; the server sends more.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetWithPublicPage {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub server_configuration: ServerConfiguration,
}

/// The dataset's server-side configuration blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfiguration {
    #[serde(rename = "PUBLIC_DATASET", skip_serializing_if = "Option::is_none")]
    pub public_dataset: Option<PublicDatasetOptions>,
}

/// The `PUBLIC_DATASET` section: published flag, scoped key, widget params.
///
/// Used both when reading the dataset record and as the `PUT /api/dataset`
/// update payload. On unpublish only `enabled` is sent — `api_key` and
/// `extra_params` are omitted so the server keeps its stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicDatasetOptions {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_params: Option<PublicPageParams>,
}

/// Body for `PUT /api/dataset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDatasetReq {
    pub dataset_id: String,
    pub server_configuration: ServerConfiguration,
}

// ---------------------------------------------------------------------------
// Crawl options
// ---------------------------------------------------------------------------

/// Response from `GET /api/dataset/crawl_options/{dataset_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrawlOptionsResponse {
    pub crawl_options: Option<CrawlOptions>,
}

/// The dataset's crawl configuration, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_options: Option<ScrapeOptions>,
}

/// Scraper settings within the crawl configuration.
///
/// `kind` is the wire field `type` — `"shopify"` marks a storefront scraper,
/// which changes the public page's group-search default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl CrawlOptions {
    /// Whether a storefront/commerce-style scraper is active.
    pub fn is_shopify(&self) -> bool {
        self.scrape_options
            .as_ref()
            .and_then(|s| s.kind.as_deref())
            .is_some_and(|kind| kind == "shopify")
    }
}

// ---------------------------------------------------------------------------
// API key issuance
// ---------------------------------------------------------------------------

/// Body for `POST /api/organization/api_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApiKeyReq {
    pub name: String,
    pub role: i32,
    pub dataset_ids: Vec<String>,
    pub scopes: Vec<String>,
}

/// Response from the API key issuance endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyResp {
    pub api_key: String,
}

// ---------------------------------------------------------------------------
// RAG analytics
// ---------------------------------------------------------------------------

/// Sort key for the RAG query log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RagSortBy {
    #[default]
    CreatedAt,
    Latency,
    TopScore,
}

impl RagSortBy {
    /// All sort keys, in display order.
    pub const ALL: [RagSortBy; 3] = [Self::CreatedAt, Self::Latency, Self::TopScore];

    /// Human-readable label for sort selectors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreatedAt => "Created At",
            Self::Latency => "Latency",
            Self::TopScore => "Top Score",
        }
    }
}

impl std::fmt::Display for RagSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreatedAt => write!(f, "created_at"),
            Self::Latency => write!(f, "latency"),
            Self::TopScore => write!(f, "top_score"),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [Self::Asc, Self::Desc];

    /// Human-readable label for sort selectors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Asc => "Ascending",
            Self::Desc => "Descending",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Filter for the RAG query log.
///
/// Hashable so it can participate in the pager's cache key — a filter change
/// must never reuse a page fetched under a different filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RagAnalyticsFilter {
    /// Restrict to one RAG flow type (`"chosen_chunks"` or `"all_chunks"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

/// Half-open timestamp bounds for analytics filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<DateTime<Utc>>,
}

/// Parameters for a RAG query log fetch.
#[derive(Debug, Clone)]
pub struct RagQueriesReq {
    pub dataset_id: String,
    /// 0-based page index.
    pub page: u32,
    pub filter: RagAnalyticsFilter,
    pub sort_by: Option<RagSortBy>,
    pub sort_order: Option<SortOrder>,
}

/// Response envelope from the RAG analytics endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RagQueriesResponse {
    pub queries: Vec<RagQueryEvent>,
}

/// One logged RAG interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagQueryEvent {
    pub id: String,
    pub user_message: String,
    /// RAG flow type used (`"chosen_chunks"` or `"all_chunks"`).
    pub rag_type: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_score: Option<f64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
