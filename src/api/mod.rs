//! Platform HTTP API client.
//!
//! [`SearchApi`] is the seam between this crate's state machinery and the
//! remote platform: the store, publish workflow, and analytics pager all
//! take `&dyn SearchApi` so tests can substitute a scripted implementation.
//!
//! [`HttpApi`] is the production implementation over the synchronous `ureq`
//! client. Every call is fail-stop: a network or HTTP error propagates as
//! `anyhow::Error` and the caller's state is left unchanged. No retries, no
//! timeouts beyond the configured per-request budget.

pub mod types;

use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::VitrineConfig;
use types::{
    ApiKeyResp, CrawlOptions, CrawlOptionsResponse, CreateApiKeyReq, DatasetWithPublicPage,
    RagQueriesReq, RagQueriesResponse, RagQueryEvent, UpdateDatasetReq,
};

// ---------------------------------------------------------------------------
// Trait seam
// ---------------------------------------------------------------------------

/// Remote operations the dashboard state depends on.
///
/// `organization_id` is passed explicitly where the server scopes the call
/// to an organization, rather than read from ambient state.
pub trait SearchApi {
    /// Fetch a dataset record including its public page configuration.
    fn get_dataset(&self, dataset_id: &str) -> Result<DatasetWithPublicPage>;

    /// Update a dataset's server configuration.
    fn update_dataset(&self, organization_id: &str, req: &UpdateDatasetReq) -> Result<()>;

    /// Fetch the dataset's crawl configuration, if one exists.
    fn get_crawl_options(&self, dataset_id: &str) -> Result<Option<CrawlOptions>>;

    /// Create a scoped API key bound to specific datasets and routes.
    fn create_api_key(&self, organization_id: &str, req: &CreateApiKeyReq) -> Result<ApiKeyResp>;

    /// Fetch one page of the RAG query log.
    fn get_rag_queries(&self, req: &RagQueriesReq) -> Result<Vec<RagQueryEvent>>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Synchronous HTTP client for the platform API.
///
/// Built from a [`VitrineConfig`] and reused for the lifetime of a dashboard
/// session. Authentication is the configured admin key on every request;
/// organization and dataset scoping travel in the `X-Organization` and
/// `X-Dataset` headers.
#[derive(Debug, Clone)]
pub struct HttpApi {
    host: String,
    api_key: String,
    timeout: Duration,
}

impl HttpApi {
    /// Build a client from the resolved config.
    pub fn from_config(config: &VitrineConfig) -> Self {
        Self {
            host: config.api.host.trim_end_matches('/').to_string(),
            api_key: config.api.key.clone(),
            timeout: Duration::from_millis(config.api.timeout_ms),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.host)
    }
}

impl SearchApi for HttpApi {
    fn get_dataset(&self, dataset_id: &str) -> Result<DatasetWithPublicPage> {
        let resp = ureq::get(&self.url(&format!("/dataset/{dataset_id}")))
            .set("Authorization", &self.api_key)
            .timeout(self.timeout)
            .call()
            .with_context(|| format!("failed to fetch dataset {dataset_id}"))?;

        resp.into_json()
            .context("failed to parse dataset response")
    }

    fn update_dataset(&self, organization_id: &str, req: &UpdateDatasetReq) -> Result<()> {
        ureq::put(&self.url("/dataset"))
            .set("Authorization", &self.api_key)
            .set("X-Organization", organization_id)
            .timeout(self.timeout)
            .send_json(req)
            .with_context(|| format!("failed to update dataset {}", req.dataset_id))?;

        Ok(())
    }

    fn get_crawl_options(&self, dataset_id: &str) -> Result<Option<CrawlOptions>> {
        let resp = ureq::get(&self.url(&format!("/dataset/crawl_options/{dataset_id}")))
            .set("Authorization", &self.api_key)
            .timeout(self.timeout)
            .call()
            .with_context(|| format!("failed to fetch crawl options for {dataset_id}"))?;

        let parsed: CrawlOptionsResponse = resp
            .into_json()
            .context("failed to parse crawl options response")?;

        Ok(parsed.crawl_options)
    }

    fn create_api_key(&self, organization_id: &str, req: &CreateApiKeyReq) -> Result<ApiKeyResp> {
        let resp = ureq::post(&self.url("/organization/api_key"))
            .set("Authorization", &self.api_key)
            .set("X-Organization", organization_id)
            .timeout(self.timeout)
            .send_json(req)
            .with_context(|| format!("failed to create API key {}", req.name))?;

        resp.into_json().context("failed to parse API key response")
    }

    fn get_rag_queries(&self, req: &RagQueriesReq) -> Result<Vec<RagQueryEvent>> {
        let body = serde_json::json!({
            "type": "rag_queries",
            "page": req.page,
            "filter": req.filter,
            "sort_by": req.sort_by,
            "sort_order": req.sort_order,
        });

        let resp = ureq::post(&self.url("/analytics/rag"))
            .set("Authorization", &self.api_key)
            .set("X-Dataset", &req.dataset_id)
            .timeout(self.timeout)
            .send_json(body)
            .with_context(|| {
                format!(
                    "failed to fetch RAG queries for {} page {}",
                    req.dataset_id, req.page
                )
            })?;

        let parsed: RagQueriesResponse = resp
            .into_json()
            .context("failed to parse RAG queries response")?;

        Ok(parsed.queries)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
