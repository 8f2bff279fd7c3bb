//! Cache-backed pager over the RAG query log.
//!
//! One fetch function, keyed by the full request identity — dataset, page,
//! filter, sort key, sort order. Repeated fetches for an identical key
//! reuse the cached rows instead of issuing a new network call; changing
//! the filter or sort changes the key, so stale pages are never reused.
//! Prefetching the next page is a separate, optional warm call on the same
//! cache.

use std::collections::HashMap;

use anyhow::Result;

use crate::api::SearchApi;
use crate::api::types::{RagAnalyticsFilter, RagQueriesReq, RagQueryEvent, RagSortBy, SortOrder};

// ---------------------------------------------------------------------------
// Cache key and render state
// ---------------------------------------------------------------------------

/// Full identity of one page fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PageKey {
    dataset_id: String,
    page: u32,
    filter: RagAnalyticsFilter,
    sort_by: RagSortBy,
    sort_order: SortOrder,
}

/// What the view should show for the current page. The three states are
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    /// No response for the current key has arrived yet.
    Loading,
    /// The current page resolved to an empty result set.
    Empty,
    /// The current page's rows, in server order.
    Rows(Vec<RagQueryEvent>),
}

// ---------------------------------------------------------------------------
// Pager
// ---------------------------------------------------------------------------

/// Paginated, sortable view state for one dataset's RAG query log.
#[derive(Debug, Clone)]
pub struct RagQueryPager {
    dataset_id: String,
    filter: RagAnalyticsFilter,
    sort_by: RagSortBy,
    sort_order: SortOrder,
    /// 0-based current page index.
    page: u32,
    /// Highest page known to contain data; discovered when a prefetch
    /// comes back empty. `None` until then — forward navigation is open.
    max_page_discovered: Option<u32>,
    cache: HashMap<PageKey, Vec<RagQueryEvent>>,
}

impl RagQueryPager {
    pub fn new(dataset_id: impl Into<String>, filter: RagAnalyticsFilter) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            filter,
            sort_by: RagSortBy::CreatedAt,
            sort_order: SortOrder::Asc,
            page: 0,
            max_page_discovered: None,
            cache: HashMap::new(),
        }
    }

    fn key_for(&self, page: u32) -> PageKey {
        PageKey {
            dataset_id: self.dataset_id.clone(),
            page,
            filter: self.filter.clone(),
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }

    /// Fetch a page through the cache. Identical keys hit the cache;
    /// anything else goes to the network once.
    fn fetch_page(&mut self, api: &dyn SearchApi, page: u32) -> Result<&[RagQueryEvent]> {
        let key = self.key_for(page);
        if !self.cache.contains_key(&key) {
            let rows = api.get_rag_queries(&RagQueriesReq {
                dataset_id: self.dataset_id.clone(),
                page,
                filter: self.filter.clone(),
                sort_by: Some(self.sort_by),
                sort_order: Some(self.sort_order),
            })?;
            self.cache.insert(key.clone(), rows);
        }
        Ok(self.cache.get(&key).map(Vec::as_slice).unwrap_or_default())
    }

    /// Fetch the current page (cache-backed).
    pub fn fetch_current(&mut self, api: &dyn SearchApi) -> Result<&[RagQueryEvent]> {
        self.fetch_page(api, self.page)
    }

    /// Warm the next page in the background cache.
    ///
    /// If the next page comes back empty, the current page is recorded as
    /// the upper bound and forward navigation past it is refused.
    pub fn prefetch_next(&mut self, api: &dyn SearchApi) -> Result<()> {
        let next = self.page + 1;
        let empty = self.fetch_page(api, next)?.is_empty();
        if empty {
            self.max_page_discovered = Some(self.page);
        }
        Ok(())
    }

    /// Fetch the current page and warm the next one.
    pub fn refresh(&mut self, api: &dyn SearchApi) -> Result<RenderState> {
        self.fetch_current(api)?;
        self.prefetch_next(api)?;
        Ok(self.render_state())
    }

    /// What the view should currently display.
    pub fn render_state(&self) -> RenderState {
        match self.cache.get(&self.key_for(self.page)) {
            None => RenderState::Loading,
            Some(rows) if rows.is_empty() => RenderState::Empty,
            Some(rows) => RenderState::Rows(rows.clone()),
        }
    }

    // -- navigation ---------------------------------------------------------

    /// Move forward one page. Refused at the discovered upper bound.
    pub fn next_page(&mut self) -> bool {
        if self
            .max_page_discovered
            .is_some_and(|max| self.page >= max)
        {
            return false;
        }
        self.page += 1;
        true
    }

    /// Move back one page. Refused at page 0.
    pub fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        true
    }

    // -- key-changing inputs ------------------------------------------------

    /// Change the sort key. Resets nothing else; the cache key changes, so
    /// previously cached pages for other sorts are simply not reused.
    pub fn set_sort_by(&mut self, sort_by: RagSortBy) {
        self.sort_by = sort_by;
        self.max_page_discovered = None;
    }

    /// Change the sort direction. Same cache-key semantics as
    /// [`set_sort_by`](Self::set_sort_by).
    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.sort_order = sort_order;
        self.max_page_discovered = None;
    }

    /// Replace the filter. The page index is kept; the bound is rediscovered
    /// under the new filter.
    pub fn set_filter(&mut self, filter: RagAnalyticsFilter) {
        self.filter = filter;
        self.max_page_discovered = None;
    }

    // -- accessors ----------------------------------------------------------

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn max_page_discovered(&self) -> Option<u32> {
        self.max_page_discovered
    }

    pub fn sort_by(&self) -> RagSortBy {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
