//! RAG analytics display state.
//!
//! [`RagQueryPager`] drives a sortable, paginated view over the platform's
//! RAG query log. Fetches are deduplicated through a cache keyed by
//! `(dataset, page, filter, sort)`; the pager eagerly warms the next page
//! so forward navigation is instant, and an empty prefetch discovers the
//! upper page bound.

pub mod pager;

pub use pager::{RagQueryPager, RenderState};
