//! vitrine — client-side state for hosted public search pages.
//!
//! A thin, typed layer between a dashboard application and a hosted
//! search/RAG platform's HTTP API. Three concerns live here:
//!
//! - **Public page configuration** ([`public_page`]): the editable settings
//!   for a dataset's public search widget, including derived hero-pattern
//!   visuals, search-options validation, and the publish/unpublish workflow.
//! - **Analytics paging** ([`analytics`]): a cache-backed pager over the
//!   platform's RAG query log with background prefetch of the next page.
//! - **Local search-box state** ([`search_state`]): non-persisted UI state
//!   for a search input.
//!
//! The remote API is reached through the [`api::SearchApi`] trait; the
//! production implementation is [`api::HttpApi`], configured via
//! [`config::load`]. All remote failures are fail-stop per action — no
//! retries, no partial transitions.

pub mod analytics;
pub mod api;
pub mod config;
pub mod notify;
pub mod public_page;
pub mod search_state;
