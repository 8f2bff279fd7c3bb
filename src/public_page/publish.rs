//! Publish/unpublish workflow for the public page.
//!
//! State machine: `Private -> Publishing -> Public` on publish/save, and
//! `Public -> Unpublishing -> Private` on make-private. A failed remote
//! call rolls the state back to where it started — the transition simply
//! does not occur (fail-stop, no retry).
//!
//! First-ever publish creates a scoped API key (search-component routes
//! only, bound to the single dataset) *before* writing the configuration,
//! and embeds the returned key in the config update. Every later publish is
//! an idempotent save that skips key creation. Unpublish never touches the
//! key.
//!
//! The workflow is not fenced against a second overlapping request while
//! one is in flight; callers hold the single mutable reference and are
//! expected not to reenter.

use anyhow::{Result, bail};

use crate::api::SearchApi;
use crate::api::types::{
    CreateApiKeyReq, PublicDatasetOptions, ServerConfiguration, UpdateDatasetReq,
};
use crate::notify::Toast;

use super::PublicPageStore;

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Where the public page sits in the publish lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Private,
    Publishing,
    Public,
    Unpublishing,
}

impl std::fmt::Display for PublishState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Private => write!(f, "private"),
            Self::Publishing => write!(f, "publishing"),
            Self::Public => write!(f, "public"),
            Self::Unpublishing => write!(f, "unpublishing"),
        }
    }
}

/// Route permissions granted to the generated search-component key.
///
/// Scoped to exactly what the public widget calls — nothing
/// organization-level, nothing destructive.
pub const SEARCH_COMPONENT_SCOPES: &[&str] = &[
    "POST /api/chunk/autocomplete",
    "POST /api/chunk/search",
    "POST /api/chunk/suggestions",
    "POST /api/chunk_group/group_oriented_search",
    "POST /api/message",
    "POST /api/analytics/search",
    "POST /api/analytics/rag",
    "POST /api/analytics/events",
];

/// Read-only role for generated keys.
const API_KEY_ROLE_READ: i32 = 0;

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

impl PublicPageStore {
    /// Publish the dataset's public page, or save settings if already
    /// public.
    ///
    /// Refused while search options validation is failing. On success the
    /// page is `Public` and the returned toast names the dataset and the
    /// action taken; on any remote failure the prior state is restored and
    /// the error propagates.
    pub fn publish(&mut self, api: &dyn SearchApi, organization_id: &str) -> Result<Toast> {
        if let Some(message) = self.search_options_error() {
            bail!("search options are invalid: {message}");
        }

        let prior = self.state;
        self.state = PublishState::Publishing;

        match self.push_config(api, organization_id) {
            Ok(toast) => {
                self.state = PublishState::Public;
                Ok(toast)
            }
            Err(err) => {
                self.state = prior;
                Err(err)
            }
        }
    }

    /// Make the public page private again.
    ///
    /// Sends `enabled = false` only — the scoped API key and the stored
    /// widget parameters are left untouched on the server.
    pub fn unpublish(&mut self, api: &dyn SearchApi, organization_id: &str) -> Result<Toast> {
        let prior = self.state;
        self.state = PublishState::Unpublishing;

        let req = UpdateDatasetReq {
            dataset_id: self.dataset_id().to_string(),
            server_configuration: ServerConfiguration {
                public_dataset: Some(PublicDatasetOptions {
                    enabled: false,
                    api_key: None,
                    extra_params: None,
                }),
            },
        };

        match api.update_dataset(organization_id, &req) {
            Ok(()) => {
                self.state = PublishState::Private;
                Ok(Toast::info(format!(
                    "Made dataset {} private",
                    self.dataset_id()
                )))
            }
            Err(err) => {
                self.state = prior;
                Err(err)
            }
        }
    }

    /// Create the scoped key if this is the first publish, then write the
    /// full configuration.
    fn push_config(&mut self, api: &dyn SearchApi, organization_id: &str) -> Result<Toast> {
        let dataset_id = self.dataset_id().to_string();
        let key_name = format!("{dataset_id}-pregenerated-search-component");

        let (new_key, toast) = if self.api_key().is_none() {
            let resp = api.create_api_key(
                organization_id,
                &CreateApiKeyReq {
                    name: key_name.clone(),
                    role: API_KEY_ROLE_READ,
                    dataset_ids: vec![dataset_id.clone()],
                    scopes: SEARCH_COMPONENT_SCOPES
                        .iter()
                        .map(|s| (*s).to_string())
                        .collect(),
                },
            )?;
            (
                Some(resp.api_key),
                Toast::info(format!(
                    "Created API key for {dataset_id} named {key_name}"
                )),
            )
        } else {
            (
                None,
                Toast::info(format!("Updated public page settings for {dataset_id}")),
            )
        };

        let req = UpdateDatasetReq {
            dataset_id,
            server_configuration: ServerConfiguration {
                public_dataset: Some(PublicDatasetOptions {
                    enabled: true,
                    api_key: new_key.clone(),
                    extra_params: Some(self.params().clone()),
                }),
            },
        };
        api.update_dataset(organization_id, &req)?;

        if let Some(key) = new_key {
            self.api_key = Some(key);
        }
        Ok(toast)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
