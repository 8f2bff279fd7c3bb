//! Public page store and publish workflow tests.
//!
//! Uses a scripted [`SearchApi`] implementation so every remote interaction
//! is observable: which calls were made, in what order, with what payloads.

use std::cell::{Cell, RefCell};

use anyhow::{Result, bail};
use serde_json::json;

use vitrine::api::SearchApi;
use vitrine::api::types::{
    ApiKeyResp, CrawlOptions, CreateApiKeyReq, DatasetWithPublicPage, PublicDatasetOptions,
    RagQueriesReq, RagQueryEvent, ScrapeOptions, ServerConfiguration, UpdateDatasetReq,
};
use vitrine::public_page::{
    HeroPatternParams, PublicPageStore, PublishState, patterns,
};

// ---------------------------------------------------------------------------
// Scripted API
// ---------------------------------------------------------------------------

/// What the store asked the remote to do.
#[derive(Debug, Clone)]
enum Call {
    GetDataset(String),
    UpdateDataset(String, UpdateDatasetReq),
    GetCrawlOptions(String),
    CreateApiKey(String, CreateApiKeyReq),
}

#[derive(Default)]
struct ScriptedApi {
    dataset: RefCell<DatasetWithPublicPage>,
    crawl: RefCell<Option<CrawlOptions>>,
    issued_key: RefCell<String>,
    fail_update: Cell<bool>,
    fail_key_creation: Cell<bool>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedApi {
    fn new() -> Self {
        let api = Self::default();
        *api.issued_key.borrow_mut() = "vt-generated-key".to_string();
        api
    }

    fn with_dataset(dataset: DatasetWithPublicPage) -> Self {
        let api = Self::new();
        *api.dataset.borrow_mut() = dataset;
        api
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn key_creations(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::CreateApiKey(..)))
            .count()
    }

    fn last_update(&self) -> UpdateDatasetReq {
        self.calls()
            .iter()
            .rev()
            .find_map(|c| match c {
                Call::UpdateDataset(_, req) => Some(req.clone()),
                _ => None,
            })
            .expect("no update_dataset call recorded")
    }
}

impl SearchApi for ScriptedApi {
    fn get_dataset(&self, dataset_id: &str) -> Result<DatasetWithPublicPage> {
        self.calls
            .borrow_mut()
            .push(Call::GetDataset(dataset_id.to_string()));
        Ok(self.dataset.borrow().clone())
    }

    fn update_dataset(&self, organization_id: &str, req: &UpdateDatasetReq) -> Result<()> {
        self.calls.borrow_mut().push(Call::UpdateDataset(
            organization_id.to_string(),
            req.clone(),
        ));
        if self.fail_update.get() {
            bail!("simulated update failure");
        }
        Ok(())
    }

    fn get_crawl_options(&self, dataset_id: &str) -> Result<Option<CrawlOptions>> {
        self.calls
            .borrow_mut()
            .push(Call::GetCrawlOptions(dataset_id.to_string()));
        Ok(self.crawl.borrow().clone())
    }

    fn create_api_key(&self, organization_id: &str, req: &CreateApiKeyReq) -> Result<ApiKeyResp> {
        self.calls.borrow_mut().push(Call::CreateApiKey(
            organization_id.to_string(),
            req.clone(),
        ));
        if self.fail_key_creation.get() {
            bail!("simulated key creation failure");
        }
        Ok(ApiKeyResp {
            api_key: self.issued_key.borrow().clone(),
        })
    }

    fn get_rag_queries(&self, _req: &RagQueriesReq) -> Result<Vec<RagQueryEvent>> {
        Ok(Vec::new())
    }
}

fn shopify_crawl() -> CrawlOptions {
    CrawlOptions {
        scrape_options: Some(ScrapeOptions {
            kind: Some("shopify".to_string()),
        }),
    }
}

fn published_dataset(api_key: Option<&str>) -> DatasetWithPublicPage {
    DatasetWithPublicPage {
        id: "ds-1".to_string(),
        name: Some("Docs".to_string()),
        server_configuration: ServerConfiguration {
            public_dataset: Some(PublicDatasetOptions {
                enabled: true,
                api_key: api_key.map(str::to_string),
                extra_params: None,
            }),
        },
    }
}

fn loaded_store(api: &ScriptedApi) -> PublicPageStore {
    let mut store = PublicPageStore::new("ds-1");
    store.load(api).unwrap();
    store
}

// ---------------------------------------------------------------------------
// Loading and backfill
// ---------------------------------------------------------------------------

#[test]
fn load_of_unconfigured_dataset_backfills_defaults() {
    let api = ScriptedApi::new();
    let store = loaded_store(&api);

    assert!(store.is_loaded());
    assert_eq!(store.publish_state(), PublishState::Private);
    assert_eq!(store.hero_inputs().pattern_name, "Blank");
    assert_eq!(store.hero_inputs().foreground_color, "#000000");
    assert_eq!(store.hero_inputs().foreground_opacity, 50);
    assert_eq!(store.hero_inputs().background_color, "#000000");

    // True-defaults apply only because the server never set the flags
    assert_eq!(store.params().analytics, Some(true));
    assert_eq!(store.params().suggested_queries, Some(true));
    assert_eq!(store.params().chat, Some(true));
}

#[test]
fn load_preserves_explicitly_disabled_flags() {
    let mut dataset = published_dataset(None);
    dataset
        .server_configuration
        .public_dataset
        .as_mut()
        .unwrap()
        .extra_params = Some(vitrine::public_page::PublicPageParams {
        analytics: Some(false),
        chat: Some(false),
        ..Default::default()
    });

    let api = ScriptedApi::with_dataset(dataset);
    let store = loaded_store(&api);

    // A stored false must never be coerced back to true
    assert_eq!(store.params().analytics, Some(false));
    assert_eq!(store.params().chat, Some(false));
    assert_eq!(store.params().suggested_queries, Some(true));
}

#[test]
fn load_restores_hero_inputs_from_stored_block() {
    let mut dataset = published_dataset(Some("vt-existing"));
    dataset
        .server_configuration
        .public_dataset
        .as_mut()
        .unwrap()
        .extra_params = Some(vitrine::public_page::PublicPageParams {
        hero_pattern: Some(HeroPatternParams {
            hero_pattern_svg: String::new(),
            hero_pattern_name: "Hexagons".to_string(),
            foreground_color: "#cb53eb".to_string(),
            foreground_opacity: 0.75,
            background_color: "#101010".to_string(),
        }),
        ..Default::default()
    });

    let api = ScriptedApi::with_dataset(dataset);
    let store = loaded_store(&api);

    assert_eq!(store.hero_inputs().pattern_name, "Hexagons");
    assert_eq!(store.hero_inputs().foreground_opacity, 75);
    assert_eq!(store.publish_state(), PublishState::Public);
    assert_eq!(store.api_key(), Some("vt-existing"));

    // Load finishes with one re-derivation from the restored inputs
    let hero = store.params().hero_pattern.as_ref().unwrap();
    assert_eq!(
        hero.hero_pattern_svg,
        patterns::render("Hexagons", "#cb53eb", 0.75).unwrap()
    );
}

#[test]
fn load_keeps_stored_blank_block_colors() {
    let mut dataset = published_dataset(None);
    dataset
        .server_configuration
        .public_dataset
        .as_mut()
        .unwrap()
        .extra_params = Some(vitrine::public_page::PublicPageParams {
        hero_pattern: Some(HeroPatternParams {
            hero_pattern_svg: String::new(),
            hero_pattern_name: "Blank".to_string(),
            foreground_color: "#ffffff".to_string(),
            foreground_opacity: 0.5,
            background_color: "#ffffff".to_string(),
        }),
        ..Default::default()
    });

    let api = ScriptedApi::with_dataset(dataset);
    let store = loaded_store(&api);

    // A stored block keeps its own colors; the black backfill is only for
    // a missing block or missing fields
    assert_eq!(store.hero_inputs().pattern_name, "Blank");
    assert_eq!(store.hero_inputs().foreground_color, "#ffffff");
    assert_eq!(store.hero_inputs().foreground_opacity, 50);
    assert_eq!(store.hero_inputs().background_color, "#ffffff");
}

#[test]
fn load_rejects_empty_dataset_id() {
    let api = ScriptedApi::new();
    let mut store = PublicPageStore::new("");
    assert!(store.load(&api).is_err());
    assert!(api.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Derived hero recomputation
// ---------------------------------------------------------------------------

#[test]
fn hero_changes_after_load_rederive_svg() {
    let api = ScriptedApi::new();
    let mut store = loaded_store(&api);

    store.set_hero_pattern("Topography");
    store.set_foreground_color("#cb53eb");
    store.set_foreground_opacity(80);

    let hero = store.params().hero_pattern.as_ref().unwrap();
    assert_eq!(
        hero.hero_pattern_svg,
        patterns::render("Topography", "#cb53eb", 0.8).unwrap()
    );
    assert_eq!(hero.foreground_opacity, 0.8);

    // Changing only the color changes the svg
    store.set_foreground_color("#000000");
    let hero = store.params().hero_pattern.as_ref().unwrap();
    assert_eq!(
        hero.hero_pattern_svg,
        patterns::render("Topography", "#000000", 0.8).unwrap()
    );
}

#[test]
fn selecting_blank_resets_hero_block() {
    let api = ScriptedApi::new();
    let mut store = loaded_store(&api);

    store.set_hero_pattern("Hexagons");
    store.set_foreground_color("#cb53eb");
    store.set_background_color("#222222");
    store.set_hero_pattern("Blank");

    assert_eq!(
        store.params().hero_pattern,
        Some(HeroPatternParams::blank())
    );
}

// ---------------------------------------------------------------------------
// Crawl-driven defaults
// ---------------------------------------------------------------------------

#[test]
fn shopify_crawl_defaults_group_search_on() {
    let api = ScriptedApi::new();
    *api.crawl.borrow_mut() = Some(shopify_crawl());

    let mut store = loaded_store(&api);
    assert_eq!(store.params().use_group_search, None);

    store.load_crawl_defaults(&api).unwrap();
    assert_eq!(store.params().use_group_search, Some(true));
}

#[test]
fn crawl_default_never_overrides_explicit_value() {
    let api = ScriptedApi::new();
    let mut store = loaded_store(&api);

    store.set_use_group_search(false);
    store.apply_crawl_defaults(Some(&shopify_crawl()));
    assert_eq!(store.params().use_group_search, Some(false));

    store.set_use_group_search(true);
    store.apply_crawl_defaults(Some(&shopify_crawl()));
    assert_eq!(store.params().use_group_search, Some(true));
}

#[test]
fn non_shopify_crawl_leaves_group_search_unset() {
    let api = ScriptedApi::new();
    let mut store = loaded_store(&api);

    store.apply_crawl_defaults(None);
    assert_eq!(store.params().use_group_search, None);

    let docs_crawl = CrawlOptions {
        scrape_options: Some(ScrapeOptions {
            kind: Some("docs".to_string()),
        }),
    };
    store.apply_crawl_defaults(Some(&docs_crawl));
    assert_eq!(store.params().use_group_search, None);
}

// ---------------------------------------------------------------------------
// Publish workflow
// ---------------------------------------------------------------------------

#[test]
fn first_publish_creates_key_then_updates_config() {
    let api = ScriptedApi::new();
    let mut store = loaded_store(&api);
    store.set_brand_name("Acme");

    let toast = store.publish(&api, "org-1").unwrap();
    assert_eq!(store.publish_state(), PublishState::Public);
    assert!(toast.title.contains("ds-1"));
    assert!(toast.title.contains("Created API key"));

    // Key creation happens before the config write
    let calls = api.calls();
    let key_pos = calls
        .iter()
        .position(|c| matches!(c, Call::CreateApiKey(..)))
        .unwrap();
    let update_pos = calls
        .iter()
        .position(|c| matches!(c, Call::UpdateDataset(..)))
        .unwrap();
    assert!(key_pos < update_pos);

    // The fresh key and the edited params travel in the update payload
    let update = api.last_update();
    let public = update.server_configuration.public_dataset.unwrap();
    assert!(public.enabled);
    assert_eq!(public.api_key.as_deref(), Some("vt-generated-key"));
    assert_eq!(
        public.extra_params.unwrap().brand_name.as_deref(),
        Some("Acme")
    );
    assert_eq!(store.api_key(), Some("vt-generated-key"));
}

#[test]
fn first_publish_key_request_is_scoped_to_dataset() {
    let api = ScriptedApi::new();
    let mut store = loaded_store(&api);
    store.publish(&api, "org-1").unwrap();

    let req = api
        .calls()
        .into_iter()
        .find_map(|c| match c {
            Call::CreateApiKey(org, req) => Some((org, req)),
            _ => None,
        })
        .unwrap();
    assert_eq!(req.0, "org-1");
    assert_eq!(req.1.name, "ds-1-pregenerated-search-component");
    assert_eq!(req.1.role, 0);
    assert_eq!(req.1.dataset_ids, vec!["ds-1".to_string()]);
    assert!(!req.1.scopes.is_empty());
}

#[test]
fn second_publish_skips_key_creation() {
    let api = ScriptedApi::with_dataset(published_dataset(Some("vt-existing")));
    let mut store = loaded_store(&api);

    let toast = store.publish(&api, "org-1").unwrap();
    assert_eq!(api.key_creations(), 0);
    assert!(toast.title.contains("Updated"));

    // The existing key is not resent in the idempotent save
    let update = api.last_update();
    let public = update.server_configuration.public_dataset.unwrap();
    assert!(public.enabled);
    assert_eq!(public.api_key, None);
    assert_eq!(store.api_key(), Some("vt-existing"));
}

#[test]
fn publish_refused_while_search_options_invalid() {
    let api = ScriptedApi::new();
    let mut store = loaded_store(&api);
    let _ = store.set_search_options(&json!({"page_size": "lots"}));

    let err = store.publish(&api, "org-1").unwrap_err();
    assert!(err.to_string().contains("page_size"));
    assert_eq!(store.publish_state(), PublishState::Private);
    assert_eq!(api.key_creations(), 0);

    // Nothing reaches the wire while the options are invalid
    assert!(
        !api.calls()
            .iter()
            .any(|c| matches!(c, Call::UpdateDataset(..)))
    );
}

#[test]
fn failed_update_rolls_publish_back() {
    let api = ScriptedApi::new();
    let mut store = loaded_store(&api);
    api.fail_update.set(true);

    assert!(store.publish(&api, "org-1").is_err());
    assert_eq!(store.publish_state(), PublishState::Private);
}

#[test]
fn failed_key_creation_rolls_publish_back() {
    let api = ScriptedApi::new();
    let mut store = loaded_store(&api);
    api.fail_key_creation.set(true);

    assert!(store.publish(&api, "org-1").is_err());
    assert_eq!(store.publish_state(), PublishState::Private);
    assert_eq!(store.api_key(), None);
}

// ---------------------------------------------------------------------------
// Unpublish
// ---------------------------------------------------------------------------

#[test]
fn unpublish_disables_without_touching_key() {
    let api = ScriptedApi::with_dataset(published_dataset(Some("vt-existing")));
    let mut store = loaded_store(&api);

    let toast = store.unpublish(&api, "org-1").unwrap();
    assert_eq!(store.publish_state(), PublishState::Private);
    assert_eq!(toast.title, "Made dataset ds-1 private");

    let update = api.last_update();
    let public = update.server_configuration.public_dataset.unwrap();
    assert!(!public.enabled);
    assert_eq!(public.api_key, None);
    assert_eq!(public.extra_params, None);

    // The local key reference survives for the next publish
    assert_eq!(store.api_key(), Some("vt-existing"));
}

#[test]
fn failed_unpublish_stays_public() {
    let api = ScriptedApi::with_dataset(published_dataset(Some("vt-existing")));
    let mut store = loaded_store(&api);
    api.fail_update.set(true);

    assert!(store.unpublish(&api, "org-1").is_err());
    assert_eq!(store.publish_state(), PublishState::Public);
}

#[test]
fn republish_after_unpublish_reuses_key() {
    let api = ScriptedApi::with_dataset(published_dataset(Some("vt-existing")));
    let mut store = loaded_store(&api);

    store.unpublish(&api, "org-1").unwrap();
    store.publish(&api, "org-1").unwrap();

    assert_eq!(api.key_creations(), 0);
    assert_eq!(store.publish_state(), PublishState::Public);
}
