//! Public page configuration state.
//!
//! [`PublicPageStore`] owns the editable configuration for one dataset's
//! public search widget. The store is the only writer of its in-memory
//! copy; the remote API is the source of truth on reload. Lifecycle:
//!
//! 1. [`PublicPageStore::load`] pulls the server-side record, backfills
//!    hero-pattern inputs and behavior-flag defaults, and flips the
//!    `loaded` gate.
//! 2. Field setters mutate one field each; the hero setters re-derive the
//!    persisted hero block through the pure [`derive_hero_pattern`].
//! 3. [`publish`](PublicPageStore::publish) /
//!    [`unpublish`](PublicPageStore::unpublish) (see [`publish`] module)
//!    write the whole record back.

pub mod options;
pub mod patterns;
pub mod publish;

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::SearchApi;
use crate::api::types::CrawlOptions;
pub use publish::PublishState;

// ---------------------------------------------------------------------------
// Persisted shapes (widget `extra_params`)
// ---------------------------------------------------------------------------

/// Light/dark theme of the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Widget page flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    #[default]
    Docs,
    Ecommerce,
}

/// Where the currency symbol sits relative to the amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    #[default]
    Prefix,
    Suffix,
}

/// Initial widget mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Search,
    Chat,
}

/// The persisted hero pattern block.
///
/// `hero_pattern_svg` and the fractional opacity are derived — never edited
/// directly. They are recomputed by the store whenever any hero input
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroPatternParams {
    pub hero_pattern_svg: String,
    pub hero_pattern_name: String,
    pub foreground_color: String,
    /// Fraction in `0.0..=1.0` (the UI edits a 0–100 percentage).
    pub foreground_opacity: f64,
    pub background_color: String,
}

impl HeroPatternParams {
    /// The reset state used when the pattern is `"Blank"`.
    pub fn blank() -> Self {
        Self {
            hero_pattern_svg: String::new(),
            hero_pattern_name: String::new(),
            foreground_color: "#ffffff".to_string(),
            foreground_opacity: 0.5,
            background_color: "#ffffff".to_string(),
        }
    }
}

impl Default for HeroPatternParams {
    fn default() -> Self {
        Self::blank()
    }
}

/// The widget configuration persisted under
/// `server_configuration.PUBLIC_DATASET.extra_params`.
///
/// Everything is optional on the wire; `None` means the server has never
/// stored the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicPageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_logo_img_src_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    // Behavior flags. `analytics`, `suggested_queries`, and `chat` default
    // to true, applied at load only when the server never set them — a
    // stored false stays false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_queries: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub page_type: Option<PageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_group_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_switching_modes: Option<bool>,

    /// Validated free-form search options. Only ever holds output of
    /// [`options::validate_search_options`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_options: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_search_queries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_ai_questions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_position: Option<CurrencyPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_search_mode: Option<SearchMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_pattern: Option<HeroPatternParams>,
}

// ---------------------------------------------------------------------------
// Hero derivation
// ---------------------------------------------------------------------------

/// UI-level hero pattern inputs.
///
/// The opacity is the 0–100 slider value; conversion to the persisted
/// fraction happens in [`derive_hero_pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroInputs {
    pub pattern_name: String,
    pub foreground_color: String,
    pub foreground_opacity: u8,
    pub background_color: String,
}

impl Default for HeroInputs {
    fn default() -> Self {
        Self {
            pattern_name: patterns::BLANK.to_string(),
            foreground_color: "#ffffff".to_string(),
            foreground_opacity: 50,
            background_color: "#ffffff".to_string(),
        }
    }
}

/// Derive the persisted hero block from the UI inputs.
///
/// Pure: same inputs always produce the same block. `"Blank"` (and any
/// unknown pattern name) yields [`HeroPatternParams::blank`].
pub fn derive_hero_pattern(inputs: &HeroInputs) -> HeroPatternParams {
    let opacity = f64::from(inputs.foreground_opacity.min(100)) / 100.0;

    match patterns::render(&inputs.pattern_name, &inputs.foreground_color, opacity) {
        Some(svg) if inputs.pattern_name != patterns::BLANK => HeroPatternParams {
            hero_pattern_svg: svg,
            hero_pattern_name: inputs.pattern_name.clone(),
            foreground_color: inputs.foreground_color.clone(),
            foreground_opacity: opacity,
            background_color: inputs.background_color.clone(),
        },
        _ => HeroPatternParams::blank(),
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Editable public page configuration for one dataset.
#[derive(Debug, Clone)]
pub struct PublicPageStore {
    dataset_id: String,
    params: PublicPageParams,
    hero: HeroInputs,
    /// Scoped API key reference created at first publish. Never rotated.
    api_key: Option<String>,
    state: PublishState,
    /// Gates derived recomputation so freshly loaded data is not clobbered
    /// before backfill completes.
    loaded: bool,
    search_options_error: Option<String>,
}

impl PublicPageStore {
    /// Create an empty store for a dataset. Nothing is fetched until
    /// [`load`](Self::load).
    pub fn new(dataset_id: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            params: PublicPageParams::default(),
            hero: HeroInputs::default(),
            api_key: None,
            state: PublishState::Private,
            loaded: false,
            search_options_error: None,
        }
    }

    /// Populate the store from the dataset's server-side configuration.
    ///
    /// Backfills hero inputs from the stored block (black foreground and
    /// background, 50 % opacity, `"Blank"` when absent) and applies the
    /// true-defaults for `analytics`, `suggested_queries`, and `chat` when
    /// the server never set them. Finishes by enabling derived
    /// recomputation and re-deriving the hero block once.
    pub fn load(&mut self, api: &dyn SearchApi) -> Result<()> {
        ensure!(!self.dataset_id.is_empty(), "dataset id must not be empty");

        let dataset = api.get_dataset(&self.dataset_id)?;
        let public = dataset.server_configuration.public_dataset.unwrap_or_default();

        self.state = if public.enabled {
            PublishState::Public
        } else {
            PublishState::Private
        };
        self.api_key = public.api_key;
        self.params = public.extra_params.unwrap_or_default();

        // An absent block backfills the same way as present-but-empty
        // fields; only a stored block keeps its own colors.
        let stored = self.params.hero_pattern.clone().unwrap_or(HeroPatternParams {
            hero_pattern_svg: String::new(),
            hero_pattern_name: String::new(),
            foreground_color: String::new(),
            foreground_opacity: 0.5,
            background_color: String::new(),
        });
        self.hero = HeroInputs {
            pattern_name: if stored.hero_pattern_name.is_empty() {
                patterns::BLANK.to_string()
            } else {
                stored.hero_pattern_name
            },
            foreground_color: if stored.foreground_color.is_empty() {
                "#000000".to_string()
            } else {
                stored.foreground_color
            },
            foreground_opacity: (stored.foreground_opacity.clamp(0.0, 1.0) * 100.0).round() as u8,
            background_color: if stored.background_color.is_empty() {
                "#000000".to_string()
            } else {
                stored.background_color
            },
        };

        if self.params.analytics.is_none() {
            self.params.analytics = Some(true);
        }
        if self.params.suggested_queries.is_none() {
            self.params.suggested_queries = Some(true);
        }
        if self.params.chat.is_none() {
            self.params.chat = Some(true);
        }

        self.loaded = true;
        self.recompute_hero();
        Ok(())
    }

    /// Fetch the dataset's crawl configuration and apply its defaults.
    pub fn load_crawl_defaults(&mut self, api: &dyn SearchApi) -> Result<()> {
        let crawl = api.get_crawl_options(&self.dataset_id)?;
        self.apply_crawl_defaults(crawl.as_ref());
        Ok(())
    }

    /// When a storefront scraper is active and `use_group_search` has never
    /// been set, default it to `true`. An explicit value — from the server
    /// or the user — is never overridden.
    pub fn apply_crawl_defaults(&mut self, crawl: Option<&CrawlOptions>) {
        if crawl.is_some_and(CrawlOptions::is_shopify) && self.params.use_group_search.is_none() {
            self.params.use_group_search = Some(true);
        }
    }

    // -- hero setters -------------------------------------------------------

    pub fn set_hero_pattern(&mut self, name: impl Into<String>) {
        self.hero.pattern_name = name.into();
        self.recompute_hero();
    }

    pub fn set_foreground_color(&mut self, color: impl Into<String>) {
        self.hero.foreground_color = color.into();
        self.recompute_hero();
    }

    /// Opacity as the UI's 0–100 percentage.
    pub fn set_foreground_opacity(&mut self, percent: u8) {
        self.hero.foreground_opacity = percent.min(100);
        self.recompute_hero();
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.hero.background_color = color.into();
        self.recompute_hero();
    }

    fn recompute_hero(&mut self) {
        if !self.loaded {
            return;
        }
        self.params.hero_pattern = Some(derive_hero_pattern(&self.hero));
    }

    // -- search options -----------------------------------------------------

    /// Validate and store the widget's search options.
    ///
    /// On failure the message is retained (blocking publish) and the
    /// previously stored options are kept; other edits are unaffected.
    pub fn set_search_options(&mut self, value: &Value) -> Result<(), String> {
        match options::validate_search_options(value) {
            Ok(normalized) => {
                self.params.search_options = Some(normalized);
                self.search_options_error = None;
                Ok(())
            }
            Err(message) => {
                self.search_options_error = Some(message.clone());
                Err(message)
            }
        }
    }

    // -- plain field setters ------------------------------------------------

    pub fn set_brand_logo_url(&mut self, url: impl Into<String>) {
        self.params.brand_logo_img_src_url = Some(url.into());
    }

    pub fn set_brand_name(&mut self, name: impl Into<String>) {
        self.params.brand_name = Some(name.into());
    }

    pub fn set_brand_color(&mut self, color: impl Into<String>) {
        self.params.brand_color = Some(color.into());
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.params.theme = Some(theme);
    }

    pub fn set_problem_link(&mut self, link: impl Into<String>) {
        self.params.problem_link = Some(link.into());
    }

    pub fn set_placeholder(&mut self, text: impl Into<String>) {
        self.params.placeholder = Some(text.into());
    }

    pub fn set_responsive(&mut self, on: bool) {
        self.params.responsive = Some(on);
    }

    pub fn set_analytics(&mut self, on: bool) {
        self.params.analytics = Some(on);
    }

    pub fn set_suggested_queries(&mut self, on: bool) {
        self.params.suggested_queries = Some(on);
    }

    pub fn set_chat(&mut self, on: bool) {
        self.params.chat = Some(on);
    }

    /// The ecommerce checkbox toggles the page type between the two flavors.
    pub fn set_ecommerce_mode(&mut self, on: bool) {
        self.params.page_type = Some(if on {
            PageType::Ecommerce
        } else {
            PageType::Docs
        });
    }

    pub fn set_use_group_search(&mut self, on: bool) {
        self.params.use_group_search = Some(on);
    }

    pub fn set_allow_switching_modes(&mut self, on: bool) {
        self.params.allow_switching_modes = Some(on);
    }

    pub fn set_default_search_queries(&mut self, queries: Vec<String>) {
        self.params.default_search_queries = Some(queries);
    }

    pub fn set_default_ai_questions(&mut self, questions: Vec<String>) {
        self.params.default_ai_questions = Some(questions);
    }

    pub fn set_default_currency(&mut self, currency: impl Into<String>) {
        self.params.default_currency = Some(currency.into());
    }

    pub fn set_currency_position(&mut self, position: CurrencyPosition) {
        self.params.currency_position = Some(position);
    }

    pub fn set_default_search_mode(&mut self, mode: SearchMode) {
        self.params.default_search_mode = Some(mode);
    }

    pub fn set_debounce_ms(&mut self, ms: u32) {
        self.params.debounce_ms = Some(ms);
    }

    // -- accessors ----------------------------------------------------------

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    pub fn params(&self) -> &PublicPageParams {
        &self.params
    }

    pub fn hero_inputs(&self) -> &HeroInputs {
        &self.hero
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn publish_state(&self) -> PublishState {
        self.state
    }

    pub fn is_public(&self) -> bool {
        self.state == PublishState::Public
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The message blocking publish, if search options validation failed.
    pub fn search_options_error(&self) -> Option<&str> {
        self.search_options_error.as_deref()
    }

    /// Whether the publish/save action is currently allowed.
    pub fn can_publish(&self) -> bool {
        self.search_options_error.is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
