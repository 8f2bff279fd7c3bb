//! Client configuration for vitrine.
//!
//! Layered configuration hierarchy:
//!
//! 1. **Built-in defaults** — hardcoded in [`VitrineConfig::default()`]
//! 2. **User global config** — `~/.vitrine/config.toml`
//! 3. **Project local config** — `.vitrine.toml` in the current working directory
//! 4. **Environment variables** — `VITRINE_*` overrides (highest precedence)
//!
//! Later layers override earlier ones. Missing sections in a TOML file fall
//! back to the previous layer's values.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Top-level vitrine client configuration.
///
/// Maps to the `~/.vitrine/config.toml` and `.vitrine.toml` file schemas.
/// All fields are optional in the files — missing values fall back to
/// built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VitrineConfig {
    pub api: ApiConfig,
}

/// `[api]` — how to reach the platform API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the platform API, including the `/api` suffix.
    pub host: String,
    /// Admin/owner API key used for dashboard calls.
    pub key: String,
    /// Organization id sent with organization-scoped requests.
    pub organization_id: String,
    /// Per-request timeout (milliseconds).
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:8090/api".to_string(),
            key: String::new(),
            organization_id: String::new(),
            timeout_ms: 10_000,
        }
    }
}

impl VitrineConfig {
    /// The public page URL for a dataset, derived from the API host by
    /// stripping the `/api` suffix.
    pub fn public_page_url(&self, dataset_id: &str) -> String {
        let root = self.api.host.trim_end_matches('/');
        let root = root.strip_suffix("/api").unwrap_or(root);
        format!("{root}/public_page/{dataset_id}")
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved vitrine configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. This is the primary entry point for building an
/// [`HttpApi`](crate::api::HttpApi).
pub fn load() -> VitrineConfig {
    let mut config = VitrineConfig::default();

    // Layer 2: user global config (~/.vitrine/config.toml)
    if let Some(global) = load_toml_file(global_config_path()) {
        merge_config(&mut config, &global);
    }

    // Layer 3: project local config (.vitrine.toml)
    if let Some(project) = load_toml_file(project_config_path()) {
        merge_config(&mut config, &project);
    }

    // Layer 4: environment variable overrides
    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed. Malformed files are silently ignored — the caller
/// still gets a usable config from the remaining layers.
fn load_toml_file(path: Option<PathBuf>) -> Option<VitrineConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge a loaded config layer into the base config.
///
/// Each TOML file is deserialized with `serde(default)`, so unset keys carry
/// the built-in defaults. The overlay fully replaces the base: only
/// explicitly-set values differ from defaults, and those are the ones we
/// want to apply.
fn merge_config(base: &mut VitrineConfig, overlay: &VitrineConfig) {
    *base = overlay.clone();
}

/// Path to the user global config: `~/.vitrine/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vitrine").join("config.toml"))
}

/// Path to the project local config: `.vitrine.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".vitrine.toml"))
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `VITRINE_API_HOST` — base API URL
/// - `VITRINE_API_KEY` — admin API key
/// - `VITRINE_ORG_ID` — organization id
/// - `VITRINE_TIMEOUT_MS` — request timeout
fn apply_env_overrides(config: &mut VitrineConfig) {
    if let Ok(val) = std::env::var("VITRINE_API_HOST")
        && !val.is_empty()
    {
        config.api.host = val;
    }
    if let Ok(val) = std::env::var("VITRINE_API_KEY")
        && !val.is_empty()
    {
        config.api.key = val;
    }
    if let Ok(val) = std::env::var("VITRINE_ORG_ID")
        && !val.is_empty()
    {
        config.api.organization_id = val;
    }
    if let Ok(val) = std::env::var("VITRINE_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
