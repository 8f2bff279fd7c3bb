//! Schema validation for the public page's search options.
//!
//! The widget's `searchOptions` block is free-form JSON edited by the user.
//! Before it is merged into the persisted configuration it must pass this
//! validator; a failing value is held locally with its error message and is
//! never sent to the remote API.
//!
//! Validation is normalizing: unknown keys and explicit `null`s are
//! stripped, known keys are type-checked. The first failing check produces
//! the user-facing message.

use serde_json::{Map, Value};

/// Search types the platform accepts.
const SEARCH_TYPES: &[&str] = &["fulltext", "semantic", "hybrid", "bm25"];

/// Expected shape of one known search option field.
enum FieldKind {
    Bool,
    String,
    /// Integer >= 0.
    Count,
    /// Number >= 0.0.
    Score,
    /// One of [`SEARCH_TYPES`].
    SearchType,
    Object,
}

/// Known search option fields, checked in this order.
const FIELDS: &[(&str, FieldKind)] = &[
    ("search_type", FieldKind::SearchType),
    ("page_size", FieldKind::Count),
    ("score_threshold", FieldKind::Score),
    ("content_only", FieldKind::Bool),
    ("extend_results", FieldKind::Bool),
    ("remove_stop_words", FieldKind::Bool),
    ("slim_chunks", FieldKind::Bool),
    ("use_quote_negated_terms", FieldKind::Bool),
    ("query", FieldKind::String),
    ("user_id", FieldKind::String),
    ("no_result_message", FieldKind::String),
    ("filters", FieldKind::Object),
    ("highlight_options", FieldKind::Object),
    ("sort_options", FieldKind::Object),
    ("typo_options", FieldKind::Object),
    ("scoring_options", FieldKind::Object),
];

/// Validate and normalize a search options record.
///
/// Returns the normalized object (known, type-correct keys only) or the
/// first validation error message.
pub fn validate_search_options(value: &Value) -> Result<Value, String> {
    let Some(input) = value.as_object() else {
        return Err("Search options must be a JSON object".to_string());
    };

    let mut normalized = Map::new();
    for (key, kind) in FIELDS {
        let Some(val) = input.get(*key) else {
            continue;
        };
        if val.is_null() {
            continue;
        }
        check_field(key, kind, val)?;
        normalized.insert((*key).to_string(), val.clone());
    }

    Ok(Value::Object(normalized))
}

fn check_field(key: &str, kind: &FieldKind, val: &Value) -> Result<(), String> {
    match kind {
        FieldKind::Bool => {
            if !val.is_boolean() {
                return Err(format!("{key} must be a boolean"));
            }
        }
        FieldKind::String => {
            if !val.is_string() {
                return Err(format!("{key} must be a string"));
            }
        }
        FieldKind::Count => {
            if val.as_u64().is_none() {
                return Err(format!("{key} must be a non-negative integer"));
            }
        }
        FieldKind::Score => {
            match val.as_f64() {
                Some(n) if n >= 0.0 => {}
                _ => return Err(format!("{key} must be a non-negative number")),
            }
        }
        FieldKind::SearchType => {
            let ok = val
                .as_str()
                .is_some_and(|s| SEARCH_TYPES.contains(&s));
            if !ok {
                return Err(format!(
                    "{key} must be one of {}",
                    SEARCH_TYPES.join(", ")
                ));
            }
        }
        FieldKind::Object => {
            if !val.is_object() {
                return Err(format!("{key} must be an object"));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
