//! Hero pattern rendering for the public page background.
//!
//! Each named pattern renders to a CSS `background-image` value carrying an
//! inline data-URI SVG, parameterized by foreground color and opacity. The
//! rendering is a pure function of `(name, color, opacity)` — the store
//! re-derives the stored SVG whenever any input changes.
//!
//! `"Blank"` is a member of the registry but renders nothing: the public
//! page falls back to a flat background.

use std::sync::LazyLock;

use regex::Regex;

/// Pattern name that disables hero rendering.
pub const BLANK: &str = "Blank";

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// One tileable SVG pattern: tile dimensions plus the path outline.
struct PatternDef {
    name: &'static str,
    width: u32,
    height: u32,
    path: &'static str,
}

/// Tileable patterns available to the public page, hand-picked from the
/// classic hero-patterns set.
static PATTERNS: &[PatternDef] = &[
    PatternDef {
        name: "Solid",
        width: 1,
        height: 1,
        path: "M0 0h1v1H0z",
    },
    PatternDef {
        name: "Jigsaw",
        width: 192,
        height: 192,
        path: "M96 0c8 0 14 6 14 14 0 5-3 10-7 12 4 2 7 7 7 12 0 8-6 14-14 14s-14-6-14-14c0-5 3-10 7-12-4-2-7-7-7-12C82 6 88 0 96 0zm0 96c8 0 14 6 14 14 0 5-3 10-7 12 4 2 7 7 7 12 0 8-6 14-14 14s-14-6-14-14c0-5 3-10 7-12-4-2-7-7-7-12 0-8 6-14 14-14z",
    },
    PatternDef {
        name: "Overcast",
        width: 80,
        height: 80,
        path: "M20 40a20 20 0 1 1 40 0 20 20 0 0 1-40 0zm20-12a12 12 0 1 0 0 24 12 12 0 0 0 0-24z",
    },
    PatternDef {
        name: "Topography",
        width: 120,
        height: 120,
        path: "M0 60c20-20 40-20 60 0s40 20 60 0v4c-20 20-40 20-60 0S20 44 0 64v-4zm0 24c20-20 40-20 60 0s40 20 60 0v4c-20 20-40 20-60 0S20 68 0 88v-4z",
    },
    PatternDef {
        name: "Texture",
        width: 4,
        height: 4,
        path: "M1 3h1v1H1V3zm2-2h1v1H3V1z",
    },
    PatternDef {
        name: "Hideout",
        width: 40,
        height: 40,
        path: "M0 40L40 0H20L0 20M40 40V20L20 40",
    },
    PatternDef {
        name: "Graph Paper",
        width: 100,
        height: 100,
        path: "M0 0h100v1H0zM0 0h1v100H0zM0 20h100v1H0zM0 40h100v1H0zM0 60h100v1H0zM0 80h100v1H0zM20 0h1v100h-1zM40 0h1v100h-1zM60 0h1v100h-1zM80 0h1v100h-1z",
    },
    PatternDef {
        name: "Hexagons",
        width: 28,
        height: 49,
        path: "M13.99 9.25l13 7.5v15l-13 7.5L1 31.75v-15l12.99-7.5zM3 17.9v12.7l10.99 6.34 11-6.35V17.9l-11-6.34L3 17.9z",
    },
    PatternDef {
        name: "Charlie Brown",
        width: 16,
        height: 20,
        path: "M8 0l8 10-8 10L0 10 8 0zm0 4L3.2 10 8 16l4.8-6L8 4z",
    },
    PatternDef {
        name: "Autumn",
        width: 88,
        height: 24,
        path: "M10 0l12 12-12 12L-2 12 10 0zm34 0l12 12-12 12-12-12L44 0zm34 0l12 12-12 12-12-12L78 0z",
    },
    PatternDef {
        name: "Temple",
        width: 152,
        height: 152,
        path: "M76 0l76 76-76 76L0 76 76 0zm0 16L16 76l60 60 60-60-60-60z",
    },
    PatternDef {
        name: "Death Star",
        width: 32,
        height: 64,
        path: "M0 28h20V16h-4v8H4V4h28v56H16v-4h12V32H0v-4zm0 8h16v24H0V36z",
    },
    PatternDef {
        name: "Bubbles",
        width: 100,
        height: 100,
        path: "M22 22a8 8 0 1 1 0-16 8 8 0 0 1 0 16zm56 40a12 12 0 1 1 0-24 12 12 0 0 1 0 24zM30 86a5 5 0 1 1 0-10 5 5 0 0 1 0 10z",
    },
    PatternDef {
        name: "Wiggle",
        width: 52,
        height: 26,
        path: "M0 13C6.5 6.5 13 6.5 19.5 13S32.5 19.5 39 13 52 6.5 52 13v2c-6.5 6.5-13 6.5-19.5 0S19.5 8.5 13 15 0 21.5 0 15v-2z",
    },
    PatternDef {
        name: "Diagonal Lines",
        width: 40,
        height: 40,
        path: "M0 40L40 0h-4L0 36v4zm40-4v4h-4l4-4zM0 4V0h4L0 4z",
    },
];

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color regex is valid")
});

/// All pattern names, `"Blank"` first, in registry order.
pub fn pattern_names() -> Vec<&'static str> {
    let mut names = vec![BLANK];
    names.extend(PATTERNS.iter().map(|p| p.name));
    names
}

/// Whether `name` is a known pattern (including `"Blank"`).
pub fn is_known_pattern(name: &str) -> bool {
    name == BLANK || PATTERNS.iter().any(|p| p.name == name)
}

/// Render a named pattern as a CSS `background-image` value.
///
/// `opacity` is a fraction in `0.0..=1.0` and is clamped. Returns `None` for
/// unknown names; `"Blank"` renders the empty string.
pub fn render(name: &str, foreground_color: &str, opacity: f64) -> Option<String> {
    if name == BLANK {
        return Some(String::new());
    }
    let def = PATTERNS.iter().find(|p| p.name == name)?;

    let color = encode_color(foreground_color);
    let opacity = opacity.clamp(0.0, 1.0);

    Some(format!(
        "url(\"data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' \
         width='{w}' height='{h}' viewBox='0 0 {w} {h}'%3E%3Cpath fill='{color}' \
         fill-opacity='{opacity}' d='{d}'/%3E%3C/svg%3E\")",
        w = def.width,
        h = def.height,
        d = def.path,
    ))
}

/// Normalize a hex color for embedding in a data URI.
///
/// `#` must be percent-encoded inside the URI. Malformed colors fall back to
/// black rather than producing a broken SVG.
fn encode_color(color: &str) -> String {
    if !HEX_COLOR_RE.is_match(color) {
        return "%23000000".to_string();
    }
    let hex = color.trim_start_matches('#').to_ascii_lowercase();
    format!("%23{hex}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
