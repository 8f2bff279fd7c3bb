//! Local search-box UI state.
//!
//! Pure, non-persisted state for a search input: the query text, scoring
//! and pagination knobs, and result highlighting parameters. No derived
//! fields, no remote sync — reconstructed fresh every session.

/// State of one search box.
///
/// Fields are plain and public; a UI binds inputs straight to them.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchUiState {
    pub query: String,
    pub search_type: String,
    /// Minimum score for a result to be shown. Non-negative.
    pub score_threshold: f64,
    pub extend_results: bool,
    pub slim_chunks: bool,
    pub group_unique_search: bool,
    pub recency_bias: f64,
    pub page_size: u32,
    pub get_total_pages: bool,
    pub highlight_results: bool,
    /// Sentence boundaries used to split highlights.
    pub highlight_delimiters: Vec<String>,
    pub highlight_max_length: u32,
    pub highlight_max_num: u32,
    pub highlight_window: u32,
}

impl Default for SearchUiState {
    fn default() -> Self {
        Self {
            query: String::new(),
            search_type: String::new(),
            score_threshold: 0.0,
            extend_results: false,
            slim_chunks: false,
            group_unique_search: false,
            recency_bias: 0.0,
            page_size: 10,
            get_total_pages: false,
            highlight_results: true,
            highlight_delimiters: vec!["?".to_string(), ".".to_string(), "!".to_string()],
            highlight_max_length: 8,
            highlight_max_num: 3,
            highlight_window: 0,
        }
    }
}
