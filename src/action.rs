//! Actions - every event the screen reacts to

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{ForecastOrigin, LocationCandidate, WeatherSnapshot};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: mount-time load of the persisted (or default) city
    WeatherLoadDefault,

    /// Intent: load the forecast for an explicit city (persisted on success)
    WeatherLoadFor(String),

    /// Result: persisted city read from the key-value store
    WeatherStoredCityDidLoad(Option<String>),

    /// Result: forecast fetched
    WeatherDidLoad {
        city: String,
        origin: ForecastOrigin,
        snapshot: WeatherSnapshot,
    },

    /// Result: forecast fetch failed
    WeatherDidError {
        city: String,
        origin: ForecastOrigin,
        error: String,
    },

    /// Result: selected city written to the key-value store
    WeatherCityDidPersist(String),

    /// Result: writing the selected city failed
    WeatherCityPersistDidError(String),

    // ===== Search category =====
    /// Search icon pressed: open or close the search panel
    SearchToggle,

    /// Search query text changed
    SearchQueryChange(String),

    /// Debounce timer fired for this query
    SearchDebounceElapsed(String),

    /// Result: candidates from the search service
    SearchDidLoad(Vec<LocationCandidate>),

    /// Result: search failed
    SearchDidError(String),

    /// Highlight a candidate in the dropdown (by index)
    SearchSelect(usize),

    /// Pick the highlighted candidate
    SearchConfirm,

    // ===== Progress category =====
    /// Simulator tick for the given run
    ProgressTick(u64),

    /// Loading timeout elapsed for the given run
    ProgressTimeout(u64),

    // ===== UI category =====
    /// Scroll the forecast strip by the given number of cards
    UiScrollForecast(i32),

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Exit the application
    Quit,
}
