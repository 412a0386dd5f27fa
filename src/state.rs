//! Application state - single source of truth

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// City used when nothing has been persisted yet.
pub const DEFAULT_CITY: &str = "Kelaniya";

/// Forecast horizon requested for every fetch.
pub const FORECAST_DAYS: u8 = 7;

/// Queries must be longer than this (in chars, after trimming) to hit the search service.
pub const MIN_QUERY_LEN: usize = 2;

/// Quiet period before a query change turns into a search.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Progress simulator timing.
pub const PROGRESS_TICK_MS: u64 = 500;
pub const PROGRESS_STEPS: u8 = 10;
pub const DEFAULT_LOADING_TIMEOUT_MS: u64 = 3000;

/// A location returned by the search service
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationCandidate {
    pub id: Option<u64>,
    pub name: String,
    pub region: Option<String>,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl LocationCandidate {
    /// "Name, Country" label used in the dropdown.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SnapshotLocation {
    pub name: String,
    pub country: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    pub text: String,
    /// Provider icon URL
    pub icon: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentConditions {
    pub temp_c: f32,
    pub humidity: u8,
    pub wind_kph: f32,
    pub condition: Condition,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DaySummary {
    pub avgtemp_c: f32,
    pub condition: Condition,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day: DaySummary,
    pub astro: Astro,
}

/// Full weather payload for one city, replaced wholesale on every successful fetch
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub location: SnapshotLocation,
    pub current: CurrentConditions,
    pub forecast_days: Vec<ForecastDay>,
}

impl WeatherSnapshot {
    /// Sunrise of the first forecast day, if any.
    pub fn sunrise(&self) -> Option<&str> {
        self.forecast_days
            .first()
            .map(|day| day.astro.sunrise.as_str())
    }
}

/// Which path issued a forecast request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ForecastOrigin {
    /// Mount-time load of the persisted or default city
    Startup,
    /// Explicit pick from the search dropdown
    Selection,
}

/// Progress simulator lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ProgressPhase {
    #[default]
    Idle,
    Running,
    Done,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Weather ---
    /// Last successfully fetched snapshot
    #[debug(section = "Weather", label = "Snapshot", debug_fmt)]
    pub weather: Option<WeatherSnapshot>,

    /// Whether the loading view is shown
    #[debug(section = "Weather", label = "Loading")]
    pub loading: bool,

    /// Fallback when no city was persisted
    #[debug(section = "Weather", label = "Default city")]
    pub default_city: String,

    /// Counter used to key forecast tasks
    #[debug(section = "Weather", label = "Requests")]
    pub forecast_requests: u64,

    // --- Progress simulator ---
    #[debug(section = "Progress", label = "Phase", debug_fmt)]
    pub progress_phase: ProgressPhase,

    /// Progress in tenths (0..=PROGRESS_STEPS)
    #[debug(section = "Progress", label = "Steps")]
    pub progress_steps: u8,

    /// Identifies the current simulator run; stale timer events carry older values
    #[debug(section = "Progress", label = "Run")]
    pub progress_run: u64,

    #[debug(section = "Progress", label = "Timeout ms")]
    pub loading_timeout_ms: u64,

    // --- Search (skipped) ---
    #[debug(skip)]
    pub search_visible: bool,

    #[debug(skip)]
    pub search_query: String,

    /// Last results from the search service
    #[debug(skip)]
    pub search_results: Vec<LocationCandidate>,

    /// Highlighted index in the dropdown
    #[debug(skip)]
    pub search_selected: usize,

    /// Drop stored results as soon as the query becomes too short
    #[debug(skip)]
    pub clear_stale_results: bool,

    // --- Forecast strip (skipped) ---
    /// Index of the first visible card
    #[debug(skip)]
    pub forecast_scroll: usize,
}

impl AppState {
    /// Create state for a fresh mount. Loading starts out true.
    pub fn new(default_city: impl Into<String>, loading_timeout_ms: u64) -> Self {
        Self {
            weather: None,
            loading: true,
            default_city: default_city.into(),
            forecast_requests: 0,
            progress_phase: ProgressPhase::Idle,
            progress_steps: 0,
            progress_run: 0,
            loading_timeout_ms,
            search_visible: false,
            search_query: String::new(),
            search_results: Vec::new(),
            search_selected: 0,
            clear_stale_results: false,
            forecast_scroll: 0,
        }
    }

    pub fn with_clear_stale_results(mut self, enabled: bool) -> Self {
        self.clear_stale_results = enabled;
        self
    }

    /// Progress in [0, 1]
    pub fn progress(&self) -> f64 {
        f64::from(self.progress_steps.min(PROGRESS_STEPS)) / f64::from(PROGRESS_STEPS)
    }

    /// Candidates worth showing: only while the panel is open and the query is long enough.
    pub fn visible_candidates(&self) -> &[LocationCandidate] {
        if self.search_visible && query_is_searchable(&self.search_query) {
            &self.search_results
        } else {
            &[]
        }
    }

    pub fn forecast_len(&self) -> usize {
        self.weather
            .as_ref()
            .map_or(0, |weather| weather.forecast_days.len())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CITY, DEFAULT_LOADING_TIMEOUT_MS)
    }
}

/// True when the query is long enough to be sent to the search service.
pub fn query_is_searchable(query: &str) -> bool {
    query.trim().chars().count() > MIN_QUERY_LEN
}
