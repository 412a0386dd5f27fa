//! Effects - side effects declared by the reducer

use crate::state::ForecastOrigin;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read the persisted city from the key-value store
    LoadStoredCity,
    /// Fetch a forecast; `request` keys the task so requests never cancel each other
    FetchForecast {
        city: String,
        days: u8,
        origin: ForecastOrigin,
        request: u64,
    },
    /// Write the selected city to the key-value store
    PersistCity { name: String },
    /// Restart the search debounce timer for this query
    DebounceSearch { query: String },
    /// Ask the search service for candidates
    SearchCities { query: String },
    /// Arm the next progress tick for a simulator run
    ScheduleProgressTick { run: u64 },
    /// Arm the loading timeout for a simulator run
    StartLoadingTimeout { run: u64, after_ms: u64 },
    /// Cancel both simulator timers
    StopLoadingTimers,
}
