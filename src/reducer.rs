//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{
    query_is_searchable, AppState, ForecastOrigin, ProgressPhase, FORECAST_DAYS, PROGRESS_STEPS,
};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherLoadDefault => {
            let mut effects = start_loading(state);
            effects.push(Effect::LoadStoredCity);
            DispatchResult::changed_with_many(effects)
        }

        Action::WeatherLoadFor(city) => {
            let city = city.trim().to_string();
            if city.is_empty() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with_many(load_for(state, city))
        }

        Action::WeatherStoredCityDidLoad(stored) => {
            let city = stored
                .map(|city| city.trim().to_string())
                .filter(|city| !city.is_empty())
                .unwrap_or_else(|| state.default_city.clone());
            DispatchResult::changed_with(fetch_forecast(state, city, ForecastOrigin::Startup))
        }

        Action::WeatherDidLoad {
            city,
            origin,
            snapshot,
        } => {
            state.weather = Some(snapshot);
            state.forecast_scroll = 0;
            let mut effects = finish_loading(state);
            if origin == ForecastOrigin::Selection {
                effects.push(Effect::PersistCity { name: city });
            }
            DispatchResult::changed_with_many(effects)
        }

        Action::WeatherDidError { .. } => {
            // Snapshot stays as it was
            let effects = finish_loading(state);
            DispatchResult::changed_with_many(effects)
        }

        Action::WeatherCityDidPersist(_) | Action::WeatherCityPersistDidError(_) => {
            DispatchResult::unchanged()
        }

        // ===== Search actions =====
        Action::SearchToggle => {
            state.search_visible = !state.search_visible;
            state.search_query.clear();
            state.search_results.clear();
            state.search_selected = 0;
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            state.search_selected = 0;
            if state.clear_stale_results && !query_is_searchable(&state.search_query) {
                state.search_results.clear();
            }
            DispatchResult::changed_with(Effect::DebounceSearch {
                query: state.search_query.clone(),
            })
        }

        Action::SearchDebounceElapsed(query) => {
            if !state.search_visible || query != state.search_query || !query_is_searchable(&query)
            {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with(Effect::SearchCities {
                query: query.trim().to_string(),
            })
        }

        Action::SearchDidLoad(results) => {
            state.search_results = results;
            state.search_selected = 0;
            DispatchResult::changed()
        }

        // Candidate list stays as it was
        Action::SearchDidError(_) => DispatchResult::unchanged(),

        Action::SearchSelect(index) => {
            if index < state.visible_candidates().len() && index != state.search_selected {
                state.search_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SearchConfirm => {
            let Some(candidate) = state
                .visible_candidates()
                .get(state.search_selected)
                .cloned()
            else {
                return DispatchResult::unchanged();
            };

            state.search_visible = false;
            state.search_query.clear();
            state.search_results.clear();
            state.search_selected = 0;
            DispatchResult::changed_with_many(load_for(state, candidate.name))
        }

        // ===== Progress actions =====
        Action::ProgressTick(run) => {
            if !is_current_run(state, run) || state.progress_steps >= PROGRESS_STEPS {
                return DispatchResult::unchanged();
            }
            state.progress_steps += 1;
            if state.progress_steps < PROGRESS_STEPS {
                DispatchResult::changed_with(Effect::ScheduleProgressTick { run })
            } else {
                DispatchResult::changed()
            }
        }

        Action::ProgressTimeout(run) => {
            if !is_current_run(state, run) {
                return DispatchResult::unchanged();
            }
            let effects = finish_loading(state);
            DispatchResult::changed_with_many(effects)
        }

        // ===== UI actions =====
        Action::UiScrollForecast(delta) => {
            let max = state.forecast_len().saturating_sub(1);
            let next = if delta.is_negative() {
                state
                    .forecast_scroll
                    .saturating_sub(delta.unsigned_abs() as usize)
            } else {
                state.forecast_scroll.saturating_add(delta as usize).min(max)
            };
            if next == state.forecast_scroll {
                DispatchResult::unchanged()
            } else {
                state.forecast_scroll = next;
                DispatchResult::changed()
            }
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Show the loading view and begin a new simulator run.
fn start_loading(state: &mut AppState) -> Vec<Effect> {
    state.loading = true;
    state.progress_steps = 0;
    state.progress_phase = ProgressPhase::Running;
    state.progress_run = state.progress_run.wrapping_add(1);
    let run = state.progress_run;
    vec![
        Effect::ScheduleProgressTick { run },
        Effect::StartLoadingTimeout {
            run,
            after_ms: state.loading_timeout_ms,
        },
    ]
}

/// Clear loading and end the current run, whichever signal got here first.
fn finish_loading(state: &mut AppState) -> Vec<Effect> {
    state.loading = false;
    if state.progress_phase == ProgressPhase::Running {
        state.progress_phase = ProgressPhase::Done;
        vec![Effect::StopLoadingTimers]
    } else {
        Vec::new()
    }
}

/// Restart the simulator, then fetch an explicitly chosen city.
fn load_for(state: &mut AppState, city: String) -> Vec<Effect> {
    let mut effects = start_loading(state);
    effects.push(fetch_forecast(state, city, ForecastOrigin::Selection));
    effects
}

fn fetch_forecast(state: &mut AppState, city: String, origin: ForecastOrigin) -> Effect {
    state.forecast_requests = state.forecast_requests.wrapping_add(1);
    Effect::FetchForecast {
        city,
        days: FORECAST_DAYS,
        origin,
        request: state.forecast_requests,
    }
}

fn is_current_run(state: &AppState, run: u64) -> bool {
    state.progress_phase == ProgressPhase::Running && run == state.progress_run
}
