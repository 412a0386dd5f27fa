//! Async task bodies behind each effect
//!
//! `main.rs` spawns these under their task keys; every one resolves to the
//! action reported back to the store.

use std::sync::Arc;
use std::time::Duration;

use crate::action::Action;
use crate::api::WeatherProvider;
use crate::persist::{CITY_KEY, KeyValueStore};
use crate::state::{ForecastOrigin, PROGRESS_TICK_MS};

/// Read the persisted city. A failed read counts as absent.
pub async fn load_stored_city(store: KeyValueStore) -> Action {
    match store.get(CITY_KEY).await {
        Ok(city) => Action::WeatherStoredCityDidLoad(city),
        Err(e) => {
            tracing::warn!(error = %e, "could not read saved city");
            Action::WeatherStoredCityDidLoad(None)
        }
    }
}

pub async fn fetch_forecast(
    provider: Arc<dyn WeatherProvider>,
    city: String,
    days: u8,
    origin: ForecastOrigin,
    request: u64,
) -> Action {
    match provider.forecast(&city, days).await {
        Ok(snapshot) => {
            tracing::info!(%city, ?origin, request, "forecast loaded");
            Action::WeatherDidLoad {
                city,
                origin,
                snapshot,
            }
        }
        Err(e) => {
            tracing::warn!(%city, ?origin, request, error = %e, "forecast fetch failed");
            Action::WeatherDidError {
                city,
                origin,
                error: e.to_string(),
            }
        }
    }
}

pub async fn persist_city(store: KeyValueStore, name: String) -> Action {
    match store.set(CITY_KEY, &name).await {
        Ok(()) => Action::WeatherCityDidPersist(name),
        Err(e) => {
            tracing::warn!(city = %name, error = %e, "could not save city");
            Action::WeatherCityPersistDidError(e.to_string())
        }
    }
}

pub async fn search_cities(provider: Arc<dyn WeatherProvider>, query: String) -> Action {
    match provider.search(&query).await {
        Ok(results) => {
            tracing::debug!(%query, count = results.len(), "search results");
            Action::SearchDidLoad(results)
        }
        Err(e) => {
            tracing::warn!(%query, error = %e, "city search failed");
            Action::SearchDidError(e.to_string())
        }
    }
}

pub async fn progress_tick(run: u64) -> Action {
    tokio::time::sleep(Duration::from_millis(PROGRESS_TICK_MS)).await;
    Action::ProgressTick(run)
}

pub async fn loading_timeout(run: u64, after_ms: u64) -> Action {
    tokio::time::sleep(Duration::from_millis(after_ms)).await;
    tracing::debug!(run, after_ms, "loading timeout elapsed");
    Action::ProgressTimeout(run)
}
