//! WeatherAPI.com client

use async_trait::async_trait;
use serde::Deserialize;

use crate::state::{
    Astro, Condition, CurrentConditions, DaySummary, ForecastDay, LocationCandidate,
    SnapshotLocation, WeatherSnapshot,
};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Search and forecast lookups used by the screen
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>, SearchError>;

    async fn forecast(&self, city: &str, days: u8) -> Result<WeatherSnapshot, ForecastError>;
}

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("search response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ForecastError {
    #[error("forecast request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("forecast service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("forecast response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl WeatherApiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Send a GET and return the status and body text.
    async fn get_text(&self, url: &str) -> Result<(reqwest::StatusCode, String), reqwest::Error> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

// ============================================================================
// Search API
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: Option<u64>,
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
    lat: f64,
    lon: f64,
}

fn candidate_from_result(result: SearchResult) -> LocationCandidate {
    LocationCandidate {
        id: result.id,
        name: result.name,
        region: Some(result.region).filter(|region| !region.is_empty()),
        country: result.country,
        lat: result.lat,
        lon: result.lon,
    }
}

/// Parse a `search.json` body
pub fn parse_search(body: &str) -> Result<Vec<LocationCandidate>, serde_json::Error> {
    let results: Vec<SearchResult> = serde_json::from_str(body)?;
    Ok(results.into_iter().map(candidate_from_result).collect())
}

// ============================================================================
// Forecast API
// ============================================================================

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    location: LocationResponse,
    current: CurrentResponse,
    forecast: ForecastBlock,
}

#[derive(Debug, Deserialize)]
struct LocationResponse {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct ConditionResponse {
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    temp_c: f32,
    humidity: u8,
    wind_kph: f32,
    condition: ConditionResponse,
}

#[derive(Debug, Deserialize)]
struct ForecastBlock {
    forecastday: Vec<ForecastDayResponse>,
}

#[derive(Debug, Deserialize)]
struct ForecastDayResponse {
    date: chrono::NaiveDate,
    day: DayResponse,
    astro: AstroResponse,
}

#[derive(Debug, Deserialize)]
struct DayResponse {
    avgtemp_c: f32,
    condition: ConditionResponse,
}

#[derive(Debug, Deserialize)]
struct AstroResponse {
    sunrise: String,
    sunset: String,
}

impl From<ConditionResponse> for Condition {
    fn from(condition: ConditionResponse) -> Self {
        Condition {
            text: condition.text,
            icon: condition.icon,
        }
    }
}

impl From<ForecastResponse> for WeatherSnapshot {
    fn from(response: ForecastResponse) -> Self {
        WeatherSnapshot {
            location: SnapshotLocation {
                name: response.location.name,
                country: response.location.country,
            },
            current: CurrentConditions {
                temp_c: response.current.temp_c,
                humidity: response.current.humidity,
                wind_kph: response.current.wind_kph,
                condition: response.current.condition.into(),
            },
            forecast_days: response
                .forecast
                .forecastday
                .into_iter()
                .map(|day| ForecastDay {
                    date: day.date,
                    day: DaySummary {
                        avgtemp_c: day.day.avgtemp_c,
                        condition: day.day.condition.into(),
                    },
                    astro: Astro {
                        sunrise: day.astro.sunrise,
                        sunset: day.astro.sunset,
                    },
                })
                .collect(),
        }
    }
}

/// Parse a `forecast.json` body
pub fn parse_forecast(body: &str) -> Result<WeatherSnapshot, serde_json::Error> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    Ok(response.into())
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>, SearchError> {
        let url = format!(
            "{}/search.json?key={}&q={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query.trim())
        );
        tracing::debug!(query, "searching locations");

        let (status, body) = self.get_text(&url).await?;
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }
        Ok(parse_search(&body)?)
    }

    async fn forecast(&self, city: &str, days: u8) -> Result<WeatherSnapshot, ForecastError> {
        let url = format!(
            "{}/forecast.json?key={}&q={}&days={}&aqi=no&alerts=no",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(city),
            days
        );
        tracing::debug!(city, days, "fetching forecast");

        let (status, body) = self.get_text(&url).await?;
        if !status.is_success() {
            return Err(ForecastError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }
        Ok(parse_forecast(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FORECAST_BODY: &str = r#"{
        "location": {"name": "London", "region": "City of London", "country": "United Kingdom"},
        "current": {
            "temp_c": 11.4,
            "humidity": 82,
            "wind_kph": 13.0,
            "condition": {"text": "Partly cloudy", "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png", "code": 1003}
        },
        "forecast": {"forecastday": [
            {"date": "2024-01-01", "day": {"avgtemp_c": 9.8, "condition": {"text": "Light rain"}},
             "astro": {"sunrise": "08:06 AM", "sunset": "04:02 PM"}},
            {"date": "2024-01-02", "day": {"avgtemp_c": 7.1, "condition": {"text": "Sunny"}},
             "astro": {"sunrise": "08:06 AM", "sunset": "04:03 PM"}}
        ]}
    }"#;

    #[test]
    fn test_parse_forecast() {
        let snapshot = parse_forecast(FORECAST_BODY).unwrap();

        assert_eq!(
            snapshot.location,
            SnapshotLocation {
                name: "London".into(),
                country: "United Kingdom".into(),
            }
        );
        assert_eq!(snapshot.current.humidity, 82);
        assert_eq!(snapshot.current.condition.text, "Partly cloudy");
        assert_eq!(snapshot.forecast_days.len(), 2);
        assert_eq!(
            snapshot.forecast_days[1].date,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(snapshot.sunrise(), Some("08:06 AM"));
    }

    #[test]
    fn test_parse_forecast_rejects_garbage() {
        assert!(parse_forecast("{\"error\": {\"code\": 1006}}").is_err());
    }

    #[test]
    fn test_parse_search() {
        let body = r#"[
            {"id": 2801268, "name": "London", "region": "City of London, Greater London", "country": "United Kingdom", "lat": 51.52, "lon": -0.11, "url": "london-city-of-london-greater-london-united-kingdom"},
            {"id": 315398, "name": "Londrina", "region": "", "country": "Brazil", "lat": -23.3, "lon": -51.15}
        ]"#;

        let candidates = parse_search(body).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].label(), "London, United Kingdom");
        assert_eq!(candidates[1].region, None);
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(300);
        assert_eq!(truncate_body(&long).len(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
