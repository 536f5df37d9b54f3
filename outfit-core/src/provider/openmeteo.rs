use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

use crate::{
    Settings,
    model::{Candidate, HourlySeries, WeatherObservation},
};

use super::{LocationSearch, ProviderError, WeatherSource};

/// Number of candidates requested per search.
const RESULT_COUNT: &str = "5";

/// Client for the Open-Meteo geocoding and forecast APIs. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteo {
    pub fn new(geocoding_url: impl Into<String>, forecast_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.geocoding_url.clone(), settings.forecast_url.clone())
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ProviderError> {
        tracing::debug!(url, ?query, "GET");

        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    #[serde(default)]
    name: String,
    admin1: Option<String>,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<GeocodingResult> for Candidate {
    fn from(r: GeocodingResult) -> Self {
        Candidate {
            name: r.name,
            admin1: r.admin1,
            country: r.country,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
    #[serde(default, deserialize_with = "lenient_hourly")]
    hourly: HourlySeries,
}

/// Nothing reads the hourly series, so a shape we don't expect (including
/// `null`) becomes an empty series instead of failing the fetch.
fn lenient_hourly<'de, D>(deserializer: D) -> Result<HourlySeries, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()).unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: Option<f64>,
    weathercode: Option<i32>,
}

#[async_trait]
impl LocationSearch for OpenMeteo {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, ProviderError> {
        let body = self
            .get(
                &self.geocoding_url,
                &[("name", query), ("count", RESULT_COUNT), ("language", "en"), ("format", "json")],
            )
            .await?;

        let parsed: GeocodingResponse = serde_json::from_str(&body)?;
        tracing::debug!(query, hits = parsed.results.len(), "geocoding done");

        Ok(parsed.results.into_iter().map(Candidate::from).collect())
    }
}

#[async_trait]
impl WeatherSource for OpenMeteo {
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherObservation, ProviderError> {
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        let body = self
            .get(
                &self.forecast_url,
                &[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("current_weather", "true"),
                    ("hourly", "temperature_2m,weathercode"),
                    ("timezone", "auto"),
                ],
            )
            .await?;

        let parsed: ForecastResponse = serde_json::from_str(&body)?;

        let (temperature, weather_code) = match parsed.current_weather {
            Some(current) => (current.temperature, current.weathercode.unwrap_or(0)),
            None => (None, 0),
        };

        Ok(WeatherObservation { temperature, weather_code, hourly: parsed.hourly })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
