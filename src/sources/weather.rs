//! Regional weather and astronomical lookups.
//!
//! Weather is fetched once per run and shared by every candidate point, so it
//! must always produce a value: the provider walks up to five coordinate
//! offsets before settling on a fixed conservative snapshot. Sunrise/sunset is
//! a single best-effort attempt at the operation center.

use super::client::{num_or_zero, ApiClient};
use super::{PointSource, Unavailable};
use crate::api::{SunTimes, WeatherSnapshot};
use crate::config::PlannerConfig;
use async_trait::async_trait;

/// Coordinate offsets tried in order for the regional weather call:
/// the exact point, then ±0.5° along each cardinal axis.
const WEATHER_OFFSETS: [(f64, f64); 5] = [(0.0, 0.0), (0.5, 0.0), (-0.5, 0.0), (0.0, 0.5), (0.0, -0.5)];

/// Current-conditions lookup against an Open-Meteo-style forecast endpoint.
pub struct ForecastSource {
    client: ApiClient,
    endpoint: String,
}

impl ForecastSource {
    pub fn new(client: ApiClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PointSource<WeatherSnapshot> for ForecastSource {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, Unavailable> {
        let payload = self
            .client
            .get_json(
                &self.endpoint,
                &[
                    ("latitude", lat.to_string()),
                    ("longitude", lon.to_string()),
                    (
                        "current",
                        "temperature_2m,relative_humidity_2m,precipitation,weather_code,\
                         cloud_cover,visibility,wind_speed_10m,wind_direction_10m,wind_gusts_10m"
                            .to_string(),
                    ),
                    ("temperature_unit", "fahrenheit".to_string()),
                    ("wind_speed_unit", "knots".to_string()),
                ],
            )
            .await?;

        let current = payload
            .get("current")
            .filter(|c| c.is_object())
            .ok_or_else(|| Unavailable::new("no current conditions in response"))?;

        Ok(WeatherSnapshot {
            temperature_f: num_or_zero(current, "temperature_2m"),
            relative_humidity_pct: num_or_zero(current, "relative_humidity_2m"),
            precipitation: num_or_zero(current, "precipitation"),
            weather_code: current
                .get("weather_code")
                .and_then(|v| v.as_i64())
                .unwrap_or(0),
            cloud_cover_pct: num_or_zero(current, "cloud_cover"),
            visibility_m: num_or_zero(current, "visibility"),
            wind_speed_kts: num_or_zero(current, "wind_speed_10m"),
            wind_direction_deg: num_or_zero(current, "wind_direction_10m"),
            wind_gusts_kts: num_or_zero(current, "wind_gusts_10m"),
        })
    }
}

/// Sunrise/sunset lookup for today at a coordinate.
pub struct SunTimesSource {
    client: ApiClient,
    endpoint: String,
}

impl SunTimesSource {
    pub fn new(client: ApiClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PointSource<SunTimes> for SunTimesSource {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<SunTimes, Unavailable> {
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let payload = self
            .client
            .get_json(
                &self.endpoint,
                &[
                    ("latitude", lat.to_string()),
                    ("longitude", lon.to_string()),
                    ("daily", "sunrise,sunset".to_string()),
                    ("timezone", "auto".to_string()),
                    ("start_date", today.clone()),
                    ("end_date", today),
                ],
            )
            .await?;

        let daily = payload
            .get("daily")
            .ok_or_else(|| Unavailable::new("no daily data in response"))?;
        let first = |key: &str| -> Option<String> {
            daily
                .get(key)
                .and_then(|v| v.get(0))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        match (first("sunrise"), first("sunset")) {
            (Some(sunrise), Some(sunset)) => Ok(SunTimes { sunrise, sunset }),
            _ => Err(Unavailable::new("sunrise/sunset missing from response")),
        }
    }
}

/// Regional weather with offset retries and a guaranteed result.
pub struct WeatherProvider {
    source: Box<dyn PointSource<WeatherSnapshot>>,
}

impl WeatherProvider {
    pub fn new(config: &PlannerConfig) -> Result<Self, String> {
        let client = ApiClient::new(config.request_timeout())?;
        Ok(Self::with_source(Box::new(ForecastSource::new(
            client,
            config.forecast_endpoint.clone(),
        ))))
    }

    pub fn with_source(source: Box<dyn PointSource<WeatherSnapshot>>) -> Self {
        Self { source }
    }

    /// Weather at or near the point. Tries each offset until one succeeds;
    /// if all fail, returns the conservative default snapshot. Never fails.
    pub async fn regional(&self, lat: f64, lon: f64) -> WeatherSnapshot {
        for (dlat, dlon) in WEATHER_OFFSETS {
            match self.source.fetch(lat + dlat, lon + dlon).await {
                Ok(snapshot) => return snapshot,
                Err(e) => {
                    log::debug!(
                        "weather fetch failed at offset ({}, {}): {}",
                        dlat,
                        dlon,
                        e
                    );
                }
            }
        }
        WeatherSnapshot::conservative_default()
    }
}
