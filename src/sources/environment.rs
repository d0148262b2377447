//! Bundled environmental data provider.
//!
//! Groups the three independent environmental lookups (regional weather,
//! per-point marine state, astronomical data) behind one handle, each with its
//! own degradation policy.

use super::marine::MarineSource;
use super::weather::{SunTimesSource, WeatherProvider};
use super::{ApiClient, PointSource};
use crate::api::{MarineSnapshot, SunTimes, WeatherSnapshot};
use crate::config::PlannerConfig;

/// Weather, marine, and astronomical lookups for one collection run.
pub struct EnvironmentProvider {
    weather: WeatherProvider,
    marine: Box<dyn PointSource<MarineSnapshot>>,
    sun: Box<dyn PointSource<SunTimes>>,
}

impl EnvironmentProvider {
    /// Provider backed by the configured public endpoints.
    pub fn new(config: &PlannerConfig) -> Result<Self, String> {
        let client = ApiClient::new(config.request_timeout())?;
        Ok(Self {
            weather: WeatherProvider::new(config)?,
            marine: Box::new(MarineSource::new(
                client.clone(),
                config.marine_endpoint.clone(),
            )),
            sun: Box::new(SunTimesSource::new(client, config.forecast_endpoint.clone())),
        })
    }

    /// Provider backed by arbitrary sources (used by tests).
    pub fn with_sources(
        weather: WeatherProvider,
        marine: Box<dyn PointSource<MarineSnapshot>>,
        sun: Box<dyn PointSource<SunTimes>>,
    ) -> Self {
        Self { weather, marine, sun }
    }

    /// Regional weather snapshot. Never fails; see [`WeatherProvider`].
    pub async fn regional_weather(&self, lat: f64, lon: f64) -> WeatherSnapshot {
        self.weather.regional(lat, lon).await
    }

    /// Sea state at a point. Single attempt; `None` on any failure.
    pub async fn marine(&self, lat: f64, lon: f64) -> Option<MarineSnapshot> {
        match self.marine.fetch(lat, lon).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::debug!("marine fetch failed at ({}, {}): {}", lat, lon, e);
                None
            }
        }
    }

    /// Sunrise/sunset at a point. Single attempt; `None` on any failure.
    pub async fn sun_times(&self, lat: f64, lon: f64) -> Option<SunTimes> {
        match self.sun.fetch(lat, lon).await {
            Ok(times) => Some(times),
            Err(e) => {
                log::debug!("astronomical fetch failed at ({}, {}): {}", lat, lon, e);
                None
            }
        }
    }
}
