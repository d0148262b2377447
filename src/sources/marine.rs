//! Per-point marine conditions.
//!
//! Marine data is a single attempt per point with no retry and no fallback
//! values: a missing snapshot is recorded as `None` and the scorer treats it
//! as a neutral unknown. This differs from weather, which is shared across the
//! whole run and must always carry a value.

use super::client::{num_or_zero, ApiClient};
use super::{PointSource, Unavailable};
use crate::api::MarineSnapshot;
use crate::config::PlannerConfig;
use async_trait::async_trait;

/// Current sea-state lookup against an Open-Meteo-style marine endpoint.
pub struct MarineSource {
    client: ApiClient,
    endpoint: String,
}

impl MarineSource {
    pub fn new(client: ApiClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self, String> {
        let client = ApiClient::new(config.request_timeout())?;
        Ok(Self::new(client, config.marine_endpoint.clone()))
    }
}

#[async_trait]
impl PointSource<MarineSnapshot> for MarineSource {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<MarineSnapshot, Unavailable> {
        let payload = self
            .client
            .get_json(
                &self.endpoint,
                &[
                    ("latitude", lat.to_string()),
                    ("longitude", lon.to_string()),
                    (
                        "current",
                        "wave_height,wave_direction,wave_period,wind_wave_height,\
                         swell_wave_height,ocean_current_velocity,ocean_current_direction"
                            .to_string(),
                    ),
                    ("length_unit", "imperial".to_string()),
                ],
            )
            .await?;

        let current = payload
            .get("current")
            .filter(|c| c.is_object())
            .ok_or_else(|| Unavailable::new("no current conditions in response"))?;

        Ok(MarineSnapshot {
            wave_height_ft: num_or_zero(current, "wave_height"),
            wave_direction_deg: num_or_zero(current, "wave_direction"),
            wave_period_s: num_or_zero(current, "wave_period"),
            wind_wave_height_ft: num_or_zero(current, "wind_wave_height"),
            swell_wave_height_ft: num_or_zero(current, "swell_wave_height"),
            current_velocity_kts: num_or_zero(current, "ocean_current_velocity"),
            current_direction_deg: num_or_zero(current, "ocean_current_direction"),
        })
    }
}
