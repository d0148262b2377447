//! Point bathymetry with caching and a conservative fallback.
//!
//! The default source is OpenTopoData's public GEBCO2020 endpoint, which
//! returns elevation in meters relative to sea level; negative values are
//! below sea level. Public endpoints can rate-limit or go down, so the
//! provider degrades to a fixed estimate flagged via `estimated`/`source`
//! rather than surfacing an error.

use super::client::ApiClient;
use super::{PointSource, Unavailable};
use crate::api::{BathymetryRecord, M_TO_FT};
use crate::config::PlannerConfig;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Dataset label attached to measured records.
const GEBCO_SOURCE: &str = "OpenTopoData GEBCO2020";

/// Elevation lookup against an OpenTopoData-style endpoint.
pub struct GebcoElevationSource {
    client: ApiClient,
    endpoint: String,
}

impl GebcoElevationSource {
    pub fn new(client: ApiClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PointSource<f64> for GebcoElevationSource {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<f64, Unavailable> {
        let payload = self
            .client
            .get_json(&self.endpoint, &[("locations", format!("{},{}", lat, lon))])
            .await?;

        let elevation = payload
            .get("results")
            .and_then(|r| r.get(0))
            .and_then(|r| r.get("elevation"))
            .and_then(|v| v.as_f64())
            .ok_or_else(|| Unavailable::new("no elevation in response"))?;

        if elevation.is_nan() {
            return Err(Unavailable::new("elevation is NaN"));
        }
        Ok(elevation)
    }
}

/// Depth lookup for a single coordinate, cached per provider instance.
///
/// Provider lifetime is one collection run; the cache is read/insert only
/// with no eviction, keyed by the coordinate rounded to 5 decimal places
/// (~1.1 m). [`BathymetryProvider::depth_at`] never fails.
pub struct BathymetryProvider {
    source: Box<dyn PointSource<f64>>,
    cache: Mutex<HashMap<String, BathymetryRecord>>,
}

impl BathymetryProvider {
    /// Provider backed by the configured GEBCO2020 endpoint.
    pub fn new(config: &PlannerConfig) -> Result<Self, String> {
        let client = ApiClient::new(config.request_timeout())?;
        Ok(Self::with_source(Box::new(GebcoElevationSource::new(
            client,
            config.elevation_endpoint.clone(),
        ))))
    }

    /// Provider backed by an arbitrary elevation source.
    pub fn with_source(source: Box<dyn PointSource<f64>>) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Depth at a coordinate. Repeated lookups at the same rounded coordinate
    /// return the cached record without another round trip.
    pub async fn depth_at(&self, lat: f64, lon: f64) -> BathymetryRecord {
        let key = format!("{:.5},{:.5}", lat, lon);
        if let Some(hit) = self.cache.lock().get(&key) {
            return hit.clone();
        }

        let record = match self.source.fetch(lat, lon).await {
            Ok(elevation) if elevation < 0.0 => {
                let depth_m = elevation.abs();
                BathymetryRecord {
                    depth_m,
                    depth_ft: depth_m * M_TO_FT,
                    is_ocean: true,
                    estimated: false,
                    source: GEBCO_SOURCE.to_string(),
                }
            }
            Ok(_) => BathymetryRecord {
                depth_m: 0.0,
                depth_ft: 0.0,
                is_ocean: false,
                estimated: false,
                source: GEBCO_SOURCE.to_string(),
            },
            Err(e) => {
                log::debug!("bathymetry fetch failed at {}: {}", key, e);
                BathymetryRecord::fallback()
            }
        };

        self.cache.lock().insert(key, record.clone());
        record
    }
}
