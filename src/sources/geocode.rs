//! Location resolution.
//!
//! Strings containing a comma are parsed directly as "lat, lon" without a
//! network call; everything else goes through a name lookup that returns the
//! first match, or nothing.

use super::client::ApiClient;
use super::{NameLookup, Unavailable};
use crate::api::ResolvedLocation;
use crate::config::PlannerConfig;
use async_trait::async_trait;

/// Name lookup against an Open-Meteo-style geocoding endpoint.
pub struct GeocodingSource {
    client: ApiClient,
    endpoint: String,
}

impl GeocodingSource {
    pub fn new(client: ApiClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl NameLookup for GeocodingSource {
    async fn lookup(&self, name: &str) -> Result<ResolvedLocation, Unavailable> {
        let payload = self
            .client
            .get_json(
                &self.endpoint,
                &[("name", name.to_string()), ("count", "1".to_string())],
            )
            .await?;

        let first = payload
            .get("results")
            .and_then(|r| r.get(0))
            .ok_or_else(|| Unavailable::new("no geocoding results"))?;

        let lat = first.get("latitude").and_then(|v| v.as_f64());
        let lon = first.get("longitude").and_then(|v| v.as_f64());
        let name = first
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        match (lat, lon) {
            (Some(lat), Some(lon)) => Ok(ResolvedLocation { lat, lon, name }),
            _ => Err(Unavailable::new("geocoding result missing coordinates")),
        }
    }
}

/// Resolves location strings to coordinates.
pub struct Geocoder {
    lookup: Box<dyn NameLookup>,
}

impl Geocoder {
    pub fn new(config: &PlannerConfig) -> Result<Self, String> {
        let client = ApiClient::new(config.request_timeout())?;
        Ok(Self::with_lookup(Box::new(GeocodingSource::new(
            client,
            config.geocoding_endpoint.clone(),
        ))))
    }

    pub fn with_lookup(lookup: Box<dyn NameLookup>) -> Self {
        Self { lookup }
    }

    /// Resolve a location string.
    ///
    /// "lat, lon" forms are parsed directly and bypass the network; names are
    /// looked up and resolve to the first match, or `None` when nothing
    /// matches or the lookup fails.
    pub async fn resolve(&self, location: &str) -> Option<ResolvedLocation> {
        if location.contains(',') {
            if let Some(parsed) = parse_lat_lon(location) {
                return Some(parsed);
            }
        }

        match self.lookup.lookup(location).await {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                log::debug!("geocoding lookup for '{}' failed: {}", location, e);
                None
            }
        }
    }
}

fn parse_lat_lon(location: &str) -> Option<ResolvedLocation> {
    let mut parts = location.splitn(2, ',');
    let lat: f64 = parts.next()?.trim().parse().ok()?;
    let lon: f64 = parts.next()?.trim().parse().ok()?;
    Some(ResolvedLocation {
        lat,
        lon,
        name: format!("Custom Location ({:.4}, {:.4})", lat, lon),
    })
}
