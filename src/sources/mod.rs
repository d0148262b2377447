//! External data sources and their degradation policies.
//!
//! Every upstream provider is a thin fetch behind the [`PointSource`] trait;
//! failure is expressed as [`Unavailable`] and absorbed by the provider wrapping
//! each source. The fallback policy (fixed default, null, or cached estimate)
//! lives in the providers, not in the sources themselves.

pub mod bathymetry;
pub mod client;
pub mod environment;
pub mod geocode;
pub mod marine;
pub mod weather;

pub use bathymetry::BathymetryProvider;
pub use client::ApiClient;
pub use environment::EnvironmentProvider;
pub use geocode::Geocoder;

use async_trait::async_trait;

/// The upstream source could not produce a value.
///
/// This is the only error a source can return; callers decide whether to
/// retry, substitute a default, or record the absence.
#[derive(Debug, Clone, thiserror::Error)]
#[error("data source unavailable: {0}")]
pub struct Unavailable(pub String);

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// A point-keyed external data source.
///
/// Implementations perform exactly one fetch attempt; retries, offsets, and
/// fallbacks belong to the provider layer.
#[async_trait]
pub trait PointSource<T>: Send + Sync {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<T, Unavailable>;
}

/// A name-keyed location lookup (geocoding).
#[async_trait]
pub trait NameLookup: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<crate::api::ResolvedLocation, Unavailable>;
}
