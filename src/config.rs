//! Planner configuration: provider endpoints, timeouts, and pacing.
//!
//! Defaults point at the public OpenTopoData and Open-Meteo endpoints. Values
//! can be overridden from a TOML file and from environment variables, with the
//! environment taking precedence.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

fn default_elevation_endpoint() -> String {
    "https://api.opentopodata.org/v1/gebco2020".to_string()
}

fn default_forecast_endpoint() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_marine_endpoint() -> String {
    "https://marine-api.open-meteo.com/v1/marine".to_string()
}

fn default_geocoding_endpoint() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_request_timeout_s() -> u64 {
    15
}

fn default_pace_ms() -> u64 {
    250
}

/// Planner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Elevation endpoint serving the GEBCO2020 grid
    #[serde(default = "default_elevation_endpoint")]
    pub elevation_endpoint: String,
    /// Weather forecast endpoint
    #[serde(default = "default_forecast_endpoint")]
    pub forecast_endpoint: String,
    /// Marine conditions endpoint
    #[serde(default = "default_marine_endpoint")]
    pub marine_endpoint: String,
    /// Geocoding endpoint for name lookups
    #[serde(default = "default_geocoding_endpoint")]
    pub geocoding_endpoint: String,
    /// Per-call timeout for external requests, in seconds
    #[serde(default = "default_request_timeout_s")]
    pub request_timeout_s: u64,
    /// Inter-point delay applied between external calls, in milliseconds.
    /// Resource courtesy for public rate-limited endpoints, not a correctness
    /// requirement.
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            elevation_endpoint: default_elevation_endpoint(),
            forecast_endpoint: default_forecast_endpoint(),
            marine_endpoint: default_marine_endpoint(),
            geocoding_endpoint: default_geocoding_endpoint(),
            request_timeout_s: default_request_timeout_s(),
            pace_ms: default_pace_ms(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))
    }

    /// Resolve the effective configuration.
    ///
    /// Starts from defaults, merges `NAVOPS_CONFIG` (TOML file path) if set,
    /// then applies individual environment overrides.
    ///
    /// # Environment Variables
    /// - `NAVOPS_CONFIG` (optional): path to a TOML configuration file
    /// - `NAVOPS_ELEVATION_ENDPOINT` (optional)
    /// - `NAVOPS_FORECAST_ENDPOINT` (optional)
    /// - `NAVOPS_MARINE_ENDPOINT` (optional)
    /// - `NAVOPS_GEOCODING_ENDPOINT` (optional)
    /// - `NAVOPS_REQUEST_TIMEOUT_S` (optional, default: 15)
    /// - `NAVOPS_PACE_MS` (optional, default: 250)
    pub fn from_env() -> Result<Self, String> {
        let mut config = match env::var("NAVOPS_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        if let Ok(v) = env::var("NAVOPS_ELEVATION_ENDPOINT") {
            config.elevation_endpoint = v;
        }
        if let Ok(v) = env::var("NAVOPS_FORECAST_ENDPOINT") {
            config.forecast_endpoint = v;
        }
        if let Ok(v) = env::var("NAVOPS_MARINE_ENDPOINT") {
            config.marine_endpoint = v;
        }
        if let Ok(v) = env::var("NAVOPS_GEOCODING_ENDPOINT") {
            config.geocoding_endpoint = v;
        }
        if let Ok(v) = env::var("NAVOPS_REQUEST_TIMEOUT_S") {
            config.request_timeout_s = v
                .parse()
                .map_err(|_| "NAVOPS_REQUEST_TIMEOUT_S must be a whole number of seconds")?;
        }
        if let Ok(v) = env::var("NAVOPS_PACE_MS") {
            config.pace_ms = v
                .parse()
                .map_err(|_| "NAVOPS_PACE_MS must be a whole number of milliseconds")?;
        }

        Ok(config)
    }

    /// Per-call request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_s)
    }

    /// Inter-point pacing delay as a [`Duration`].
    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }
}
