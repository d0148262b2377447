//! Shared HTTP client for external providers.

use super::Unavailable;
use std::time::Duration;

/// Thin wrapper around [`reqwest::Client`] with a per-call timeout.
///
/// Every provider request goes through [`ApiClient::get_json`]; any transport
/// error, non-success status, or undecodable body maps to [`Unavailable`] so
/// callers can apply their degradation policy uniformly.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
}

impl ApiClient {
    /// Build a client with the given per-call timeout.
    pub fn new(timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self { client })
    }

    /// GET `url` with query parameters and decode the JSON body.
    pub async fn get_json(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, Unavailable> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| Unavailable::new(format!("request failed: {}", e)))?;

        let response = response
            .error_for_status()
            .map_err(|e| Unavailable::new(format!("upstream status: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| Unavailable::new(format!("invalid JSON body: {}", e)))
    }
}

/// Numeric field accessor with safe coercion: missing, null, or non-numeric
/// values read as zero.
pub(crate) fn num_or_zero(value: &serde_json::Value, key: &str) -> f64 {
    value.get(key).and_then(|v| v.as_f64()).unwrap_or(0.0)
}
