//! Data Transfer Objects for the HTTP API.
//!
//! The core DTOs already derive Serialize/Deserialize and cross the wire
//! as-is; this module adds only the request/response envelopes.

use serde::{Deserialize, Serialize};

pub use crate::api::{AnalysisReport, PlanInputs};
pub use crate::services::job_tracker::LogEntry;

/// Response for analysis creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnalysisResponse {
    /// Job ID for tracking the background run
    pub job_id: String,
    pub message: String,
}

/// Job status response for background analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: String,
    /// Grid points processed so far
    pub points_done: usize,
    /// Total grid points, 0 until the grid is generated
    pub points_total: usize,
    pub logs: Vec<LogEntry>,
    /// Full analysis report once completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
