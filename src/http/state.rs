//! Application state for the HTTP server.

use crate::config::PlannerConfig;
use crate::services::job_tracker::JobTracker;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// In-memory tracker for background analysis jobs
    pub job_tracker: JobTracker,
    /// Provider endpoints and pacing
    pub config: PlannerConfig,
}

impl AppState {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            job_tracker: JobTracker::new(),
            config,
        }
    }
}
