//! Background analysis execution.
//!
//! Runs one collection + scoring pass as a spawned task, feeding progress
//! counts and log entries to the job tracker so clients can follow along over
//! SSE while the grid walk paces itself against the external providers.

use crate::api::{AnalysisReport, CollectorStats, PlanInputs};
use crate::services::collector::GridCollector;
use crate::services::job_tracker::{JobTracker, LogLevel};
use crate::services::scorer;

/// Collect and score one analysis, reporting progress to the tracker.
///
/// Designed to be spawned as a background task; the job is marked completed
/// or failed before this returns.
pub async fn run_analysis_async(
    job_id: String,
    tracker: JobTracker,
    collector: GridCollector,
    inputs: PlanInputs,
) -> Result<AnalysisReport, String> {
    tracker.log(&job_id, LogLevel::Info, "Starting site analysis...");
    tracker.log(
        &job_id,
        LogLevel::Info,
        format!(
            "Collecting environmental data (radius {} nm, spacing {} nm)...",
            inputs.radius_nm, inputs.grid_spacing_nm
        ),
    );

    let progress_tracker = tracker.clone();
    let progress_job = job_id.clone();
    let mut on_progress = move |done: usize, total: usize, _stats: &CollectorStats| {
        progress_tracker.set_progress(&progress_job, done, total);
    };

    let collection = match collector.collect(&inputs, Some(&mut on_progress)).await {
        Ok(collection) => collection,
        Err(e) => {
            let msg = format!("Collection failed: {}", e);
            tracker.fail_job(&job_id, &msg);
            return Err(msg);
        }
    };

    tracker.log(
        &job_id,
        LogLevel::Success,
        format!(
            "✓ Collected {} points: {} ocean, {} land",
            collection.metadata.points_total,
            collection.metadata.points_ocean,
            collection.metadata.points_land
        ),
    );

    tracker.log(
        &job_id,
        LogLevel::Info,
        format!(
            "Scoring {} ocean points for {:?}...",
            collection.analyzed_points.len(),
            inputs.primary_mission
        ),
    );
    let report = scorer::analyze(&inputs, &collection);

    let best = report
        .scored_locations
        .first()
        .map(|p| p.scores.overall)
        .unwrap_or(0.0);
    tracker.log(
        &job_id,
        LogLevel::Success,
        format!(
            "✅ Analysis complete: {} candidate locations, best score {:.1}",
            report.scored_locations.len(),
            best
        ),
    );

    let result = match serde_json::to_value(&report) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("failed to serialize analysis report: {}", e);
            None
        }
    };
    tracker.complete_job(&job_id, result);

    Ok(report)
}
