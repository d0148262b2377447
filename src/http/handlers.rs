//! HTTP handlers for the REST API.
//!
//! Each handler validates its input and delegates to the service layer;
//! analyses run as spawned background tasks tracked by the job tracker.

use axum::{
    extract::{Path, State},
    response::sse::{Event, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{CreateAnalysisResponse, HealthResponse, JobStatusResponse, PlanInputs};
use super::error::AppError;
use super::state::AppState;
use crate::services::analysis_runner;
use crate::services::collector::GridCollector;
use crate::services::job_tracker::JobStatus;
use crate::sources::{BathymetryProvider, EnvironmentProvider, Geocoder};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    }))
}

/// POST /v1/analyses
///
/// Start an analysis asynchronously. Returns `202` with a job ID for
/// tracking progress.
pub async fn create_analysis(
    State(state): State<AppState>,
    Json(mut inputs): Json<PlanInputs>,
) -> Result<(axum::http::StatusCode, Json<CreateAnalysisResponse>), AppError> {
    inputs.validate()?;
    inputs.apply_geometry();

    let collector = build_collector(&state)?;
    let job_id = state.job_tracker.create_job();
    let response_job_id = job_id.clone();

    let tracker = state.job_tracker.clone();
    tokio::spawn(async move {
        let _ = analysis_runner::run_analysis_async(job_id, tracker, collector, inputs).await;
    });

    Ok((
        axum::http::StatusCode::ACCEPTED,
        Json(CreateAnalysisResponse {
            job_id: response_job_id.clone(),
            message: format!(
                "Analysis started. Track progress at /v1/jobs/{}/logs",
                response_job_id
            ),
        }),
    ))
}

fn build_collector(state: &AppState) -> Result<GridCollector, AppError> {
    let config = &state.config;
    let bathymetry = BathymetryProvider::new(config).map_err(AppError::Internal)?;
    let environment = EnvironmentProvider::new(config).map_err(AppError::Internal)?;
    let geocoder = Geocoder::new(config).map_err(AppError::Internal)?;
    Ok(GridCollector::new(
        bathymetry,
        environment,
        geocoder,
        config.pace(),
    ))
}

/// GET /v1/jobs/{job_id}
///
/// Current status, progress counts, logs, and result of a job.
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> HandlerResult<JobStatusResponse> {
    let job = state
        .job_tracker
        .get_job(&job_id)
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

    Ok(Json(JobStatusResponse {
        job_id: job.job_id,
        status: format!("{:?}", job.status).to_lowercase(),
        points_done: job.points_done,
        points_total: job.points_total,
        logs: job.logs,
        result: job.result,
    }))
}

/// GET /v1/jobs/{job_id}/logs
///
/// Stream job logs via Server-Sent Events (SSE).
pub async fn stream_job_logs(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if state.job_tracker.get_job(&job_id).is_none() {
        return Err(AppError::NotFound(format!("Job {} not found", job_id)));
    }

    let tracker = state.job_tracker.clone();
    let stream = async_stream::stream! {
        let mut last_log_count = 0;
        loop {
            let logs = tracker.get_logs(&job_id);
            for log in logs.iter().skip(last_log_count) {
                let event_data = serde_json::to_string(log).unwrap_or_default();
                yield Ok(Event::default().data(event_data));
            }
            last_log_count = logs.len();

            if let Some(job) = tracker.get_job(&job_id) {
                if job.status != JobStatus::Running {
                    // Serde serialization keeps status values lowercase
                    let final_event = serde_json::json!({
                        "status": job.status,
                        "points_done": job.points_done,
                        "points_total": job.points_total,
                        "result": job.result,
                    });
                    yield Ok(Event::default()
                        .event("complete")
                        .data(serde_json::to_string(&final_event).unwrap_or_default()));
                    break;
                }
            } else {
                break;
            }

            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}
