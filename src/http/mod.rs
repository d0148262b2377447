//! HTTP server module.
//!
//! Axum-based REST surface over the core planning services. Analyses run as
//! background tasks; clients poll job status or follow the SSE log stream.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
