//! # Navops Rust Backend
//!
//! Naval operations site-selection engine.
//!
//! This crate evaluates candidate ocean locations within an area of operations and
//! ranks them by mission suitability. It derives an operational geometry from two
//! lateral-limit boundary points, generates a sector-constrained candidate grid,
//! enriches each point with bathymetry, weather, and sea-state data from public
//! providers (degrading gracefully on failure), and scores every point against
//! mission-weighted criteria with hard disqualification rules.
//!
//! ## Features
//!
//! - **Geometry**: center point, direction of attack, and 180° sector from two
//!   boundary points
//! - **Data Collection**: cached bathymetry lookups, regional weather with offset
//!   retries, per-point marine state, sunrise/sunset
//! - **Scoring**: six sub-scores combined by mission-specific weight vectors
//! - **HTTP API**: RESTful endpoints with background jobs and SSE progress logs
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for inputs and results
//! - [`algorithms`]: pure numeric geometry (bearings, distances, sectors)
//! - [`sources`]: external data sources and their degradation policies
//! - [`services`]: collection, scoring, and job-tracking services
//! - [`http`]: Axum-based HTTP server and request handlers
//!

pub mod api;

pub mod algorithms;
pub mod config;

pub mod sources;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
