//! Service layer: grid collection, mission scoring, and background job plumbing.

pub mod collector;
pub mod scorer;

#[cfg(feature = "http-server")]
pub mod analysis_runner;
#[cfg(feature = "http-server")]
pub mod job_tracker;

pub use collector::{generate_grid, CollectError, GridCollector};
pub use scorer::{analyze, MissionScorer, MissionWeights, DEFAULT_GUN_RANGE_NM};
