//! Grid generation and environmental data collection.
//!
//! The collector generates the sector-constrained candidate grid, then walks
//! it strictly sequentially: bathymetry first (land points are counted and
//! skipped without spending marine calls), then the shared weather snapshot,
//! per-point marine state, and distances. A fixed inter-point delay paces the
//! external calls, and a synchronous callback reports progress once per point.

use crate::algorithms::geometry::{bearing_in_sector, build_geometry, haversine_nm, initial_bearing};
use crate::api::{
    CollectionResult, CollectorStats, EnrichedPoint, GridPoint, InputError, LatLon,
    OperationGeometry, PlanInputs, RunMetadata,
};
use crate::sources::{BathymetryProvider, EnvironmentProvider, Geocoder};
use std::time::Duration;

/// Fatal collection errors. Everything else degrades into data flags.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error(transparent)]
    Input(#[from] InputError),
    /// The center location could not be resolved; there is no meaningful grid
    /// without a center.
    #[error("could not resolve center location '{0}'")]
    CenterUnresolved(String),
}

/// Progress observer: `(points_processed, points_total, running_stats)`.
///
/// Invoked synchronously once per grid point, land or ocean. The contract is
/// fast and non-blocking; a slow callback stalls collection.
pub type ProgressFn<'a> = dyn FnMut(usize, usize, &CollectorStats) + Send + 'a;

/// Generate the candidate point grid for an operation geometry.
///
/// Radius and spacing convert from nautical miles to degrees as `nm / 60`;
/// the lattice is square in degree space (no latitude correction, matching
/// the established planning behavior) and a point is kept only when its
/// Euclidean degree-distance from center is within the radius and its bearing
/// from center falls inside the sector.
pub fn generate_grid(
    geometry: &OperationGeometry,
    radius_nm: f64,
    spacing_nm: f64,
) -> Vec<GridPoint> {
    let radius_deg = radius_nm / 60.0;
    let spacing_deg = spacing_nm / 60.0;
    let center = geometry.center;

    let mut points = Vec::new();
    let mut lat = center.lat - radius_deg;
    while lat <= center.lat + radius_deg {
        let mut lon = center.lon - radius_deg;
        while lon <= center.lon + radius_deg {
            let distance = ((lat - center.lat).powi(2) + (lon - center.lon).powi(2)).sqrt();
            if distance <= radius_deg {
                let bearing = initial_bearing(center, LatLon { lat, lon });
                if bearing_in_sector(
                    bearing,
                    geometry.sector_min_bearing,
                    geometry.sector_max_bearing,
                ) {
                    points.push(GridPoint { lat, lon });
                }
            }
            lon += spacing_deg;
        }
        lat += spacing_deg;
    }

    points
}

/// Collects bathymetry, weather, marine, and astronomical data for a grid.
pub struct GridCollector {
    bathymetry: BathymetryProvider,
    environment: EnvironmentProvider,
    geocoder: Geocoder,
    pace: Duration,
}

impl GridCollector {
    pub fn new(
        bathymetry: BathymetryProvider,
        environment: EnvironmentProvider,
        geocoder: Geocoder,
        pace: Duration,
    ) -> Self {
        Self {
            bathymetry,
            environment,
            geocoder,
            pace,
        }
    }

    /// Run one collection.
    ///
    /// Fails only on invalid input or an unresolvable center; every external
    /// data failure degrades per source policy and the run continues.
    pub async fn collect(
        &self,
        inputs: &PlanInputs,
        mut progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<CollectionResult, CollectError> {
        inputs.validate()?;

        let geometry = inputs
            .geometry
            .unwrap_or_else(|| build_geometry(inputs.lateral_limit_a, inputs.lateral_limit_b));

        let center_location = inputs
            .center_location()
            .unwrap_or_else(|| format!("{:.4}, {:.4}", geometry.center.lat, geometry.center.lon));
        let center = self
            .geocoder
            .resolve(&center_location)
            .await
            .ok_or_else(|| CollectError::CenterUnresolved(center_location.clone()))?;

        let target = if inputs.target_location.trim().is_empty() {
            None
        } else {
            self.geocoder.resolve(&inputs.target_location).await
        };

        log::info!(
            "collection starting at {} ({:.4}, {:.4}), radius {} nm, spacing {} nm",
            center.name,
            center.lat,
            center.lon,
            inputs.radius_nm,
            inputs.grid_spacing_nm
        );

        // One regional snapshot per run, reused by every ocean point.
        let weather = self
            .environment
            .regional_weather(center.lat, center.lon)
            .await;

        let grid_points = generate_grid(&geometry, inputs.radius_nm, inputs.grid_spacing_nm);
        let total = grid_points.len();

        let mut stats = CollectorStats {
            total_points: total,
            ..Default::default()
        };
        let mut analyzed_points: Vec<EnrichedPoint> = Vec::new();

        for (i, point) in grid_points.iter().enumerate() {
            let bathymetry = self.bathymetry.depth_at(point.lat, point.lon).await;
            *stats
                .bathy_sources
                .entry(bathymetry.source.clone())
                .or_insert(0) += 1;

            if !bathymetry.is_ocean {
                stats.land_points += 1;
                if let Some(report) = progress.as_mut() {
                    report(i + 1, total, &stats);
                }
                self.pace_between_points().await;
                continue;
            }
            stats.ocean_points += 1;

            let marine = self.environment.marine(point.lat, point.lon).await;
            let here = LatLon {
                lat: point.lat,
                lon: point.lon,
            };
            let distance_from_target_nm = target.as_ref().map(|t| {
                haversine_nm(
                    LatLon {
                        lat: t.lat,
                        lon: t.lon,
                    },
                    here,
                )
            });

            analyzed_points.push(EnrichedPoint {
                lat: point.lat,
                lon: point.lon,
                weather: weather.clone(),
                marine,
                bathymetry,
                distance_from_center_nm: haversine_nm(
                    LatLon {
                        lat: center.lat,
                        lon: center.lon,
                    },
                    here,
                ),
                distance_from_target_nm,
            });

            if let Some(report) = progress.as_mut() {
                report(i + 1, total, &stats);
            }
            self.pace_between_points().await;
        }

        let astronomical = self.environment.sun_times(center.lat, center.lon).await;

        log::info!(
            "collection complete: {} ocean, {} land of {} points",
            stats.ocean_points,
            stats.land_points,
            stats.total_points
        );

        Ok(CollectionResult {
            center,
            target,
            grid_points,
            analyzed_points,
            astronomical,
            metadata: RunMetadata {
                collected_at: chrono::Utc::now(),
                points_total: stats.total_points,
                points_ocean: stats.ocean_points,
                points_land: stats.land_points,
                bathymetry_sources: stats.bathy_sources,
            },
        })
    }

    async fn pace_between_points(&self) {
        if !self.pace.is_zero() {
            tokio::time::sleep(self.pace).await;
        }
    }
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod collector_tests;
