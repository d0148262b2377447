use super::*;
use crate::api::{
    MarineSnapshot, Mission, PlanInputs, ResolvedLocation, SunTimes, Vessel, WeatherSnapshot,
    WeatherThresholds,
};
use crate::sources::weather::WeatherProvider;
use crate::sources::{NameLookup, PointSource, Unavailable};
use async_trait::async_trait;

struct OceanElevation;

#[async_trait]
impl PointSource<f64> for OceanElevation {
    async fn fetch(&self, _lat: f64, _lon: f64) -> Result<f64, Unavailable> {
        Ok(-80.0)
    }
}

/// Land west of the given longitude, ocean elsewhere.
struct CoastlineElevation {
    land_west_of: f64,
}

#[async_trait]
impl PointSource<f64> for CoastlineElevation {
    async fn fetch(&self, _lat: f64, lon: f64) -> Result<f64, Unavailable> {
        if lon < self.land_west_of {
            Ok(15.0)
        } else {
            Ok(-40.0)
        }
    }
}

struct CalmWeather;

#[async_trait]
impl PointSource<WeatherSnapshot> for CalmWeather {
    async fn fetch(&self, _lat: f64, _lon: f64) -> Result<WeatherSnapshot, Unavailable> {
        Ok(WeatherSnapshot {
            wind_speed_kts: 12.0,
            ..WeatherSnapshot::conservative_default()
        })
    }
}

struct CalmSeas;

#[async_trait]
impl PointSource<MarineSnapshot> for CalmSeas {
    async fn fetch(&self, _lat: f64, _lon: f64) -> Result<MarineSnapshot, Unavailable> {
        Ok(MarineSnapshot {
            wave_height_ft: 2.0,
            wave_direction_deg: 180.0,
            wave_period_s: 7.0,
            wind_wave_height_ft: 1.0,
            swell_wave_height_ft: 1.5,
            current_velocity_kts: 0.5,
            current_direction_deg: 90.0,
        })
    }
}

struct NoMarine;

#[async_trait]
impl PointSource<MarineSnapshot> for NoMarine {
    async fn fetch(&self, _lat: f64, _lon: f64) -> Result<MarineSnapshot, Unavailable> {
        Err(Unavailable::new("marine endpoint down"))
    }
}

struct TodaySun;

#[async_trait]
impl PointSource<SunTimes> for TodaySun {
    async fn fetch(&self, _lat: f64, _lon: f64) -> Result<SunTimes, Unavailable> {
        Ok(SunTimes {
            sunrise: "2026-08-29T05:21".to_string(),
            sunset: "2026-08-29T17:43".to_string(),
        })
    }
}

struct NoSun;

#[async_trait]
impl PointSource<SunTimes> for NoSun {
    async fn fetch(&self, _lat: f64, _lon: f64) -> Result<SunTimes, Unavailable> {
        Err(Unavailable::new("forecast endpoint down"))
    }
}

struct NoMatches;

#[async_trait]
impl NameLookup for NoMatches {
    async fn lookup(&self, _name: &str) -> Result<ResolvedLocation, Unavailable> {
        Err(Unavailable::new("no geocoding results"))
    }
}

fn collector(
    elevation: Box<dyn PointSource<f64>>,
    marine: Box<dyn PointSource<MarineSnapshot>>,
    sun: Box<dyn PointSource<SunTimes>>,
) -> GridCollector {
    GridCollector::new(
        crate::sources::BathymetryProvider::with_source(elevation),
        EnvironmentProvider::with_sources(
            WeatherProvider::with_source(Box::new(CalmWeather)),
            marine,
            sun,
        ),
        Geocoder::with_lookup(Box::new(NoMatches)),
        Duration::ZERO,
    )
}

fn small_inputs() -> PlanInputs {
    let mut inputs = PlanInputs {
        primary_mission: Mission::AmphibiousLanding,
        lateral_limit_a: LatLon {
            lat: 11.8269,
            lon: 92.5228,
        },
        lateral_limit_b: LatLon {
            lat: 11.5347,
            lon: 92.5903,
        },
        target_location: String::new(),
        center_location: None,
        additional_beaches: vec![],
        known_hazards: vec![],
        vessels: Vec::<Vessel>::new(),
        weather_thresholds: WeatherThresholds::default(),
        radius_nm: 3.0,
        grid_spacing_nm: 1.0,
        min_distance_shore_nm: 5.0,
        max_distance_shore_nm: 50.0,
        geometry: None,
    };
    inputs.apply_geometry();
    inputs
}

#[test]
fn test_grid_points_respect_radius_and_sector() {
    let inputs = small_inputs();
    let geometry = inputs.geometry.unwrap();
    let points = generate_grid(&geometry, 3.0, 1.0);
    assert!(!points.is_empty());

    let radius_deg = 3.0 / 60.0;
    for p in &points {
        let d = ((p.lat - geometry.center.lat).powi(2) + (p.lon - geometry.center.lon).powi(2))
            .sqrt();
        assert!(d <= radius_deg + 1e-12);
        let bearing = initial_bearing(
            geometry.center,
            LatLon {
                lat: p.lat,
                lon: p.lon,
            },
        );
        assert!(bearing_in_sector(
            bearing,
            geometry.sector_min_bearing,
            geometry.sector_max_bearing
        ));
    }
}

#[test]
fn test_grid_sector_wraparound_includes_north() {
    // Sector wrapping through 0°: 300° to 60°
    let geometry = OperationGeometry {
        center: LatLon { lat: 0.0, lon: 0.0 },
        direction_of_attack_deg: 0.0,
        sector_min_bearing: 300.0,
        sector_max_bearing: 60.0,
    };
    let points = generate_grid(&geometry, 6.0, 2.0);
    assert!(!points.is_empty());

    let mut saw_north = false;
    for p in &points {
        let bearing = initial_bearing(
            geometry.center,
            LatLon {
                lat: p.lat,
                lon: p.lon,
            },
        );
        assert!(
            bearing >= 300.0 || bearing <= 60.0,
            "bearing {} outside wrapped sector",
            bearing
        );
        // No point south of the sector (e.g. bearing near 150°)
        assert!(!(120.0..=240.0).contains(&bearing));
        if bearing <= 20.0 || bearing >= 340.0 {
            saw_north = true;
        }
    }
    assert!(saw_north, "expected points near the 0° bearing");
}

#[tokio::test]
async fn test_every_analyzed_point_is_ocean() {
    let inputs = small_inputs();
    // The sector faces west of the lateral-limit line, so the coastline
    // threshold sits just west of center to split the surviving grid.
    let center_lon = inputs.geometry.unwrap().center.lon;
    let collector = collector(
        Box::new(CoastlineElevation {
            land_west_of: center_lon - 0.02,
        }),
        Box::new(CalmSeas),
        Box::new(TodaySun),
    );

    let result = collector.collect(&inputs, None).await.unwrap();
    assert!(!result.analyzed_points.is_empty());
    for p in &result.analyzed_points {
        assert!(p.bathymetry.is_ocean);
    }
    assert!(result.metadata.points_land > 0);
    assert_eq!(
        result.metadata.points_ocean + result.metadata.points_land,
        result.metadata.points_total
    );
    assert_eq!(result.analyzed_points.len(), result.metadata.points_ocean);
    assert_eq!(result.grid_points.len(), result.metadata.points_total);
}

#[tokio::test]
async fn test_progress_reported_once_per_point() {
    let inputs = small_inputs();
    let collector = collector(
        Box::new(OceanElevation),
        Box::new(CalmSeas),
        Box::new(TodaySun),
    );

    let mut calls: Vec<(usize, usize)> = Vec::new();
    let mut on_progress = |done: usize, total: usize, _stats: &CollectorStats| {
        calls.push((done, total));
    };
    let result = collector
        .collect(&inputs, Some(&mut on_progress))
        .await
        .unwrap();

    let total = result.metadata.points_total;
    assert_eq!(calls.len(), total);
    for (i, (done, reported_total)) in calls.iter().enumerate() {
        assert_eq!(*done, i + 1);
        assert_eq!(*reported_total, total);
    }
}

#[tokio::test]
async fn test_bathymetry_source_histogram() {
    let inputs = small_inputs();
    let collector = collector(
        Box::new(OceanElevation),
        Box::new(CalmSeas),
        Box::new(TodaySun),
    );
    let result = collector.collect(&inputs, None).await.unwrap();

    let counted: usize = result.metadata.bathymetry_sources.values().sum();
    assert_eq!(counted, result.metadata.points_total);
    assert!(result
        .metadata
        .bathymetry_sources
        .contains_key("OpenTopoData GEBCO2020"));
}

#[tokio::test]
async fn test_marine_failure_leaves_points_without_marine_data() {
    let inputs = small_inputs();
    let collector = collector(
        Box::new(OceanElevation),
        Box::new(NoMarine),
        Box::new(NoSun),
    );
    let result = collector.collect(&inputs, None).await.unwrap();

    assert!(!result.analyzed_points.is_empty());
    assert!(result.analyzed_points.iter().all(|p| p.marine.is_none()));
    assert!(result.astronomical.is_none());
}

#[tokio::test]
async fn test_astronomical_data_attached_when_available() {
    let inputs = small_inputs();
    let collector = collector(
        Box::new(OceanElevation),
        Box::new(CalmSeas),
        Box::new(TodaySun),
    );
    let result = collector.collect(&inputs, None).await.unwrap();
    let astro = result.astronomical.unwrap();
    assert!(astro.sunrise.contains("05:21"));
}

#[tokio::test]
async fn test_target_distances_computed() {
    let mut inputs = small_inputs();
    inputs.target_location = "11.6689, 92.5916".to_string();
    let collector = collector(
        Box::new(OceanElevation),
        Box::new(CalmSeas),
        Box::new(TodaySun),
    );
    let result = collector.collect(&inputs, None).await.unwrap();

    let target = result.target.as_ref().unwrap();
    assert!((target.lat - 11.6689).abs() < 1e-9);
    for p in &result.analyzed_points {
        let d = p.distance_from_target_nm.unwrap();
        assert!(d.is_finite() && d >= 0.0);
    }
}

#[tokio::test]
async fn test_unresolvable_center_is_fatal() {
    let mut inputs = small_inputs();
    inputs.center_location = Some("Atlantis".to_string());
    let collector = collector(
        Box::new(OceanElevation),
        Box::new(CalmSeas),
        Box::new(TodaySun),
    );
    let err = collector.collect(&inputs, None).await.unwrap_err();
    assert!(matches!(err, CollectError::CenterUnresolved(ref loc) if loc == "Atlantis"));
}

#[tokio::test]
async fn test_invalid_spacing_is_input_error() {
    let mut inputs = small_inputs();
    inputs.grid_spacing_nm = -1.0;
    let collector = collector(
        Box::new(OceanElevation),
        Box::new(CalmSeas),
        Box::new(TodaySun),
    );
    let err = collector.collect(&inputs, None).await.unwrap_err();
    assert!(matches!(err, CollectError::Input(_)));
}
