//! Public API surface for the planning backend.
//!
//! This file consolidates the DTO types consumed and produced by the core
//! pipeline: the input payload assembled by the caller, the per-point records
//! built during collection, and the scored results handed to rendering/export.
//! All types derive Serialize/Deserialize for JSON serialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Meters to feet conversion factor, applied consistently across the crate.
pub const M_TO_FT: f64 = 3.28084;

/// Input validation error. Surfaced to the caller before any collection begins.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("formation too large: {0} vessels (maximum 6)")]
    TooManyVessels(usize),
}

/// A raw latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude in decimal degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Result<Self, InputError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InputError::InvalidCoordinate(format!(
                "latitude {} out of range [-90, 90]",
                lat
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(InputError::InvalidCoordinate(format!(
                "longitude {} out of range [-180, 180]",
                lon
            )));
        }
        Ok(Self { lat, lon })
    }
}

/// Primary mission driving the scoring weight vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mission {
    AmphibiousLanding,
    NavalGunfireSupport,
    FlightOperations,
    MaritimeInterdiction,
    HumanitarianAssistance,
}

impl Mission {
    /// All defined missions, in UI presentation order.
    pub const ALL: [Mission; 5] = [
        Mission::AmphibiousLanding,
        Mission::NavalGunfireSupport,
        Mission::FlightOperations,
        Mission::MaritimeInterdiction,
        Mission::HumanitarianAssistance,
    ];
}

/// Derived operational geometry, immutable once computed.
///
/// The sector spans exactly 180° centered on the direction of attack and may
/// wrap through 0°/360°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationGeometry {
    /// Arithmetic midpoint of the two lateral limits
    pub center: LatLon,
    /// Planned approach heading, perpendicular to the lateral-limit line (0-360)
    pub direction_of_attack_deg: f64,
    /// Lower sector bound in degrees (0-360)
    pub sector_min_bearing: f64,
    /// Upper sector bound in degrees (0-360)
    pub sector_max_bearing: f64,
}

/// A raw lattice coordinate before environmental enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Regional weather snapshot, shared across all points in one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_f: f64,
    pub relative_humidity_pct: f64,
    pub precipitation: f64,
    pub weather_code: i64,
    pub cloud_cover_pct: f64,
    pub visibility_m: f64,
    pub wind_speed_kts: f64,
    pub wind_direction_deg: f64,
    pub wind_gusts_kts: f64,
}

impl WeatherSnapshot {
    /// Conservative defaults used when every regional weather fetch fails:
    /// moderate wind, no precipitation, 40% cloud, 10 km visibility.
    pub fn conservative_default() -> Self {
        Self {
            temperature_f: 82.0,
            relative_humidity_pct: 75.0,
            precipitation: 0.0,
            weather_code: 1,
            cloud_cover_pct: 40.0,
            visibility_m: 10_000.0,
            wind_speed_kts: 15.0,
            wind_direction_deg: 90.0,
            wind_gusts_kts: 20.0,
        }
    }
}

/// Per-point sea-state snapshot. Absent when the marine fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarineSnapshot {
    pub wave_height_ft: f64,
    pub wave_direction_deg: f64,
    pub wave_period_s: f64,
    pub wind_wave_height_ft: f64,
    pub swell_wave_height_ft: f64,
    pub current_velocity_kts: f64,
    pub current_direction_deg: f64,
}

/// Point bathymetry. Depth is positive down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BathymetryRecord {
    pub depth_m: f64,
    pub depth_ft: f64,
    /// False means the sampled elevation was at or above sea level (land)
    pub is_ocean: bool,
    /// True when the value is a fallback placeholder, not a measurement
    pub estimated: bool,
    /// Name of the dataset or policy that produced this value
    pub source: String,
}

impl BathymetryRecord {
    /// Conservative placeholder used when the elevation source is unavailable.
    pub fn fallback() -> Self {
        Self {
            depth_m: 50.0,
            depth_ft: 50.0 * M_TO_FT,
            is_ocean: true,
            estimated: true,
            source: "Fallback estimate".to_string(),
        }
    }
}

/// Sunrise/sunset at the operation center, as reported by the forecast provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: String,
    pub sunset: String,
}

/// A location resolved by the geocoder, either parsed or looked up by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

/// One candidate location after collection. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedPoint {
    pub lat: f64,
    pub lon: f64,
    pub weather: WeatherSnapshot,
    pub marine: Option<MarineSnapshot>,
    pub bathymetry: BathymetryRecord,
    pub distance_from_center_nm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_target_nm: Option<f64>,
}

/// Six sub-scores plus the mission-weighted overall, all 0-100 and rounded to
/// one decimal for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall: f64,
    pub weather: f64,
    pub sea_state: f64,
    pub depth: f64,
    pub flight_ops: f64,
    pub fire_support: f64,
    pub distance: f64,
}

/// An enriched point with its score breakdown attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub lat: f64,
    pub lon: f64,
    pub scores: ScoreBreakdown,
    pub weather: WeatherSnapshot,
    pub marine: Option<MarineSnapshot>,
    pub bathymetry: BathymetryRecord,
    pub distance_from_center_nm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_target_nm: Option<f64>,
}

/// A vessel in the supported formation. Read-only to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    #[serde(rename = "type")]
    pub vessel_type: String,
    pub name: String,
    pub draft_ft: f64,
    pub min_depth_ft: f64,
    pub length_ft: f64,
    #[serde(default)]
    pub has_flight_deck: bool,
    #[serde(default)]
    pub has_well_deck: bool,
    #[serde(default)]
    pub has_5_inch_gun: bool,
}

impl Vessel {
    fn preset(
        vessel_type: &str,
        draft_ft: f64,
        min_depth_ft: f64,
        length_ft: f64,
        has_flight_deck: bool,
        has_well_deck: bool,
        has_5_inch_gun: bool,
    ) -> Self {
        Self {
            vessel_type: vessel_type.to_string(),
            name: vessel_type.to_string(),
            draft_ft,
            min_depth_ft,
            length_ft,
            has_flight_deck,
            has_well_deck,
            has_5_inch_gun,
        }
    }
}

/// Standard vessel presets offered by the input shell.
pub fn vessel_presets() -> Vec<Vessel> {
    vec![
        Vessel::preset("LHA/LHD", 27.0, 65.0, 844.0, true, true, false),
        Vessel::preset("LPD", 23.0, 55.0, 684.0, true, true, false),
        Vessel::preset("LSD", 19.0, 45.0, 609.0, true, true, true),
        Vessel::preset("DDG", 20.5, 50.0, 509.0, false, false, true),
        Vessel::preset("LCS", 14.5, 35.0, 388.0, false, false, false),
    ]
}

/// Caller-supplied go/no-go weather limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherThresholds {
    pub max_wind_speed_kts: f64,
    pub max_wave_height_ft: f64,
    pub min_visibility_m: f64,
    pub max_cloud_cover_pct: f64,
}

impl Default for WeatherThresholds {
    fn default() -> Self {
        Self {
            max_wind_speed_kts: 25.0,
            max_wave_height_ft: 6.0,
            min_visibility_m: 5000.0,
            max_cloud_cover_pct: 75.0,
        }
    }
}

/// A known hazard marker, passed through to the display layer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub lat: f64,
    pub lon: f64,
    pub radius_nm: f64,
    #[serde(rename = "type")]
    pub hazard_type: String,
    #[serde(default)]
    pub source: String,
}

/// An additional beach defined by its own pair of lateral limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beach {
    pub name: String,
    pub lateral_limit_a: LatLon,
    pub lateral_limit_b: LatLon,
}

fn default_radius_nm() -> f64 {
    13.0
}

fn default_grid_spacing_nm() -> f64 {
    1.0
}

fn default_min_distance_shore_nm() -> f64 {
    5.0
}

fn default_max_distance_shore_nm() -> f64 {
    50.0
}

/// Structured input payload assembled by the caller.
///
/// The core augments this payload in place with the derived
/// [`OperationGeometry`] before collection starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInputs {
    pub primary_mission: Mission,
    pub lateral_limit_a: LatLon,
    pub lateral_limit_b: LatLon,
    /// Optional target as "lat, lon" or a place name; empty means no target
    #[serde(default)]
    pub target_location: String,
    /// Optional override for the center location ("lat, lon" or a place
    /// name). When absent, the derived geometry midpoint is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_location: Option<String>,
    #[serde(default)]
    pub additional_beaches: Vec<Beach>,
    #[serde(default)]
    pub known_hazards: Vec<Hazard>,
    #[serde(default)]
    pub vessels: Vec<Vessel>,
    #[serde(default)]
    pub weather_thresholds: WeatherThresholds,
    #[serde(default = "default_radius_nm")]
    pub radius_nm: f64,
    #[serde(default = "default_grid_spacing_nm")]
    pub grid_spacing_nm: f64,
    #[serde(default = "default_min_distance_shore_nm")]
    pub min_distance_shore_nm: f64,
    #[serde(default = "default_max_distance_shore_nm")]
    pub max_distance_shore_nm: f64,
    /// Derived geometry, filled in by [`PlanInputs::apply_geometry`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<OperationGeometry>,
}

impl PlanInputs {
    /// Validate the payload before any collection begins.
    pub fn validate(&self) -> Result<(), InputError> {
        LatLon::new(self.lateral_limit_a.lat, self.lateral_limit_a.lon)?;
        LatLon::new(self.lateral_limit_b.lat, self.lateral_limit_b.lon)?;
        if self.vessels.len() > 6 {
            return Err(InputError::TooManyVessels(self.vessels.len()));
        }
        if !(self.radius_nm.is_finite() && self.radius_nm > 0.0) {
            return Err(InputError::InvalidParameter(format!(
                "radius_nm must be positive, got {}",
                self.radius_nm
            )));
        }
        if !(self.grid_spacing_nm.is_finite() && self.grid_spacing_nm > 0.0) {
            return Err(InputError::InvalidParameter(format!(
                "grid_spacing_nm must be positive, got {}",
                self.grid_spacing_nm
            )));
        }
        Ok(())
    }

    /// Derive and attach the operational geometry from the lateral limits.
    pub fn apply_geometry(&mut self) {
        self.geometry = Some(crate::algorithms::geometry::build_geometry(
            self.lateral_limit_a,
            self.lateral_limit_b,
        ));
    }

    /// Center location string handed to the geocoder: the caller's override
    /// when present, otherwise the derived geometry midpoint as "lat, lon".
    pub fn center_location(&self) -> Option<String> {
        if let Some(ref explicit) = self.center_location {
            return Some(explicit.clone());
        }
        self.geometry
            .map(|g| format!("{:.4}, {:.4}", g.center.lat, g.center.lon))
    }
}

/// Running counts maintained during one collection run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectorStats {
    pub ocean_points: usize,
    pub land_points: usize,
    pub total_points: usize,
    /// Bathymetry source name -> number of points it served
    pub bathy_sources: BTreeMap<String, usize>,
}

/// Run metadata finalized once collection completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub collected_at: chrono::DateTime<chrono::Utc>,
    pub points_total: usize,
    pub points_ocean: usize,
    pub points_land: usize,
    pub bathymetry_sources: BTreeMap<String, usize>,
}

/// Everything one collection run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionResult {
    pub center: ResolvedLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ResolvedLocation>,
    pub grid_points: Vec<GridPoint>,
    pub analyzed_points: Vec<EnrichedPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub astronomical: Option<SunTimes>,
    pub metadata: RunMetadata,
}

/// Metadata attached to an exported analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub analysis_time: chrono::DateTime<chrono::Utc>,
    pub center_location: String,
    pub mission: Mission,
    pub vessels: Vec<String>,
}

/// Final analysis envelope: metadata plus scored locations, best first.
///
/// This is plain structural serialization; the JSON exporter and the map
/// renderer consume it as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub scored_locations: Vec<ScoredPoint>,
}
