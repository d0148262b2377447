//! Mission suitability scoring.
//!
//! Every enriched point gets six sub-scores on a 0-100 scale, combined into an
//! overall score by mission-specific weights. Sub-scores are pure functions of
//! the point data and the caller's thresholds; missing data falls to a neutral
//! or zero score depending on how disqualifying the gap is.

use crate::api::{
    AnalysisReport, BathymetryRecord, CollectionResult, EnrichedPoint, MarineSnapshot, Mission,
    PlanInputs, ReportMetadata, ScoreBreakdown, ScoredPoint, WeatherSnapshot, WeatherThresholds,
};
use std::cmp::Ordering;

/// Mk45 5" planning factor.
pub const DEFAULT_GUN_RANGE_NM: f64 = 13.0;

/// Per-mission sub-score weights. Each set sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionWeights {
    pub weather: f64,
    pub sea_state: f64,
    pub depth: f64,
    pub flight_ops: f64,
    pub fire_support: f64,
    pub distance: f64,
}

impl MissionWeights {
    pub fn for_mission(mission: Mission) -> Self {
        match mission {
            Mission::AmphibiousLanding => Self {
                weather: 0.15,
                sea_state: 0.25,
                depth: 0.15,
                flight_ops: 0.20,
                fire_support: 0.15,
                distance: 0.10,
            },
            Mission::NavalGunfireSupport => Self {
                weather: 0.15,
                sea_state: 0.15,
                depth: 0.15,
                flight_ops: 0.05,
                fire_support: 0.40,
                distance: 0.10,
            },
            Mission::FlightOperations => Self {
                weather: 0.20,
                sea_state: 0.25,
                depth: 0.15,
                flight_ops: 0.30,
                fire_support: 0.05,
                distance: 0.05,
            },
            Mission::MaritimeInterdiction | Mission::HumanitarianAssistance => Self {
                weather: 0.20,
                sea_state: 0.20,
                depth: 0.15,
                flight_ops: 0.15,
                fire_support: 0.20,
                distance: 0.10,
            },
        }
    }
}

/// Scores enriched points against one mission's priorities.
pub struct MissionScorer {
    mission: Mission,
    thresholds: WeatherThresholds,
    min_depth_required_ft: f64,
    max_gun_range_nm: f64,
    has_flight_deck: bool,
    min_distance_shore_nm: f64,
    max_distance_shore_nm: f64,
    has_target: bool,
}

impl MissionScorer {
    pub fn new(inputs: &PlanInputs, has_target: bool) -> Self {
        let min_depth_required_ft = inputs
            .vessels
            .iter()
            .map(|v| v.min_depth_ft)
            .fold(f64::NAN, f64::max);
        let min_depth_required_ft = if min_depth_required_ft.is_nan() {
            20.0
        } else {
            min_depth_required_ft
        };

        let max_gun_range_nm = if inputs.vessels.iter().any(|v| v.has_5_inch_gun) {
            DEFAULT_GUN_RANGE_NM
        } else {
            0.0
        };

        Self {
            mission: inputs.primary_mission,
            thresholds: inputs.weather_thresholds,
            min_depth_required_ft,
            max_gun_range_nm,
            has_flight_deck: inputs.vessels.iter().any(|v| v.has_flight_deck),
            min_distance_shore_nm: inputs.min_distance_shore_nm,
            max_distance_shore_nm: inputs.max_distance_shore_nm,
            has_target,
        }
    }

    /// General weather suitability. Hard zero above the wind limit or below
    /// the visibility floor; otherwise graded penalties with a capped
    /// visibility bonus.
    pub fn score_weather(&self, weather: &WeatherSnapshot) -> f64 {
        let max_wind = self.thresholds.max_wind_speed_kts;
        let min_vis = self.thresholds.min_visibility_m;
        let max_cloud = self.thresholds.max_cloud_cover_pct;

        if weather.wind_speed_kts > max_wind {
            return 0.0;
        }
        if weather.visibility_m < min_vis {
            return 0.0;
        }

        let cloud_penalty = if weather.cloud_cover_pct > max_cloud {
            // still possible, but heavily penalize
            40.0
        } else {
            (weather.cloud_cover_pct / max_cloud.max(1.0)) * 20.0
        };

        let mut score = 100.0;
        score -= (weather.wind_speed_kts / max_wind) * 30.0;
        score -= cloud_penalty;

        if weather.precipitation > 5.0 {
            score -= 30.0;
        } else if weather.precipitation > 0.0 {
            score -= 10.0;
        }

        score += ((weather.visibility_m - min_vis) / min_vis.max(1.0) * 10.0).min(10.0);

        score.clamp(0.0, 100.0)
    }

    /// Sea-state suitability. Neutral 50 when marine data is absent; hard
    /// zero above the wave-height limit.
    pub fn score_sea_state(&self, marine: Option<&MarineSnapshot>) -> f64 {
        let Some(marine) = marine else {
            return 50.0;
        };

        let max_wave = self.thresholds.max_wave_height_ft;
        if marine.wave_height_ft > max_wave {
            return 0.0;
        }

        let mut score = 100.0;
        score -= (marine.wave_height_ft / max_wave) * 40.0;

        if marine.swell_wave_height_ft > 6.0 {
            score -= 20.0;
        } else if marine.swell_wave_height_ft > 3.0 {
            score -= 10.0;
        }

        if marine.current_velocity_kts > 2.0 {
            score -= 15.0;
        }

        score.clamp(0.0, 100.0)
    }

    /// Depth against the deepest-draft vessel in the formation. The ideal
    /// band runs from the required minimum up to 300 ft.
    pub fn score_depth(&self, bathymetry: Option<&BathymetryRecord>) -> f64 {
        let Some(bathymetry) = bathymetry else {
            return 50.0;
        };
        if !bathymetry.is_ocean {
            return 0.0;
        }

        let depth_ft = bathymetry.depth_ft;
        if depth_ft < self.min_depth_required_ft {
            return 0.0;
        }
        if depth_ft <= 300.0 {
            return 100.0;
        }
        80.0
    }

    /// Flight operations window. Zero without a flight deck in the formation
    /// or without both weather and marine data; graded on wind band,
    /// visibility, cloud, wave height, and precipitation.
    pub fn score_flight_ops(
        &self,
        weather: &WeatherSnapshot,
        marine: Option<&MarineSnapshot>,
    ) -> f64 {
        if !self.has_flight_deck {
            return 0.0;
        }
        let Some(marine) = marine else {
            return 0.0;
        };

        let mut score: f64 = 100.0;

        // Light wind hurts rotary-wing ops; 10-25 kts is the sweet spot.
        if weather.wind_speed_kts < 10.0 {
            score -= 20.0;
        } else if weather.wind_speed_kts <= 25.0 {
            // no penalty
        } else if weather.wind_speed_kts <= 35.0 {
            score -= 30.0;
        } else {
            return 0.0;
        }

        if weather.visibility_m < 3000.0 {
            return 0.0;
        }
        if weather.visibility_m < 5000.0 {
            score -= 30.0;
        }

        if weather.cloud_cover_pct > 80.0 {
            score -= 30.0;
        } else if weather.cloud_cover_pct > 50.0 {
            score -= 15.0;
        }

        if marine.wave_height_ft > 6.0 {
            score -= 40.0;
        } else if marine.wave_height_ft > 4.0 {
            score -= 20.0;
        }

        if weather.precipitation > 2.0 {
            score -= 40.0;
        } else if weather.precipitation > 0.0 {
            score -= 20.0;
        }

        score.clamp(0.0, 100.0)
    }

    /// Naval gunfire support position. Zero without a gun in the formation;
    /// neutral-high 70 without a designated target; otherwise range bands
    /// against the gun's reach with a shallow-water penalty.
    pub fn score_fire_support(&self, point: &EnrichedPoint) -> f64 {
        if self.max_gun_range_nm <= 0.0 {
            return 0.0;
        }
        if !self.has_target {
            return 70.0;
        }

        let dist = point.distance_from_target_nm.unwrap_or(1e9);
        let mut score: f64 = if dist <= self.max_gun_range_nm * 0.7 {
            100.0
        } else if dist <= self.max_gun_range_nm {
            80.0
        } else {
            return 0.0;
        };

        if point.bathymetry.depth_ft < 30.0 {
            score -= 40.0;
        }

        score.clamp(0.0, 100.0)
    }

    /// Standoff constraint. Distance from center stands in for distance from
    /// shore until shoreline data is integrated.
    pub fn score_distance_constraints(&self, point: &EnrichedPoint) -> f64 {
        let dist = point.distance_from_center_nm;
        if dist < self.min_distance_shore_nm || dist > self.max_distance_shore_nm {
            return 20.0;
        }
        100.0
    }

    /// Full breakdown for one point, each component rounded to one decimal.
    pub fn breakdown(&self, point: &EnrichedPoint) -> ScoreBreakdown {
        let weather = self.score_weather(&point.weather);
        let sea_state = self.score_sea_state(point.marine.as_ref());
        let depth = self.score_depth(Some(&point.bathymetry));
        let flight_ops = self.score_flight_ops(&point.weather, point.marine.as_ref());
        let fire_support = self.score_fire_support(point);
        let distance = self.score_distance_constraints(point);

        let w = MissionWeights::for_mission(self.mission);
        let overall = weather * w.weather
            + sea_state * w.sea_state
            + depth * w.depth
            + flight_ops * w.flight_ops
            + fire_support * w.fire_support
            + distance * w.distance;

        ScoreBreakdown {
            overall: round1(overall),
            weather: round1(weather),
            sea_state: round1(sea_state),
            depth: round1(depth),
            flight_ops: round1(flight_ops),
            fire_support: round1(fire_support),
            distance: round1(distance),
        }
    }

    /// Score every point and sort best-first. The sort is stable, so equal
    /// scores keep collection order.
    pub fn score_all(&self, points: &[EnrichedPoint]) -> Vec<ScoredPoint> {
        let mut scored: Vec<ScoredPoint> = points
            .iter()
            .map(|p| ScoredPoint {
                lat: p.lat,
                lon: p.lon,
                scores: self.breakdown(p),
                weather: p.weather.clone(),
                marine: p.marine.clone(),
                bathymetry: p.bathymetry.clone(),
                distance_from_center_nm: p.distance_from_center_nm,
                distance_from_target_nm: p.distance_from_target_nm,
            })
            .collect();

        scored.sort_by(|a, b| {
            b.scores
                .overall
                .partial_cmp(&a.scores.overall)
                .unwrap_or(Ordering::Equal)
        });
        scored
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score a full collection run and wrap it in the export envelope.
pub fn analyze(inputs: &PlanInputs, collection: &CollectionResult) -> AnalysisReport {
    let scorer = MissionScorer::new(inputs, collection.target.is_some());
    let scored_locations = scorer.score_all(&collection.analyzed_points);

    log::info!(
        "scored {} points for {:?}, best {:.1}",
        scored_locations.len(),
        inputs.primary_mission,
        scored_locations
            .first()
            .map(|p| p.scores.overall)
            .unwrap_or(0.0)
    );

    AnalysisReport {
        metadata: ReportMetadata {
            analysis_time: chrono::Utc::now(),
            center_location: inputs
                .center_location()
                .unwrap_or_else(|| collection.center.name.clone()),
            mission: inputs.primary_mission,
            vessels: inputs
                .vessels
                .iter()
                .map(|v| v.vessel_type.clone())
                .collect(),
        },
        scored_locations,
    }
}

#[cfg(test)]
#[path = "scorer_tests.rs"]
mod scorer_tests;
