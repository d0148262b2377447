use super::*;
use crate::api::{vessel_presets, LatLon, Mission, PlanInputs, Vessel};

fn inputs_with(mission: Mission, vessels: Vec<Vessel>) -> PlanInputs {
    PlanInputs {
        primary_mission: mission,
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
        vessels,
        weather_thresholds: WeatherThresholds::default(),
        radius_nm: 13.0,
        grid_spacing_nm: 1.0,
        min_distance_shore_nm: 5.0,
        max_distance_shore_nm: 50.0,
        geometry: None,
    }
}

fn calm_weather() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_f: 82.0,
        relative_humidity_pct: 70.0,
        precipitation: 0.0,
        weather_code: 1,
        cloud_cover_pct: 40.0,
        visibility_m: 10_000.0,
        wind_speed_kts: 15.0,
        wind_direction_deg: 90.0,
        wind_gusts_kts: 20.0,
    }
}

fn calm_marine() -> MarineSnapshot {
    MarineSnapshot {
        wave_height_ft: 2.0,
        wave_direction_deg: 180.0,
        wave_period_s: 7.0,
        wind_wave_height_ft: 1.0,
        swell_wave_height_ft: 1.5,
        current_velocity_kts: 0.5,
        current_direction_deg: 90.0,
    }
}

fn ocean_bathymetry(depth_ft: f64) -> BathymetryRecord {
    BathymetryRecord {
        depth_m: depth_ft / crate::api::M_TO_FT,
        depth_ft,
        is_ocean: true,
        estimated: false,
        source: "OpenTopoData GEBCO2020".to_string(),
    }
}

fn point(distance_from_center_nm: f64, distance_from_target_nm: Option<f64>) -> EnrichedPoint {
    EnrichedPoint {
        lat: 11.68,
        lon: 92.55,
        weather: calm_weather(),
        marine: Some(calm_marine()),
        bathymetry: ocean_bathymetry(120.0),
        distance_from_center_nm,
        distance_from_target_nm,
    }
}

#[test]
fn test_mission_weights_sum_to_one() {
    for mission in Mission::ALL {
        let w = MissionWeights::for_mission(mission);
        let sum = w.weather + w.sea_state + w.depth + w.flight_ops + w.fire_support + w.distance;
        assert!(
            (sum - 1.0).abs() < 1e-9,
            "{:?} weights sum to {}",
            mission,
            sum
        );
    }
}

#[test]
fn test_weather_score_known_value() {
    // 100 - (15/25)*30 - (40/75)*20 + 10 = 81.333...
    let scorer = MissionScorer::new(&inputs_with(Mission::AmphibiousLanding, vec![]), false);
    let score = scorer.score_weather(&calm_weather());
    assert!((score - 81.0 - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_weather_wind_limit_is_a_hard_gate() {
    let scorer = MissionScorer::new(&inputs_with(Mission::AmphibiousLanding, vec![]), false);

    let mut at_limit = calm_weather();
    at_limit.wind_speed_kts = 25.0;
    assert!(scorer.score_weather(&at_limit) > 0.0);

    let mut over_limit = calm_weather();
    over_limit.wind_speed_kts = 25.1;
    assert_eq!(scorer.score_weather(&over_limit), 0.0);
}

#[test]
fn test_weather_visibility_floor_is_a_hard_gate() {
    let scorer = MissionScorer::new(&inputs_with(Mission::AmphibiousLanding, vec![]), false);
    let mut weather = calm_weather();
    weather.visibility_m = 4999.0;
    assert_eq!(scorer.score_weather(&weather), 0.0);
}

#[test]
fn test_weather_heavy_cloud_penalized_not_disqualified() {
    let scorer = MissionScorer::new(&inputs_with(Mission::AmphibiousLanding, vec![]), false);
    let mut weather = calm_weather();
    weather.cloud_cover_pct = 90.0;
    // 100 - 18 - 40 + 10 = 52
    assert!((scorer.score_weather(&weather) - 52.0).abs() < 1e-9);
}

#[test]
fn test_sea_state_neutral_without_marine_data() {
    let scorer = MissionScorer::new(&inputs_with(Mission::AmphibiousLanding, vec![]), false);
    assert_eq!(scorer.score_sea_state(None), 50.0);
}

#[test]
fn test_sea_state_wave_limit_is_a_hard_gate() {
    let scorer = MissionScorer::new(&inputs_with(Mission::AmphibiousLanding, vec![]), false);
    let mut marine = calm_marine();
    marine.wave_height_ft = 6.5;
    assert_eq!(scorer.score_sea_state(Some(&marine)), 0.0);
}

#[test]
fn test_sea_state_swell_and_current_penalties() {
    let scorer = MissionScorer::new(&inputs_with(Mission::AmphibiousLanding, vec![]), false);
    let mut marine = calm_marine();
    marine.wave_height_ft = 3.0;
    marine.swell_wave_height_ft = 4.0;
    marine.current_velocity_kts = 2.5;
    // 100 - (3/6)*40 - 10 - 15 = 55
    assert!((scorer.score_sea_state(Some(&marine)) - 55.0).abs() < 1e-9);
}

#[test]
fn test_depth_requires_deepest_draft_vessel() {
    // LHA/LHD needs 65 ft; 40 ft of water fails the whole formation.
    let scorer = MissionScorer::new(
        &inputs_with(Mission::AmphibiousLanding, vessel_presets()),
        false,
    );
    assert_eq!(scorer.score_depth(Some(&ocean_bathymetry(40.0))), 0.0);
    assert_eq!(scorer.score_depth(Some(&ocean_bathymetry(65.0))), 100.0);
}

#[test]
fn test_depth_bands() {
    let scorer = MissionScorer::new(&inputs_with(Mission::AmphibiousLanding, vec![]), false);
    assert_eq!(scorer.score_depth(None), 50.0);
    assert_eq!(scorer.score_depth(Some(&ocean_bathymetry(150.0))), 100.0);
    assert_eq!(scorer.score_depth(Some(&ocean_bathymetry(400.0))), 80.0);
    assert_eq!(scorer.score_depth(Some(&ocean_bathymetry(10.0))), 0.0);

    let mut land = ocean_bathymetry(0.0);
    land.is_ocean = false;
    assert_eq!(scorer.score_depth(Some(&land)), 0.0);
}

#[test]
fn test_flight_ops_requires_flight_deck_and_data() {
    let no_deck = MissionScorer::new(&inputs_with(Mission::FlightOperations, vec![]), false);
    assert_eq!(no_deck.score_flight_ops(&calm_weather(), Some(&calm_marine())), 0.0);

    let with_deck = MissionScorer::new(
        &inputs_with(Mission::FlightOperations, vessel_presets()),
        false,
    );
    assert_eq!(with_deck.score_flight_ops(&calm_weather(), None), 0.0);
    assert_eq!(
        with_deck.score_flight_ops(&calm_weather(), Some(&calm_marine())),
        100.0
    );
}

#[test]
fn test_flight_ops_gates_and_penalties() {
    let scorer = MissionScorer::new(
        &inputs_with(Mission::FlightOperations, vessel_presets()),
        false,
    );

    let mut gale = calm_weather();
    gale.wind_speed_kts = 36.0;
    assert_eq!(scorer.score_flight_ops(&gale, Some(&calm_marine())), 0.0);

    let mut fog = calm_weather();
    fog.visibility_m = 2500.0;
    assert_eq!(scorer.score_flight_ops(&fog, Some(&calm_marine())), 0.0);

    let mut light_air = calm_weather();
    light_air.wind_speed_kts = 5.0;
    assert_eq!(
        scorer.score_flight_ops(&light_air, Some(&calm_marine())),
        80.0
    );
}

#[test]
fn test_fire_support_range_bands() {
    // DDG carries the 5" gun, 13 nm planning range.
    let ddg = vessel_presets().remove(3);
    let scorer = MissionScorer::new(&inputs_with(Mission::NavalGunfireSupport, vec![ddg]), true);

    assert_eq!(scorer.score_fire_support(&point(10.0, Some(9.0))), 100.0);
    assert_eq!(scorer.score_fire_support(&point(10.0, Some(12.0))), 80.0);
    assert_eq!(scorer.score_fire_support(&point(10.0, Some(14.0))), 0.0);
}

#[test]
fn test_fire_support_without_gun_or_target() {
    let no_gun = MissionScorer::new(
        &inputs_with(Mission::NavalGunfireSupport, vec![]),
        true,
    );
    assert_eq!(no_gun.score_fire_support(&point(10.0, Some(5.0))), 0.0);

    let ddg = vessel_presets().remove(3);
    let no_target =
        MissionScorer::new(&inputs_with(Mission::NavalGunfireSupport, vec![ddg]), false);
    assert_eq!(no_target.score_fire_support(&point(10.0, None)), 70.0);
}

#[test]
fn test_fire_support_shallow_water_penalty() {
    let ddg = vessel_presets().remove(3);
    let scorer = MissionScorer::new(&inputs_with(Mission::NavalGunfireSupport, vec![ddg]), true);
    let mut p = point(10.0, Some(9.0));
    p.bathymetry = ocean_bathymetry(25.0);
    assert_eq!(scorer.score_fire_support(&p), 60.0);
}

#[test]
fn test_distance_constraints() {
    let scorer = MissionScorer::new(&inputs_with(Mission::AmphibiousLanding, vec![]), false);
    assert_eq!(scorer.score_distance_constraints(&point(10.0, None)), 100.0);
    assert_eq!(scorer.score_distance_constraints(&point(3.0, None)), 20.0);
    assert_eq!(scorer.score_distance_constraints(&point(60.0, None)), 20.0);
}

#[test]
fn test_breakdown_rounds_to_one_decimal() {
    let scorer = MissionScorer::new(&inputs_with(Mission::AmphibiousLanding, vec![]), false);
    let breakdown = scorer.breakdown(&point(10.0, None));
    assert!((breakdown.weather - 81.3).abs() < 1e-9);
    for value in [
        breakdown.overall,
        breakdown.weather,
        breakdown.sea_state,
        breakdown.depth,
        breakdown.flight_ops,
        breakdown.fire_support,
        breakdown.distance,
    ] {
        assert!(((value * 10.0).round() / 10.0 - value).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&value));
    }
}

#[test]
fn test_score_all_sorts_best_first() {
    let scorer = MissionScorer::new(
        &inputs_with(Mission::AmphibiousLanding, vessel_presets()),
        false,
    );
    let mut shallow = point(10.0, None);
    shallow.bathymetry = ocean_bathymetry(40.0);
    let points = vec![shallow, point(10.0, None), point(3.0, None)];

    let scored = scorer.score_all(&points);
    assert_eq!(scored.len(), 3);
    for pair in scored.windows(2) {
        assert!(pair[0].scores.overall >= pair[1].scores.overall);
    }
    // The well-placed deep point wins.
    assert!((scored[0].distance_from_center_nm - 10.0).abs() < 1e-9);
    assert!(scored[0].bathymetry.depth_ft > 100.0);
}

#[test]
fn test_analyze_builds_report_envelope() {
    let inputs = inputs_with(Mission::AmphibiousLanding, vessel_presets());
    let collection = CollectionResult {
        center: crate::api::ResolvedLocation {
            lat: 11.6808,
            lon: 92.5566,
            name: "Custom Location (11.6808, 92.5566)".to_string(),
        },
        target: None,
        grid_points: vec![],
        analyzed_points: vec![point(10.0, None), point(3.0, None)],
        astronomical: None,
        metadata: crate::api::RunMetadata {
            collected_at: chrono::Utc::now(),
            points_total: 2,
            points_ocean: 2,
            points_land: 0,
            bathymetry_sources: Default::default(),
        },
    };

    let report = analyze(&inputs, &collection);
    assert_eq!(report.scored_locations.len(), 2);
    assert_eq!(report.metadata.mission, Mission::AmphibiousLanding);
    assert_eq!(report.metadata.vessels.len(), 5);
    assert_eq!(report.metadata.vessels[0], "LHA/LHD");
}
