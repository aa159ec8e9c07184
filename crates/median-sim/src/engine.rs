//! The simulation state machine.
//!
//! [`transition`] is the only place simulation state changes. It is a pure
//! function of the current state, one event, the RNG, and the settings; the
//! driver in [`crate::simulator`] decides when each event fires.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use median_config::SimulationSettings;
use median_contracts::{
    label::Labeled,
    simulation::{
        Incident, IncidentKind, MapPoint, Navigation, Poi, PoiKind, Road, SimulationState, TrafficDensity, Weather,
        MAP_EXTENT,
    },
};

use crate::navigation::synthesize_route;

/// Something that happens to the simulation at a point in simulated time.
///
/// Variant order is the tie-break order for events due at the same
/// millisecond: expiries first, then the route, then the clock, then spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SimEvent {
    IncidentCleared,
    PoiExpired(u64),
    RouteReady,
    ClockTick,
    PoiRoll,
}

// ── Fixed schedules ───────────────────────────────────────────────────────────

/// Weather the clock switches to on reaching `hour`, if any.
pub fn scheduled_weather(hour: u8) -> Option<Weather> {
    match hour {
        6 => Some(Weather::Fog),
        10 => Some(Weather::Rain),
        15 => Some(Weather::Clear),
        22 => Some(Weather::Rain),
        _ => None,
    }
}

/// Morning 07-09 and evening 16-19, both inclusive.
pub fn is_rush_hour(hour: u8) -> bool {
    matches!(hour, 7..=9 | 16..=19)
}

// ── Transition ────────────────────────────────────────────────────────────────

/// Apply `event` to `state` at `state.now_ms` and return the next state.
pub fn transition<R: Rng + ?Sized>(
    state: &SimulationState,
    event: SimEvent,
    rng: &mut R,
    settings: &SimulationSettings,
) -> SimulationState {
    let mut next = state.clone();
    match event {
        SimEvent::ClockTick => clock_tick(&mut next, rng, settings),
        SimEvent::PoiRoll => poi_roll(&mut next, rng, settings),
        SimEvent::IncidentCleared => {
            if let Some(incident) = next.incident.take() {
                info!(road = %incident.road, kind = %incident.kind, now_ms = next.now_ms, "incident cleared");
            }
        }
        SimEvent::PoiExpired(id) => {
            next.pois.retain(|p| p.id != id);
            debug!(poi_id = id, remaining = next.pois.len(), "poi expired");
        }
        SimEvent::RouteReady => {
            if let Navigation::Calculating { destination, .. } = next.navigation {
                let steps = synthesize_route(rng);
                debug!(steps = steps.len(), x = destination.x, y = destination.y, "route ready");
                next.navigation = Navigation::Routed { destination, steps };
            }
        }
    }
    next
}

fn clock_tick<R: Rng + ?Sized>(state: &mut SimulationState, rng: &mut R, settings: &SimulationSettings) {
    state.ticks += 1;
    state.hour = (state.hour + 1) % 24;

    if let Some(weather) = scheduled_weather(state.hour) {
        if weather != state.weather {
            info!(hour = state.hour, from = %state.weather, to = %weather, "weather changed");
        }
        state.weather = weather;
    }

    if state.incident.is_none() && rng.gen_bool(settings.incident_probability) {
        let road = Road::ALL[rng.gen_range(0..Road::ALL.len())];
        let kind = if rng.gen_bool(settings.accident_share) {
            IncidentKind::Accident
        } else {
            IncidentKind::Work
        };
        let incident = Incident {
            road,
            kind,
            started_at_ms: state.now_ms,
            clears_at_ms: state.now_ms.saturating_add(settings.incident_lifetime_ms),
        };
        info!(road = %road, kind = %kind, clears_at_ms = incident.clears_at_ms, "incident started");
        state.incident = Some(incident);
    }

    for road in Road::ALL {
        let density = sample_density(rng, state.hour, settings);
        state.sampled.set(*road, density);
    }

    debug!(
        hour = state.hour,
        weather = %state.weather,
        main = %state.density(Road::Main),
        cross = %state.density(Road::Cross),
        "clock tick"
    );
}

fn sample_density<R: Rng + ?Sized>(rng: &mut R, hour: u8, settings: &SimulationSettings) -> TrafficDensity {
    if is_rush_hour(hour) {
        if rng.gen_bool(settings.rush_heavy_probability) {
            TrafficDensity::Heavy
        } else {
            TrafficDensity::Moderate
        }
    } else if rng.gen_bool(settings.off_peak_moderate_probability) {
        TrafficDensity::Moderate
    } else {
        TrafficDensity::Low
    }
}

fn poi_roll<R: Rng + ?Sized>(state: &mut SimulationState, rng: &mut R, settings: &SimulationSettings) {
    if state.pois.len() >= settings.poi_cap || !rng.gen_bool(settings.poi_spawn_probability) {
        return;
    }

    let poi = Poi {
        id: state.next_poi_id,
        kind: PoiKind::ALL[rng.gen_range(0..PoiKind::ALL.len())],
        position: MapPoint::new(rng.gen_range(0.0..=MAP_EXTENT), rng.gen_range(0.0..=MAP_EXTENT)),
        spawned_at_ms: state.now_ms,
        expires_at_ms: state.now_ms.saturating_add(settings.poi_dwell_ms),
    };
    state.next_poi_id += 1;
    debug!(poi_id = poi.id, kind = %poi.kind, live = state.pois.len() + 1, "poi spawned");
    state.pois.push(poi);
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use median_contracts::simulation::{GeoPoint, MapPoint};

    use super::*;

    fn origin() -> GeoPoint {
        GeoPoint { lat: 0.0, lon: 0.0 }
    }

    fn tick(state: &SimulationState, rng: &mut StdRng, settings: &SimulationSettings) -> SimulationState {
        transition(state, SimEvent::ClockTick, rng, settings)
    }

    #[test]
    fn hour_advances_modulo_24() {
        let settings = SimulationSettings::default();
        let mut rng = StdRng::seed_from_u64(1);
        for start in 0..24u8 {
            let state = SimulationState::new(start, origin());
            assert_eq!(tick(&state, &mut rng, &settings).hour, (start + 1) % 24);
        }
    }

    #[test]
    fn weather_follows_schedule_and_holds_between() {
        let settings = SimulationSettings::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = SimulationState::new(0, origin());

        for _ in 0..48 {
            let before = state.weather;
            state = tick(&state, &mut rng, &settings);
            match scheduled_weather(state.hour) {
                Some(w) => assert_eq!(state.weather, w),
                None => assert_eq!(state.weather, before),
            }
        }
    }

    #[test]
    fn hour_five_to_six_brings_fog() {
        let settings = SimulationSettings::default();
        let mut rng = StdRng::seed_from_u64(3);
        let state = SimulationState::new(5, origin());
        let next = tick(&state, &mut rng, &settings);
        assert_eq!(next.hour, 6);
        assert_eq!(next.weather, Weather::Fog);
    }

    #[test]
    fn rush_hour_windows_are_inclusive() {
        for hour in [7, 8, 9, 16, 17, 18, 19] {
            assert!(is_rush_hour(hour), "{hour} should be rush hour");
        }
        for hour in [0, 6, 10, 15, 20, 23] {
            assert!(!is_rush_hour(hour), "{hour} should be off-peak");
        }
    }

    /// Densities are sampled for the hour the tick moves INTO.
    #[test]
    fn density_reads_the_new_hour() {
        let settings = SimulationSettings {
            rush_heavy_probability: 1.0,
            off_peak_moderate_probability: 0.0,
            incident_probability: 0.0,
            ..SimulationSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(4);

        let into_rush = tick(&SimulationState::new(6, origin()), &mut rng, &settings);
        assert_eq!(into_rush.sampled.main, TrafficDensity::Heavy);
        assert_eq!(into_rush.sampled.cross, TrafficDensity::Heavy);

        let out_of_rush = tick(&SimulationState::new(9, origin()), &mut rng, &settings);
        assert_eq!(out_of_rush.sampled.main, TrafficDensity::Low);
        assert_eq!(out_of_rush.sampled.cross, TrafficDensity::Low);
    }

    #[test]
    fn sampled_density_is_never_blocked() {
        let settings = SimulationSettings::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = SimulationState::new(0, origin());
        for _ in 0..200 {
            state = tick(&state, &mut rng, &settings);
            assert_ne!(state.sampled.main, TrafficDensity::Blocked);
            assert_ne!(state.sampled.cross, TrafficDensity::Blocked);
        }
    }

    #[test]
    fn incident_blocks_its_road_and_only_one_exists() {
        let settings = SimulationSettings {
            incident_probability: 1.0,
            ..SimulationSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(6);
        let mut state = SimulationState::new(12, origin());
        state.now_ms = 8_000;

        state = tick(&state, &mut rng, &settings);
        let incident = state.incident.expect("incident with probability 1");
        assert_eq!(incident.started_at_ms, 8_000);
        assert_eq!(incident.clears_at_ms, 8_000 + settings.incident_lifetime_ms);
        assert_eq!(state.density(incident.road), TrafficDensity::Blocked);

        state.now_ms = 16_000;
        state = tick(&state, &mut rng, &settings);
        assert_eq!(state.incident, Some(incident));

        let cleared = transition(&state, SimEvent::IncidentCleared, &mut rng, &settings);
        assert!(cleared.incident.is_none());
        assert_eq!(cleared.density(incident.road), state.sampled.get(incident.road));
    }

    #[test]
    fn poi_roll_respects_cap_and_bounds() {
        let settings = SimulationSettings {
            poi_spawn_probability: 1.0,
            ..SimulationSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = SimulationState::new(0, origin());

        for i in 0..10u64 {
            state.now_ms = i * settings.poi_interval_ms;
            state = transition(&state, SimEvent::PoiRoll, &mut rng, &settings);
            assert!(state.pois.len() <= settings.poi_cap);
        }
        assert_eq!(state.pois.len(), settings.poi_cap);
        for poi in &state.pois {
            assert!(poi.position.is_on_map());
            assert_eq!(poi.expires_at_ms, poi.spawned_at_ms + settings.poi_dwell_ms);
        }

        let id = state.pois[0].id;
        let after = transition(&state, SimEvent::PoiExpired(id), &mut rng, &settings);
        assert_eq!(after.pois.len(), settings.poi_cap - 1);
        assert!(after.pois.iter().all(|p| p.id != id));
    }

    #[test]
    fn route_ready_only_applies_while_calculating() {
        let settings = SimulationSettings::default();
        let mut rng = StdRng::seed_from_u64(8);
        let idle = SimulationState::new(0, origin());
        assert_eq!(transition(&idle, SimEvent::RouteReady, &mut rng, &settings).navigation, Navigation::Idle);

        let mut calculating = idle.clone();
        let destination = MapPoint::new(30.0, 70.0);
        calculating.navigation = Navigation::Calculating { destination, ready_at_ms: 800 };
        let routed = transition(&calculating, SimEvent::RouteReady, &mut rng, &settings);
        assert_eq!(routed.navigation.destination(), Some(destination));
        assert!(routed.navigation.steps().len() >= 3);
    }

    #[test]
    fn tie_order_follows_variant_order() {
        let mut events = vec![
            SimEvent::PoiRoll,
            SimEvent::ClockTick,
            SimEvent::RouteReady,
            SimEvent::PoiExpired(3),
            SimEvent::PoiExpired(1),
            SimEvent::IncidentCleared,
        ];
        events.sort();
        assert_eq!(
            events,
            vec![
                SimEvent::IncidentCleared,
                SimEvent::PoiExpired(1),
                SimEvent::PoiExpired(3),
                SimEvent::RouteReady,
                SimEvent::ClockTick,
                SimEvent::PoiRoll,
            ]
        );
    }
}
