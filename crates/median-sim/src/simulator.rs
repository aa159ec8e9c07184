//! The simulation driver: a virtual timer set over [`engine::transition`].
//!
//! Nothing here reads the wall clock. The host feeds elapsed time into
//! [`Simulator::advance`] and every timer due in that window fires in
//! due-time order, ties broken by [`SimEvent`] order. Each fired event may
//! schedule follow-ups (the next tick, an incident's clear time, a POI's
//! expiry), which fire in the same call if they are due too.
//!
//! One call fires at most [`MAX_EVENTS_PER_ADVANCE`] events. A window that
//! holds more stops at the last fired event and the remainder is dropped.
//! A periodic timer whose next deadline would pass `u64::MAX` is not
//! rescheduled.
//!
//! [`engine::transition`]: crate::engine::transition

use std::collections::BTreeSet;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

use median_config::SimulationSettings;
use median_contracts::{
    error::{MedianError, MedianResult},
    simulation::{MapPoint, Navigation, SimulationState},
};

use crate::{
    engine::{transition, SimEvent},
    geo::{locate_or_fallback, GeoLocator},
};

/// Events fired by a single [`Simulator::advance`] call at most.
pub const MAX_EVENTS_PER_ADVANCE: usize = 100_000;

/// A pending timer. Ordered by due time, then by event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timer {
    pub due_ms: u64,
    pub event: SimEvent,
}

/// Owns the simulation state, its settings, RNG, and pending timers.
pub struct Simulator {
    state: SimulationState,
    settings: SimulationSettings,
    rng: StdRng,
    timers: BTreeSet<Timer>,
}

impl Simulator {
    /// Start a simulator seeded from `settings.seed`.
    ///
    /// The start position comes from `locator`; when it fails, the
    /// Istanbul fallback is used. Settings are validated first.
    pub fn start(settings: SimulationSettings, locator: &dyn GeoLocator) -> MedianResult<Self> {
        let rng = StdRng::seed_from_u64(settings.seed);
        Self::with_rng(settings, rng, locator)
    }

    /// Start a simulator drawing from `rng`, e.g. a per-domain seed stream.
    pub fn with_rng(settings: SimulationSettings, rng: StdRng, locator: &dyn GeoLocator) -> MedianResult<Self> {
        settings.validate()?;

        let position = locate_or_fallback(locator);
        let state = SimulationState::new(settings.start_hour, position);

        let mut timers = BTreeSet::new();
        timers.insert(Timer { due_ms: settings.tick_ms, event: SimEvent::ClockTick });
        timers.insert(Timer { due_ms: settings.poi_interval_ms, event: SimEvent::PoiRoll });

        info!(
            start_hour = state.hour,
            lat = position.lat,
            lon = position.lon,
            tick_ms = settings.tick_ms,
            "simulator started"
        );

        Ok(Self { state, settings, rng, timers })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Number of timers still scheduled.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the earliest pending timer.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.first().map(|t| t.due_ms)
    }

    /// Advance simulated time by `elapsed_ms`, firing every timer due in the
    /// window. Returns the fired events in order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<SimEvent> {
        let target = self.state.now_ms.saturating_add(elapsed_ms);
        let mut fired = Vec::new();

        while let Some(timer) = self.timers.first().copied() {
            if timer.due_ms > target {
                break;
            }
            if fired.len() == MAX_EVENTS_PER_ADVANCE {
                warn!(
                    now_ms = self.state.now_ms,
                    target_ms = target,
                    "advance window truncated at the event limit"
                );
                return fired;
            }
            self.timers.remove(&timer);
            self.state.now_ms = timer.due_ms;
            self.fire(timer.event);
            fired.push(timer.event);
        }

        self.state.now_ms = target;
        fired
    }

    /// Advance by `ticks` whole clock intervals.
    pub fn advance_ticks(&mut self, ticks: u64) -> Vec<SimEvent> {
        self.advance(ticks.saturating_mul(self.settings.tick_ms))
    }

    fn fire(&mut self, event: SimEvent) {
        let before = &self.state;
        let had_incident = before.incident.is_some();
        let next_poi_id = before.next_poi_id;

        let next = transition(before, event, &mut self.rng, &self.settings);
        let now = next.now_ms;

        match event {
            SimEvent::ClockTick => {
                self.schedule_after(now, self.settings.tick_ms, SimEvent::ClockTick);
                if let (false, Some(incident)) = (had_incident, next.incident) {
                    self.schedule(incident.clears_at_ms, SimEvent::IncidentCleared);
                }
            }
            SimEvent::PoiRoll => {
                self.schedule_after(now, self.settings.poi_interval_ms, SimEvent::PoiRoll);
                for poi in next.pois.iter().filter(|p| p.id >= next_poi_id) {
                    self.schedule(poi.expires_at_ms, SimEvent::PoiExpired(poi.id));
                }
            }
            SimEvent::IncidentCleared | SimEvent::PoiExpired(_) | SimEvent::RouteReady => {}
        }

        self.state = next;
    }

    fn schedule(&mut self, due_ms: u64, event: SimEvent) {
        self.timers.insert(Timer { due_ms, event });
    }

    fn schedule_after(&mut self, now: u64, interval_ms: u64, event: SimEvent) {
        match now.checked_add(interval_ms) {
            Some(due_ms) => self.schedule(due_ms, event),
            None => warn!(?event, now_ms = now, "timer deadline out of range; not rescheduled"),
        }
    }

    fn drop_route_timer(&mut self) {
        self.timers.retain(|t| t.event != SimEvent::RouteReady);
    }

    /// Request a route to `destination`.
    ///
    /// The route becomes available `route_latency_ms` later. A new request
    /// replaces any pending one.
    ///
    /// # Errors
    ///
    /// `MedianError::Simulation` when `destination` lies outside the map.
    pub fn request_route(&mut self, destination: MapPoint) -> MedianResult<()> {
        if !destination.is_on_map() {
            return Err(MedianError::Simulation {
                reason: format!("destination ({}, {}) is outside the map", destination.x, destination.y),
            });
        }

        self.drop_route_timer();
        let ready_at_ms = self.state.now_ms.saturating_add(self.settings.route_latency_ms);
        self.state.navigation = Navigation::Calculating { destination, ready_at_ms };
        self.schedule(ready_at_ms, SimEvent::RouteReady);

        debug!(x = destination.x, y = destination.y, ready_at_ms, "route requested");
        Ok(())
    }

    /// Clear the destination, any route, and a pending route computation.
    pub fn cancel_route(&mut self) {
        self.drop_route_timer();
        if self.state.navigation != Navigation::Idle {
            debug!("route cancelled");
        }
        self.state.navigation = Navigation::Idle;
    }

    /// Stop the simulator, clearing every pending timer, and return the
    /// final state.
    pub fn teardown(mut self) -> SimulationState {
        let cleared = self.timers.len();
        self.timers.clear();
        info!(cleared_timers = cleared, ticks = self.state.ticks, now_ms = self.state.now_ms, "simulator stopped");
        self.state
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
