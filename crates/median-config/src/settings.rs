//! Configuration schema.
//!
//! A `MedianConfig` is deserialized from TOML. Every key has a default, so
//! an empty document yields the stock demo configuration.
//!
//! Example:
//! ```toml
//! [generator]
//! seed = 7
//! prescription_count = 150
//! today = "2026-10-19"
//!
//! [simulation]
//! start_hour = 5
//! tick_ms = 8000
//! incident_probability = 0.15
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use median_contracts::batch::BatchSize;

/// Upper bound on every simulator interval: one day of simulated time.
pub const MAX_INTERVAL_MS: u64 = 86_400_000;

/// Settings for the clinical record generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// User seed from which every domain seed stream is derived.
    pub seed: u64,
    pub prescription_count: BatchSize,
    pub provision_count: BatchSize,
    pub ai_model_count: BatchSize,
    /// Reference date for generated dates. Left unset, binaries use the
    /// current UTC date.
    pub today: Option<NaiveDate>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            prescription_count: BatchSize::new(100),
            provision_count: BatchSize::new(24),
            ai_model_count: BatchSize::new(12),
            today: None,
        }
    }
}

/// Timing and probability knobs for the map simulator.
///
/// Durations are simulated milliseconds. The weather schedule and rush-hour
/// windows are fixed in the simulator and deliberately absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub seed: u64,
    /// Hour of day the simulated clock starts at, 0 to 23.
    pub start_hour: u8,
    /// Interval between clock ticks; each tick advances one simulated hour.
    pub tick_ms: u64,
    /// Interval between POI spawn rolls.
    pub poi_interval_ms: u64,
    /// Lifetime of a spawned POI.
    pub poi_dwell_ms: u64,
    /// Lifetime of an incident.
    pub incident_lifetime_ms: u64,
    /// Delay between a route request and the synthesized route.
    pub route_latency_ms: u64,
    /// Maximum number of live POIs.
    pub poi_cap: usize,
    /// Chance per tick that an incident starts when none is active.
    pub incident_probability: f64,
    /// Share of incidents that are accidents; the rest are road works.
    pub accident_share: f64,
    /// Chance per roll that a POI spawns while under the cap.
    pub poi_spawn_probability: f64,
    /// Chance of HEAVY (else MODERATE) during rush hours.
    pub rush_heavy_probability: f64,
    /// Chance of MODERATE (else LOW) outside rush hours.
    pub off_peak_moderate_probability: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            start_hour: 8,
            tick_ms: 8_000,
            poi_interval_ms: 2_000,
            poi_dwell_ms: 6_000,
            incident_lifetime_ms: 15_000,
            route_latency_ms: 800,
            poi_cap: 4,
            incident_probability: 0.15,
            accident_share: 0.30,
            poi_spawn_probability: 0.40,
            rush_heavy_probability: 0.80,
            off_peak_moderate_probability: 0.40,
        }
    }
}

/// The top-level structure deserialized from a TOML config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedianConfig {
    pub generator: GeneratorSettings,
    pub simulation: SimulationSettings,
}
