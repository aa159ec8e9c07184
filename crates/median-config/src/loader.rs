//! Loading and validating `MedianConfig` from TOML.
//!
//! Loading is two steps:
//!
//! 1. Parse the document into `MedianConfig`; missing keys take defaults.
//!    Negative generator counts are rejected here with
//!    `MedianError::InvalidCount`, the same error a negative CLI flag gets.
//! 2. Validate ranges: probabilities in `[0, 1]`, intervals in
//!    `1..=MAX_INTERVAL_MS`, `start_hour < 24`, `poi_cap >= 1`.
//!
//! Every other failure is a `MedianError::ConfigError` whose reason names
//! the key.

use std::path::Path;

use tracing::{debug, warn};

use median_contracts::{
    batch::BatchSize,
    error::{MedianError, MedianResult},
};

use crate::settings::{MedianConfig, SimulationSettings, MAX_INTERVAL_MS};

/// `[generator]` keys holding a batch size.
const COUNT_KEYS: [&str; 3] = ["prescription_count", "provision_count", "ai_model_count"];

impl MedianConfig {
    /// Parse `s` as TOML and validate the result.
    pub fn from_toml_str(s: &str) -> MedianResult<Self> {
        let document: toml::Table = s.parse().map_err(parse_error)?;
        check_counts(&document)?;
        let config: MedianConfig = toml::Value::Table(document).try_into().map_err(parse_error)?;
        config.validate()?;
        debug!(
            generator_seed = config.generator.seed,
            simulation_seed = config.simulation.seed,
            start_hour = config.simulation.start_hour,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it with [`MedianConfig::from_toml_str`].
    pub fn from_file(path: &Path) -> MedianResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MedianError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check every range constraint. The first violation is returned.
    pub fn validate(&self) -> MedianResult<()> {
        self.simulation.validate()
    }

    /// Replace both seeds, e.g. from a `--seed` flag.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.generator.seed = seed;
        self.simulation.seed = seed;
        self
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> MedianResult<()> {
        if self.start_hour >= 24 {
            return Err(invalid("simulation.start_hour", format!("{} is not an hour of day (0-23)", self.start_hour)));
        }

        let intervals = [
            ("simulation.tick_ms", self.tick_ms),
            ("simulation.poi_interval_ms", self.poi_interval_ms),
            ("simulation.poi_dwell_ms", self.poi_dwell_ms),
            ("simulation.incident_lifetime_ms", self.incident_lifetime_ms),
            ("simulation.route_latency_ms", self.route_latency_ms),
        ];
        for (key, value) in intervals {
            if value == 0 {
                return Err(invalid(key, "interval must be greater than zero".to_string()));
            }
            if value > MAX_INTERVAL_MS {
                return Err(invalid(key, format!("{} exceeds the {} ms maximum", value, MAX_INTERVAL_MS)));
            }
        }

        if self.poi_cap == 0 {
            return Err(invalid("simulation.poi_cap", "cap must be at least 1".to_string()));
        }

        let probabilities = [
            ("simulation.incident_probability", self.incident_probability),
            ("simulation.accident_share", self.accident_share),
            ("simulation.poi_spawn_probability", self.poi_spawn_probability),
            ("simulation.rush_heavy_probability", self.rush_heavy_probability),
            ("simulation.off_peak_moderate_probability", self.off_peak_moderate_probability),
        ];
        for (key, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(key, format!("{} is not a probability in [0, 1]", value)));
            }
        }

        Ok(())
    }
}

fn parse_error(e: toml::de::Error) -> MedianError {
    MedianError::ConfigError {
        reason: format!("failed to parse config TOML: {}", e),
    }
}

/// Reject negative `[generator]` counts before typed deserialization folds
/// them into a generic parse error.
fn check_counts(document: &toml::Table) -> MedianResult<()> {
    let Some(generator) = document.get("generator").and_then(toml::Value::as_table) else {
        return Ok(());
    };
    for key in COUNT_KEYS {
        if let Some(requested) = generator.get(key).and_then(toml::Value::as_integer) {
            BatchSize::from_signed(requested).map_err(|e| {
                warn!(key = %format!("generator.{}", key), requested, "rejecting configuration");
                e
            })?;
        }
    }
    Ok(())
}

fn invalid(key: &str, detail: String) -> MedianError {
    warn!(key = %key, detail = %detail, "rejecting configuration");
    MedianError::ConfigError {
        reason: format!("invalid value for '{}': {}", key, detail),
    }
}
