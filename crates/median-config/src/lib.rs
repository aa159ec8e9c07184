//! # median-config
//!
//! TOML configuration for the Median record generators and map simulator.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use median_config::MedianConfig;
//!
//! let config = MedianConfig::from_file(Path::new("median.toml"))?;
//! let sim = median_sim::Simulator::start(config.simulation.clone(), &locator)?;
//! ```
//!
//! Every key is optional. Values outside their valid range are rejected at
//! load time rather than clamped.

pub mod loader;
pub mod settings;

pub use settings::{GeneratorSettings, MedianConfig, SimulationSettings, MAX_INTERVAL_MS};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use median_contracts::error::MedianError;

    use crate::{MedianConfig, MAX_INTERVAL_MS};

    fn expect_config_error(toml: &str, needle: &str) {
        match MedianConfig::from_toml_str(toml) {
            Err(MedianError::ConfigError { reason }) => {
                assert!(reason.contains(needle), "expected '{needle}' in reason, got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── 1. defaults ───────────────────────────────────────────────────────────

    /// An empty document is valid and yields the stock timings.
    #[test]
    fn test_empty_document_uses_defaults() {
        let config = MedianConfig::from_toml_str("").unwrap();

        assert_eq!(config, MedianConfig::default());
        assert_eq!(config.generator.prescription_count.get(), 100);
        assert_eq!(config.simulation.tick_ms, 8_000);
        assert_eq!(config.simulation.poi_interval_ms, 2_000);
        assert_eq!(config.simulation.poi_dwell_ms, 6_000);
        assert_eq!(config.simulation.incident_lifetime_ms, 15_000);
        assert_eq!(config.simulation.route_latency_ms, 800);
        assert_eq!(config.simulation.poi_cap, 4);
        assert!((config.simulation.incident_probability - 0.15).abs() < f64::EPSILON);
    }

    // ── 2. partial override ───────────────────────────────────────────────────

    /// Keys that are present override; the rest keep their defaults.
    #[test]
    fn test_partial_override() {
        let toml = r#"
            [generator]
            seed = 7
            prescription_count = 150
            today = "2026-10-19"

            [simulation]
            start_hour = 5
        "#;

        let config = MedianConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.generator.seed, 7);
        assert_eq!(config.generator.prescription_count.get(), 150);
        assert_eq!(config.generator.provision_count.get(), 24);
        assert_eq!(config.generator.today, NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(config.simulation.start_hour, 5);
        assert_eq!(config.simulation.tick_ms, 8_000);
    }

    // ── 3. validation ─────────────────────────────────────────────────────────

    #[test]
    fn test_start_hour_out_of_range_rejected() {
        expect_config_error("[simulation]\nstart_hour = 24", "simulation.start_hour");
    }

    #[test]
    fn test_zero_interval_rejected() {
        expect_config_error("[simulation]\ntick_ms = 0", "simulation.tick_ms");
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        expect_config_error(
            "[simulation]\npoi_spawn_probability = 1.5",
            "simulation.poi_spawn_probability",
        );
    }

    #[test]
    fn test_zero_poi_cap_rejected() {
        expect_config_error("[simulation]\npoi_cap = 0", "simulation.poi_cap");
    }

    /// A negative count gets the same error as a negative CLI flag.
    #[test]
    fn test_negative_count_rejected() {
        for key in ["prescription_count", "provision_count", "ai_model_count"] {
            let toml = format!("[generator]\n{} = -5", key);
            match MedianConfig::from_toml_str(&toml) {
                Err(MedianError::InvalidCount { requested }) => assert_eq!(requested, -5),
                other => panic!("expected InvalidCount for {key}, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_zero_count_accepted() {
        let config = MedianConfig::from_toml_str("[generator]\nai_model_count = 0").unwrap();
        assert_eq!(config.generator.ai_model_count.get(), 0);
    }

    #[test]
    fn test_interval_above_maximum_rejected() {
        expect_config_error(
            &format!("[simulation]\ntick_ms = {}", u64::MAX / 4),
            "simulation.tick_ms",
        );
        expect_config_error(
            &format!("[simulation]\nincident_lifetime_ms = {}", MAX_INTERVAL_MS + 1),
            "simulation.incident_lifetime_ms",
        );
        let at_limit = format!("[simulation]\npoi_dwell_ms = {}", MAX_INTERVAL_MS);
        assert!(MedianConfig::from_toml_str(&at_limit).is_ok());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        expect_config_error("[simulation\nseed = 1", "failed to parse config TOML");
    }

    // ── 4. file loading ───────────────────────────────────────────────────────

    #[test]
    fn test_missing_file_reports_path() {
        let path = std::path::Path::new("/nonexistent/median.toml");
        match MedianConfig::from_file(path) {
            Err(MedianError::ConfigError { reason }) => {
                assert!(reason.contains("/nonexistent/median.toml"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_with_seed_overrides_both_sections() {
        let config = MedianConfig::default().with_seed(99);
        assert_eq!(config.generator.seed, 99);
        assert_eq!(config.simulation.seed, 99);
    }
}
