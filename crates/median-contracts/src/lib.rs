//! # median-contracts
//!
//! Shared record types, enums, and errors for the Median mock-data service
//! and map simulator.
//!
//! All crates in the workspace import from here. No generation or simulation
//! logic lives in this crate; only data definitions, labels, and error types.

pub mod batch;
pub mod case_study;
pub mod compliance;
pub mod error;
pub mod label;
pub mod medication;
pub mod medula;
pub mod prescription;
pub mod simulation;

#[cfg(test)]
mod tests {
    use super::*;
    use batch::BatchSize;
    use error::MedianError;
    use label::Labeled;
    use medication::{DeaSchedule, FormularyStatus, Route};
    use prescription::{Dosing, PharmacyStats, PrescriptionStatus};
    use simulation::{
        GeoPoint, Incident, IncidentKind, MapPoint, Navigation, Road, SimulationState,
        TrafficDensity, Weather,
    };

    // ── Labels ───────────────────────────────────────────────────────────────

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("non-preferred".parse::<FormularyStatus>().unwrap(), FormularyStatus::NonPreferred);
        assert_eq!("  iv ".parse::<Route>().unwrap(), Route::Iv);
        assert_eq!("fog".parse::<Weather>().unwrap(), Weather::Fog);
        assert_eq!("Non-Controlled".parse::<DeaSchedule>().unwrap(), DeaSchedule::NonControlled);
    }

    #[test]
    fn unknown_label_reports_kind_and_value() {
        let err = "Shipped".parse::<PrescriptionStatus>().unwrap_err();
        match err {
            MedianError::UnknownFilter { ref kind, ref value } => {
                assert_eq!(kind, "prescription status");
                assert_eq!(value, "Shipped");
            }
            other => panic!("expected UnknownFilter, got {:?}", other),
        }
        assert!(err.to_string().contains("unknown prescription status 'Shipped'"));
    }

    #[test]
    fn every_label_round_trips_through_from_str() {
        for status in PrescriptionStatus::ALL {
            assert_eq!(status.to_string().parse::<PrescriptionStatus>().unwrap(), *status);
        }
        for route in Route::ALL {
            assert_eq!(route.to_string().parse::<Route>().unwrap(), *route);
        }
    }

    #[test]
    fn serde_names_match_display_labels() {
        let json = serde_json::to_string(&FormularyStatus::NonPreferred).unwrap();
        assert_eq!(json, "\"Non-Preferred\"");
        let json = serde_json::to_string(&DeaSchedule::II).unwrap();
        assert_eq!(json, "\"II\"");
        let json = serde_json::to_string(&TrafficDensity::Blocked).unwrap();
        assert_eq!(json, "\"BLOCKED\"");
        let json = serde_json::to_string(&simulation::NavAction::UTurn).unwrap();
        assert_eq!(json, "\"UTURN\"");
    }

    // ── BatchSize ────────────────────────────────────────────────────────────

    #[test]
    fn batch_size_rejects_negative_counts() {
        assert_eq!(BatchSize::from_signed(0).unwrap().get(), 0);
        assert_eq!(BatchSize::from_signed(150).unwrap().get(), 150);

        let err = BatchSize::from_signed(-3).unwrap_err();
        assert!(matches!(err, MedianError::InvalidCount { requested: -3 }));
        assert!(err.to_string().contains("-3"));
    }

    // ── Dosing / stats ───────────────────────────────────────────────────────

    #[test]
    fn dosing_quantity_is_product_of_factors() {
        let dosing = Dosing::new(3, 2);
        assert_eq!(dosing.daily_units(), Some(6));
        assert_eq!(dosing.quantity_for(30), Some(180));
    }

    #[test]
    fn dosing_overflow_yields_none() {
        assert_eq!(Dosing::new(100_000, 100_000).daily_units(), None);
        assert_eq!(Dosing::new(1_000, 1_000).quantity_for(90_000), None);
        assert_eq!(Dosing::new(0, u32::MAX).quantity_for(u32::MAX), Some(0));
    }

    #[test]
    fn pharmacy_stats_count_matches_recorded_status() {
        let mut stats = PharmacyStats::default();
        stats.record_status(PrescriptionStatus::Hold);
        stats.record_status(PrescriptionStatus::Hold);
        stats.record_status(PrescriptionStatus::Verified);
        assert_eq!(stats.count(PrescriptionStatus::Hold), 2);
        assert_eq!(stats.count(PrescriptionStatus::Verified), 1);
        assert_eq!(stats.count(PrescriptionStatus::Pending), 0);
    }

    // ── Simulation state ─────────────────────────────────────────────────────

    #[test]
    fn incident_road_reads_blocked_other_road_reads_sample() {
        let mut state = SimulationState::new(8, GeoPoint { lat: 0.0, lon: 0.0 });
        state.sampled.set(Road::Main, TrafficDensity::Heavy);
        state.sampled.set(Road::Cross, TrafficDensity::Low);
        state.incident = Some(Incident {
            road: Road::Cross,
            kind: IncidentKind::Work,
            started_at_ms: 0,
            clears_at_ms: 15_000,
        });

        assert_eq!(state.density(Road::Main), TrafficDensity::Heavy);
        assert_eq!(state.density(Road::Cross), TrafficDensity::Blocked);

        state.incident = None;
        assert_eq!(state.density(Road::Cross), TrafficDensity::Low);
    }

    #[test]
    fn start_hour_wraps_into_day() {
        let state = SimulationState::new(25, GeoPoint { lat: 0.0, lon: 0.0 });
        assert_eq!(state.hour, 1);
    }

    #[test]
    fn map_bounds_are_inclusive() {
        assert!(MapPoint::new(0.0, 100.0).is_on_map());
        assert!(!MapPoint::new(-0.1, 50.0).is_on_map());
        assert!(!MapPoint::new(50.0, 100.5).is_on_map());
    }

    #[test]
    fn navigation_accessors() {
        let nav = Navigation::Calculating { destination: MapPoint::new(1.0, 2.0), ready_at_ms: 800 };
        assert!(nav.is_calculating());
        assert_eq!(nav.destination(), Some(MapPoint::new(1.0, 2.0)));
        assert!(nav.steps().is_empty());
        assert_eq!(Navigation::Idle.destination(), None);
    }
}
