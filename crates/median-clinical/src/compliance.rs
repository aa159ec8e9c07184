//! FDA AI-model compliance registry generator.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use tracing::info;

use median_contracts::{
    compliance::{AiModelRecord, ComplianceStats, ComplianceStatus, DeviceClass, RegulatoryPathway},
    label::Labeled,
};

use crate::mock_data::{date_within, pick, uuid_from, AI_MODEL_STEMS, AI_VENDORS};

/// Validation metric range shared by sensitivity and specificity.
pub const METRIC_RANGE: std::ops::RangeInclusive<f64> = 0.80..=0.99;

/// Clearance dates fall within this many days before today.
const CLEARANCE_WINDOW_DAYS: i64 = 5 * 365;

/// Audits happen at most this many days ago.
const AUDIT_WINDOW_DAYS: i64 = 180;

const MAX_OPEN_FINDINGS: u32 = 4;

/// Generate `count` registry records as of `today`.
pub fn generate_ai_model_records<R: Rng + ?Sized>(rng: &mut R, count: usize, today: NaiveDate) -> Vec<AiModelRecord> {
    let records: Vec<AiModelRecord> = (0..count).map(|_| generate_one(rng, today)).collect();
    info!(count = records.len(), %today, "AI model registry generated");
    records
}

fn generate_one<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> AiModelRecord {
    let (stem, specialty) = AI_MODEL_STEMS[rng.gen_range(0..AI_MODEL_STEMS.len())];
    let version = rng.gen_range(1..=4);

    let device_class = DeviceClass::ALL[rng.gen_range(0..DeviceClass::ALL.len())];
    let pathway = match device_class {
        DeviceClass::III => RegulatoryPathway::Pma,
        DeviceClass::I | DeviceClass::II => {
            if rng.gen_bool(0.5) {
                RegulatoryPathway::Clearance510k
            } else {
                RegulatoryPathway::DeNovo
            }
        }
    };

    let status = ComplianceStatus::ALL[rng.gen_range(0..ComplianceStatus::ALL.len())];
    let clearance_date = status
        .has_clearance()
        .then(|| today - Duration::days(rng.gen_range(30..CLEARANCE_WINDOW_DAYS)));

    // Two decimals, as reported on validation summaries.
    let metric = |rng: &mut R| (rng.gen_range(METRIC_RANGE) * 100.0).round() / 100.0;
    let sensitivity = metric(rng);
    let specificity = metric(rng);

    AiModelRecord {
        id: uuid_from(rng),
        name: format!("{} v{}", stem, version),
        vendor: pick(rng, AI_VENDORS).to_string(),
        specialty: specialty.to_string(),
        device_class,
        pathway,
        status,
        clearance_date,
        sensitivity,
        specificity,
        last_audit: date_within(rng, today, AUDIT_WINDOW_DAYS),
        open_findings: rng.gen_range(0..=MAX_OPEN_FINDINGS),
    }
}

/// Registry counts by status, mean sensitivity, and models with findings.
pub fn calculate_compliance_stats(records: &[AiModelRecord]) -> ComplianceStats {
    let mut stats = ComplianceStats {
        total: records.len(),
        ..ComplianceStats::default()
    };
    for r in records {
        match r.status {
            ComplianceStatus::Cleared => stats.cleared += 1,
            ComplianceStatus::UnderReview => stats.under_review += 1,
            ComplianceStatus::PostMarketMonitoring => stats.post_market += 1,
            ComplianceStatus::Recalled => stats.recalled += 1,
        }
        if r.open_findings > 0 {
            stats.models_with_findings += 1;
        }
    }
    if !records.is_empty() {
        stats.average_sensitivity = records.iter().map(|r| r.sensitivity).sum::<f64>() / records.len() as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn registry(count: usize) -> Vec<AiModelRecord> {
        let mut rng = StdRng::seed_from_u64(12);
        generate_ai_model_records(&mut rng, count, today())
    }

    #[test]
    fn class_iii_always_uses_pma() {
        for r in registry(300) {
            if r.device_class == DeviceClass::III {
                assert_eq!(r.pathway, RegulatoryPathway::Pma);
            } else {
                assert_ne!(r.pathway, RegulatoryPathway::Pma);
            }
        }
    }

    #[test]
    fn clearance_date_iff_cleared_or_monitored() {
        for r in registry(300) {
            assert_eq!(r.clearance_date.is_some(), r.status.has_clearance());
            if let Some(d) = r.clearance_date {
                assert!(d < today());
            }
        }
    }

    #[test]
    fn metrics_and_audit_dates_in_range() {
        for r in registry(300) {
            assert!(METRIC_RANGE.contains(&r.sensitivity), "sensitivity {}", r.sensitivity);
            assert!(METRIC_RANGE.contains(&r.specificity), "specificity {}", r.specificity);
            assert!(r.last_audit <= today());
            assert!(r.open_findings <= MAX_OPEN_FINDINGS);
        }
    }

    #[test]
    fn stats_add_up() {
        let list = registry(60);
        let stats = calculate_compliance_stats(&list);
        assert_eq!(stats.total, 60);
        assert_eq!(stats.cleared + stats.under_review + stats.post_market + stats.recalled, 60);
        assert_eq!(stats.models_with_findings, list.iter().filter(|r| r.open_findings > 0).count());
        assert!(METRIC_RANGE.contains(&stats.average_sensitivity));
    }

    #[test]
    fn empty_registry_has_zero_average() {
        let stats = calculate_compliance_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_sensitivity, 0.0);
    }
}
