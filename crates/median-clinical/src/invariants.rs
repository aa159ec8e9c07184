//! Consistency checks over a generated prescription batch.
//!
//! Each rule is evaluated against every record and all failures are
//! collected before returning, so a tampered or imported batch shows its
//! full failure set in one report.

use std::collections::HashSet;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use median_contracts::{
    medication::{DeaSchedule, FormularyStatus},
    prescription::Prescription,
};

use crate::directions::parse_directions;

/// One violated rule, tied to the record it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantFailure {
    pub rule_id: String,
    pub message: String,
}

/// Result of [`check_prescription_batch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantReport {
    pub passed: bool,
    pub failures: Vec<InvariantFailure>,
}

impl InvariantReport {
    /// Failures raised by the rule `rule_id`.
    pub fn failures_for(&self, rule_id: &str) -> impl Iterator<Item = &InvariantFailure> + '_ {
        let rule_id = rule_id.to_string();
        self.failures.iter().filter(move |f| f.rule_id == rule_id)
    }
}

type Rule = fn(&Prescription) -> Option<String>;

const RECORD_RULES: &[(&str, Rule)] = &[
    ("quantity", check_quantity),
    ("directions-dosing", check_directions),
    ("prior-auth", check_prior_auth),
    ("schedule-ii-refills", check_schedule_ii),
    ("refills-remaining", check_refills_remaining),
    ("next-refill-date", check_next_refill),
];

fn check_quantity(rx: &Prescription) -> Option<String> {
    match rx.dosing.quantity_for(rx.days_supply) {
        Some(expected) => (rx.quantity != expected)
            .then(|| format!("quantity {} but dosing implies {}", rx.quantity, expected)),
        None => Some(format!(
            "dosing {}x{} over {} day(s) overflows the quantity range",
            rx.dosing.doses_per_day, rx.dosing.units_per_dose, rx.days_supply
        )),
    }
}

fn check_directions(rx: &Prescription) -> Option<String> {
    let parsed = parse_directions(&rx.directions);
    (parsed != rx.dosing).then(|| {
        format!(
            "directions '{}' read as {}x{} but record carries {}x{}",
            rx.directions,
            parsed.doses_per_day,
            parsed.units_per_dose,
            rx.dosing.doses_per_day,
            rx.dosing.units_per_dose
        )
    })
}

fn check_prior_auth(rx: &Prescription) -> Option<String> {
    let needs = rx.medication.formulary_status == FormularyStatus::NonPreferred;
    match (needs, rx.prior_auth.is_some()) {
        (true, false) => Some("Non-Preferred medication without prior authorization".to_string()),
        (false, true) => Some(format!(
            "prior authorization on a {} medication",
            rx.medication.formulary_status
        )),
        _ => None,
    }
}

fn check_schedule_ii(rx: &Prescription) -> Option<String> {
    (rx.medication.dea_schedule == DeaSchedule::II && rx.refills > 0)
        .then(|| format!("Schedule II medication with {} refills", rx.refills))
}

fn check_refills_remaining(rx: &Prescription) -> Option<String> {
    (rx.refills_remaining > rx.refills)
        .then(|| format!("{} refills remaining of {}", rx.refills_remaining, rx.refills))
}

fn check_next_refill(rx: &Prescription) -> Option<String> {
    let expected = (rx.refills > 0).then(|| rx.write_date + Duration::days(i64::from(rx.days_supply)));
    (rx.next_refill_date != expected).then(|| {
        format!(
            "next refill date {:?} but write date and days supply imply {:?}",
            rx.next_refill_date, expected
        )
    })
}

/// Check every record rule plus batch ordering and id uniqueness.
pub fn check_prescription_batch(prescriptions: &[Prescription]) -> InvariantReport {
    let mut failures = Vec::new();

    for rx in prescriptions {
        for (rule_id, rule) in RECORD_RULES {
            if let Some(detail) = rule(rx) {
                let message = format!("{}: {}", rx.rx_number, detail);
                warn!(rule_id, %message, "invariant failed");
                failures.push(InvariantFailure {
                    rule_id: rule_id.to_string(),
                    message,
                });
            }
        }
    }

    for pair in prescriptions.windows(2) {
        if pair[0].write_date < pair[1].write_date {
            failures.push(InvariantFailure {
                rule_id: "write-date-order".to_string(),
                message: format!(
                    "{} ({}) listed before newer {} ({})",
                    pair[0].rx_number, pair[0].write_date, pair[1].rx_number, pair[1].write_date
                ),
            });
        }
    }

    let mut seen = HashSet::new();
    for rx in prescriptions {
        if !seen.insert(rx.id) {
            failures.push(InvariantFailure {
                rule_id: "unique-id".to_string(),
                message: format!("duplicate id {}", rx.id),
            });
        }
    }

    let passed = failures.is_empty();
    debug!(records = prescriptions.len(), passed, failure_count = failures.len(), "batch check complete");
    InvariantReport { passed, failures }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::{rngs::StdRng, SeedableRng};

    use median_contracts::{
        medication::{DeaSchedule, FormularyStatus},
        prescription::Dosing,
    };

    use super::*;
    use crate::{formulary::Formulary, pharmacy::generate_prescriptions};

    fn batch(count: usize) -> Vec<Prescription> {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        generate_prescriptions(&mut rng, &Formulary::standard(), count, today)
    }

    #[test]
    fn generated_batch_passes() {
        let report = check_prescription_batch(&batch(300));
        assert!(report.passed, "unexpected failures: {:?}", report.failures);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn empty_batch_passes() {
        assert!(check_prescription_batch(&[]).passed);
    }

    #[test]
    fn tampered_quantity_is_reported() {
        let mut list = batch(5);
        list[2].quantity += 1;
        let report = check_prescription_batch(&list);
        assert!(!report.passed);
        assert_eq!(report.failures_for("quantity").count(), 1);
    }

    #[test]
    fn overflowing_dosing_is_reported_not_panicking() {
        let mut list = batch(3);
        list[0].dosing = Dosing::new(100_000, 100_000);
        let report = check_prescription_batch(&list);
        assert!(!report.passed);
        let quantity: Vec<_> = report.failures_for("quantity").collect();
        assert_eq!(quantity.len(), 1);
        assert!(quantity[0].message.contains("overflows"));
    }

    /// Several independent violations must all appear, not just the first.
    #[test]
    fn failures_accumulate_across_rules() {
        let mut list = batch(6);

        list[0].refills_remaining = list[0].refills + 1;
        list[1].medication.dea_schedule = DeaSchedule::II;
        list[1].refills = 2;
        list[1].refills_remaining = 0;
        list[3].medication.formulary_status = if list[3].prior_auth.is_some() {
            FormularyStatus::Preferred
        } else {
            FormularyStatus::NonPreferred
        };
        list.swap(4, 5);
        list[4].write_date = list[5].write_date - Duration::days(3);

        let report = check_prescription_batch(&list);
        assert!(!report.passed);
        assert!(report.failures_for("refills-remaining").count() >= 1);
        assert!(report.failures_for("schedule-ii-refills").count() >= 1);
        assert!(report.failures_for("prior-auth").count() >= 1);
        assert!(report.failures_for("write-date-order").count() >= 1);
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let mut list = batch(3);
        list[2].id = list[0].id;
        let report = check_prescription_batch(&list);
        assert_eq!(report.failures_for("unique-id").count(), 1);
    }

    #[test]
    fn edited_directions_are_reported() {
        let mut list = batch(1);
        list[0].directions = "Take 7 tablets by mouth four times daily".to_string();
        let report = check_prescription_batch(&list);
        assert_eq!(report.failures_for("directions-dosing").count(), 1);
    }
}
