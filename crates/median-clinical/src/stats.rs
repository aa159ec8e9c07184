//! Pharmacy dashboard aggregation and list filters.
//!
//! Everything here is a pure function of the slice it receives. Callers
//! recompute after any change to the slice; no result is cached.

use chrono::NaiveDate;
use tracing::debug;

use median_contracts::prescription::{PharmacyStats, Prescription, PrescriptionStatus, PriorAuthStatus};

/// Aggregate `prescriptions` as of `today`.
///
/// A refill counts as due when `next_refill_date <= today` and refills
/// remain.
pub fn calculate_pharmacy_stats(prescriptions: &[Prescription], today: NaiveDate) -> PharmacyStats {
    let mut stats = PharmacyStats {
        total_prescriptions: prescriptions.len(),
        ..PharmacyStats::default()
    };

    for rx in prescriptions {
        stats.record_status(rx.status);

        if matches!(&rx.prior_auth, Some(pa) if pa.status == PriorAuthStatus::Pending) {
            stats.prior_auth_needed += 1;
        }
        if rx.is_controlled() {
            stats.controlled_substances += 1;
        }
        let refill_due = rx.next_refill_date.is_some_and(|d| d <= today);
        if refill_due && rx.refills_remaining > 0 {
            stats.refills_due += 1;
        }
    }

    debug!(
        total = stats.total_prescriptions,
        prior_auth_needed = stats.prior_auth_needed,
        controlled = stats.controlled_substances,
        refills_due = stats.refills_due,
        "pharmacy stats computed"
    );
    stats
}

/// Prescriptions whose status label matches `status_name` (case-insensitive).
///
/// An unknown status name matches nothing and yields an empty vector.
pub fn prescriptions_by_status(prescriptions: &[Prescription], status_name: &str) -> Vec<Prescription> {
    match status_name.parse::<PrescriptionStatus>() {
        Ok(status) => prescriptions.iter().filter(|rx| rx.status == status).cloned().collect(),
        Err(e) => {
            debug!(error = %e, "status filter matched nothing");
            Vec::new()
        }
    }
}

/// Case-insensitive substring search over patient name, rx number, and the
/// medication's generic and brand names. An empty query returns everything.
pub fn search_prescriptions(prescriptions: &[Prescription], query: &str) -> Vec<Prescription> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return prescriptions.to_vec();
    }

    prescriptions
        .iter()
        .filter(|rx| {
            [
                rx.patient.name.as_str(),
                rx.rx_number.as_str(),
                rx.medication.generic_name.as_str(),
                rx.medication.brand_name.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use rand::{rngs::StdRng, SeedableRng};

    use median_contracts::{
        label::Labeled,
        prescription::{PriorAuth, PriorAuthStatus, PrescriptionStatus},
    };

    use super::*;
    use crate::{formulary::Formulary, pharmacy::generate_prescriptions};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn batch(count: usize) -> Vec<Prescription> {
        let mut rng = StdRng::seed_from_u64(21);
        generate_prescriptions(&mut rng, &Formulary::standard(), count, today())
    }

    #[test]
    fn empty_input_yields_zeroed_stats() {
        let stats = calculate_pharmacy_stats(&[], today());
        assert_eq!(stats, PharmacyStats::default());
        assert_eq!(stats.total_prescriptions, 0);
    }

    #[test]
    fn status_counts_sum_to_total() {
        let list = batch(150);
        let stats = calculate_pharmacy_stats(&list, today());
        assert_eq!(stats.total_prescriptions, 150);
        let sum: usize = PrescriptionStatus::ALL.iter().map(|s| stats.count(*s)).sum();
        assert_eq!(sum, 150);
    }

    #[test]
    fn derived_counts_match_brute_force() {
        let list = batch(150);
        let stats = calculate_pharmacy_stats(&list, today());

        let controlled = list.iter().filter(|rx| rx.medication.is_controlled()).count();
        let pa_pending = list
            .iter()
            .filter(|rx| rx.prior_auth.as_ref().map(|p| p.status) == Some(PriorAuthStatus::Pending))
            .count();
        assert_eq!(stats.controlled_substances, controlled);
        assert_eq!(stats.prior_auth_needed, pa_pending);
    }

    #[test]
    fn stats_follow_the_slice_they_are_given() {
        let mut list = batch(10);
        let before = calculate_pharmacy_stats(&list, today());
        list.truncate(4);
        let after = calculate_pharmacy_stats(&list, today());
        assert_eq!(before.total_prescriptions, 10);
        assert_eq!(after.total_prescriptions, 4);
    }

    #[test]
    fn refill_due_requires_passed_date_and_remaining_refills() {
        let mut rx = batch(1).remove(0);
        rx.refills = 3;
        rx.refills_remaining = 2;
        rx.next_refill_date = Some(today() - Duration::days(1));
        assert_eq!(calculate_pharmacy_stats(&[rx.clone()], today()).refills_due, 1);

        rx.next_refill_date = Some(today());
        assert_eq!(calculate_pharmacy_stats(&[rx.clone()], today()).refills_due, 1);

        rx.next_refill_date = Some(today() + Duration::days(1));
        assert_eq!(calculate_pharmacy_stats(&[rx.clone()], today()).refills_due, 0);

        rx.next_refill_date = Some(today() - Duration::days(1));
        rx.refills_remaining = 0;
        assert_eq!(calculate_pharmacy_stats(&[rx.clone()], today()).refills_due, 0);
    }

    #[test]
    fn prior_auth_needed_counts_only_pending() {
        let mut rx = batch(1).remove(0);
        rx.prior_auth = Some(PriorAuth { status: PriorAuthStatus::Approved, reference: "PA-1".into() });
        assert_eq!(calculate_pharmacy_stats(&[rx.clone()], today()).prior_auth_needed, 0);
        rx.prior_auth = Some(PriorAuth { status: PriorAuthStatus::Pending, reference: "PA-1".into() });
        assert_eq!(calculate_pharmacy_stats(&[rx], today()).prior_auth_needed, 1);
    }

    #[test]
    fn status_filter_is_case_insensitive_and_rejects_unknown() {
        let list = batch(100);
        let held = prescriptions_by_status(&list, "hold");
        assert!(held.iter().all(|rx| rx.status == PrescriptionStatus::Hold));
        assert_eq!(held.len(), list.iter().filter(|rx| rx.status == PrescriptionStatus::Hold).count());

        assert!(prescriptions_by_status(&list, "Shipped").is_empty());
    }

    #[test]
    fn search_matches_medication_and_patient() {
        let list = batch(100);
        let first = &list[0];

        let by_drug = search_prescriptions(&list, &first.medication.generic_name.to_uppercase());
        assert!(by_drug.iter().any(|rx| rx.id == first.id));

        let by_rx = search_prescriptions(&list, &first.rx_number);
        assert!(by_rx.iter().any(|rx| rx.id == first.id));

        assert_eq!(search_prescriptions(&list, "  ").len(), list.len());
        assert!(search_prescriptions(&list, "no-such-drug-zzz").is_empty());
    }
}
