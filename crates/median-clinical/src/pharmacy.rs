//! Prescription batch generator.
//!
//! Each record is drawn from an injected RNG against an immutable
//! `Formulary`, so a fixed seed reproduces the same batch exactly. The
//! generator upholds these invariants on every record:
//!
//! - `quantity == dosing.doses_per_day * dosing.units_per_dose * days_supply`
//! - prior-authorization fields exist iff the medication is Non-Preferred
//! - Schedule II medications never carry refills
//! - the batch is sorted by write date, most recent first

use chrono::{Duration, NaiveDate};
use rand::Rng;
use tracing::{debug, info};

use median_contracts::{
    medication::{DeaSchedule, Medication},
    prescription::{Patient, Prescriber, Prescription, PrescriptionStatus, PriorAuth, PriorAuthStatus},
    label::Labeled,
};

use crate::{
    directions::synthesize,
    formulary::{Formulary, GENERAL_INDICATION},
    mock_data::{date_within, digits, person_name, uuid_from, PRESCRIBERS},
    seed::{Domain, SeedStreams},
};

/// Days-supply values a prescriber may choose.
pub const DAYS_SUPPLY_OPTIONS: [u32; 5] = [7, 14, 30, 60, 90];

/// Write dates fall within this many days ending today.
pub const WRITE_WINDOW_DAYS: i64 = 30;

/// Upper bound on refills for non-Schedule II medications.
pub const MAX_REFILLS: u32 = 5;

/// Generate `count` prescriptions against `formulary`.
///
/// Returns an empty vector for `count == 0` or an empty formulary.
/// Negative counts are rejected before they reach this function (see
/// `median_contracts::batch::BatchSize`).
pub fn generate_prescriptions<R: Rng + ?Sized>(
    rng: &mut R,
    formulary: &Formulary,
    count: usize,
    today: NaiveDate,
) -> Vec<Prescription> {
    if formulary.is_empty() {
        debug!(count, "formulary is empty, returning no prescriptions");
        return Vec::new();
    }

    let mut prescriptions: Vec<Prescription> = (0..count)
        .map(|_| generate_one(rng, formulary, today))
        .collect();

    // Stable: equal dates keep generation order.
    prescriptions.sort_by(|a, b| b.write_date.cmp(&a.write_date));

    info!(
        count = prescriptions.len(),
        formulary_size = formulary.len(),
        %today,
        "prescription batch generated"
    );
    prescriptions
}

/// Seeded convenience wrapper drawing from the pharmacy seed stream.
pub fn generate_prescription_batch(
    seeds: &SeedStreams,
    formulary: &Formulary,
    count: usize,
    today: NaiveDate,
) -> Vec<Prescription> {
    let mut rng = seeds.rng(Domain::Pharmacy);
    generate_prescriptions(&mut rng, formulary, count, today)
}

fn generate_one<R: Rng + ?Sized>(rng: &mut R, formulary: &Formulary, today: NaiveDate) -> Prescription {
    let medications = formulary.medications();
    let medication: &Medication = &medications[rng.gen_range(0..medications.len())];

    let patient = Patient {
        name: person_name(rng),
        mrn: format!("MRN-{}", digits(rng, 7)),
        national_id: digits(rng, 11),
        birth_date: today - Duration::days(rng.gen_range(18 * 365..=90 * 365)),
    };

    let (prescriber_name, specialty) = PRESCRIBERS[rng.gen_range(0..PRESCRIBERS.len())];
    let prescriber = Prescriber {
        name: prescriber_name.to_string(),
        specialty: specialty.to_string(),
        license_number: format!("TR-{}", digits(rng, 6)),
    };

    let statuses = PrescriptionStatus::ALL;
    let status = statuses[rng.gen_range(0..statuses.len())];

    let write_date = date_within(rng, today, WRITE_WINDOW_DAYS);

    let curated = formulary.indications_for(medication.therapeutic_class);
    let indication = if curated.is_empty() {
        GENERAL_INDICATION.to_string()
    } else {
        curated[rng.gen_range(0..curated.len())].clone()
    };

    let days_supply = DAYS_SUPPLY_OPTIONS[rng.gen_range(0..DAYS_SUPPLY_OPTIONS.len())];

    let refills = if medication.dea_schedule == DeaSchedule::II {
        0
    } else {
        rng.gen_range(0..=MAX_REFILLS)
    };
    let refills_remaining = rng.gen_range(0..=refills);

    let directions = synthesize(rng, medication);
    // Template dosings stay far below u32::MAX.
    let quantity = directions.dosing.quantity_for(days_supply).unwrap_or(u32::MAX);

    let next_refill_date = (refills > 0).then(|| write_date + Duration::days(i64::from(days_supply)));

    let prior_auth = medication.formulary_status.requires_prior_auth().then(|| {
        let statuses = PriorAuthStatus::ALL;
        PriorAuth {
            status: statuses[rng.gen_range(0..statuses.len())],
            reference: format!("PA-{}", digits(rng, 6)),
        }
    });

    Prescription {
        id: uuid_from(rng),
        rx_number: format!("RX-{}", digits(rng, 7)),
        patient,
        prescriber,
        medication: medication.clone(),
        status,
        indication,
        write_date,
        days_supply,
        refills,
        refills_remaining,
        directions: directions.text,
        dosing: directions.dosing,
        quantity,
        next_refill_date,
        prior_auth,
    }
}
