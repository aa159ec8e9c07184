//! Medula billing: SUT catalog lookups, provision generation, monthly
//! invoices, and provision stats.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use tracing::{debug, info};

use median_contracts::{
    label::Labeled,
    medula::{
        InsuranceType, Invoice, InvoiceStatus, MedulaStats, Provision, ProvisionStatus, SutCategory,
        SutCode, TreatmentType,
    },
};

use crate::mock_data::{date_within, digits, person_name, pick, BRANCH_CODES, REJECTION_REASONS};

/// Provision dates fall within this many days ending today.
pub const PROVISION_WINDOW_DAYS: i64 = 90;

/// Largest number of SUT codes billed under one provision.
pub const MAX_CODES_PER_PROVISION: usize = 4;

/// Invoices more than this many months older than the latest period have
/// been paid out.
pub const SETTLEMENT_LAG_MONTHS: i32 = 2;

// ── SUT catalog ───────────────────────────────────────────────────────────────

fn sut(code: &str, name: &str, category: SutCategory, points: u32, price_kurus: u64, special_code: bool) -> SutCode {
    SutCode {
        code: code.to_string(),
        name: name.to_string(),
        category,
        points,
        price_kurus,
        special_code,
    }
}

/// The stock SUT catalog.
pub fn sut_catalog() -> Vec<SutCode> {
    use SutCategory::*;

    vec![
        sut("520.010", "Acil muayene", Emergency, 18, 9_450, false),
        sut("520.020", "Acil gözlem (6 saate kadar)", Emergency, 35, 18_300, false),
        sut("P520.030", "Yeşil alan acil muayene", Emergency, 12, 6_200, true),
        sut("520.030", "Poliklinik muayenesi", Examination, 20, 10_500, false),
        sut("520.040", "Uzman hekim konsültasyonu", Examination, 25, 13_100, false),
        sut("P520.050", "Evde sağlık muayenesi", Examination, 40, 21_000, true),
        sut("901.210", "Tam kan sayımı (hemogram)", Laboratory, 6, 3_150, false),
        sut("901.620", "Glukoz (serum/plazma)", Laboratory, 2, 1_050, false),
        sut("902.230", "HbA1c", Laboratory, 9, 4_700, false),
        sut("903.120", "TSH", Laboratory, 8, 4_200, false),
        sut("P904.080", "SARS-CoV-2 PCR", Laboratory, 60, 31_500, true),
        sut("801.010", "Akciğer grafisi (PA)", Radiology, 14, 7_350, false),
        sut("803.520", "Beyin BT (kontrastsız)", Radiology, 90, 47_250, false),
        sut("804.580", "Lomber MR", Radiology, 160, 84_000, false),
        sut("805.200", "Batın ultrasonografisi", Radiology, 30, 15_750, false),
        sut("P617.590", "Laparoskopik kolesistektomi", Surgery, 1_350, 708_750, true),
        sut("611.460", "Apendektomi", Surgery, 900, 472_500, false),
        sut("530.510", "Yara debridmanı", Surgery, 45, 23_600, false),
        sut("530.900", "İlaç uygulama (IM/IV)", Pharmacy, 4, 2_100, false),
        sut("530.910", "Serum takma", Pharmacy, 7, 3_700, false),
        sut("P530.920", "Kemoterapi ilaç hazırlama", Pharmacy, 55, 28_900, true),
        sut("900.010", "Fizik tedavi seansı", Physiotherapy, 15, 7_900, false),
        sut("900.020", "Elektroterapi", Physiotherapy, 10, 5_250, false),
        sut("P900.030", "Robotik rehabilitasyon seansı", Physiotherapy, 75, 39_400, true),
    ]
}

/// Case-insensitive substring match on code or name. An empty query
/// returns the whole catalog.
pub fn search_sut_codes(catalog: &[SutCode], query: &str) -> Vec<SutCode> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.to_vec();
    }
    catalog
        .iter()
        .filter(|c| c.code.to_lowercase().contains(&needle) || c.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Codes in the category named `category_name`; unknown names yield an empty
/// vector.
pub fn sut_codes_by_category(catalog: &[SutCode], category_name: &str) -> Vec<SutCode> {
    match category_name.parse::<SutCategory>() {
        Ok(category) => catalog.iter().filter(|c| c.category == category).cloned().collect(),
        Err(e) => {
            debug!(error = %e, "category filter matched nothing");
            Vec::new()
        }
    }
}

// ── Provisions ────────────────────────────────────────────────────────────────

/// Generate `count` provisions billed against `catalog`, most recent first.
///
/// Returns an empty vector for an empty catalog.
pub fn generate_provisions<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &[SutCode],
    count: usize,
    today: NaiveDate,
) -> Vec<Provision> {
    if catalog.is_empty() {
        debug!(count, "SUT catalog is empty, returning no provisions");
        return Vec::new();
    }

    let mut provisions: Vec<Provision> = (0..count).map(|_| generate_one(rng, catalog, today)).collect();
    provisions.sort_by(|a, b| b.date.cmp(&a.date));

    info!(count = provisions.len(), %today, "provision batch generated");
    provisions
}

fn generate_one<R: Rng + ?Sized>(rng: &mut R, catalog: &[SutCode], today: NaiveDate) -> Provision {
    let date = date_within(rng, today, PROVISION_WINDOW_DAYS);
    let status = ProvisionStatus::ALL[rng.gen_range(0..ProvisionStatus::ALL.len())];

    let code_count = rng.gen_range(1..=MAX_CODES_PER_PROVISION.min(catalog.len()));
    let billed: Vec<&SutCode> = rand::seq::index::sample(rng, catalog.len(), code_count)
        .into_iter()
        .map(|i| &catalog[i])
        .collect();

    Provision {
        provision_number: format!("PRV-{}-{}", date.year(), digits(rng, 6)),
        patient_name: person_name(rng),
        national_id: digits(rng, 11),
        insurance_type: InsuranceType::ALL[rng.gen_range(0..InsuranceType::ALL.len())],
        treatment_type: TreatmentType::ALL[rng.gen_range(0..TreatmentType::ALL.len())],
        branch_code: pick(rng, BRANCH_CODES).to_string(),
        date,
        status,
        sut_codes: billed.iter().map(|c| c.code.clone()).collect(),
        amount_kurus: billed.iter().map(|c| c.price_kurus).sum(),
        rejection_reason: (status == ProvisionStatus::Rejected).then(|| pick(rng, REJECTION_REASONS).to_string()),
    }
}

// ── Invoices ──────────────────────────────────────────────────────────────────

fn period_of(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// Group provisions into one invoice per `YYYY-MM` period, oldest first.
///
/// Every provision of the period is linked; the total counts Approved
/// amounts only. The latest period is still open (Draft). Periods more than
/// [`SETTLEMENT_LAG_MONTHS`] months before it are Paid, the rest Submitted.
pub fn build_invoices(provisions: &[Provision]) -> Vec<Invoice> {
    let mut periods: BTreeMap<i32, Vec<&Provision>> = BTreeMap::new();
    for p in provisions {
        periods.entry(month_index(p.date)).or_default().push(p);
    }

    let latest = periods.keys().next_back().copied().unwrap_or_default();

    periods
        .into_iter()
        .map(|(month, members)| {
            let status = match latest - month {
                0 => InvoiceStatus::Draft,
                lag if lag > SETTLEMENT_LAG_MONTHS => InvoiceStatus::Paid,
                _ => InvoiceStatus::Submitted,
            };
            let period = members.first().map(|p| period_of(p.date)).unwrap_or_default();
            Invoice {
                invoice_number: format!("INV-{}", period),
                provision_numbers: members.iter().map(|p| p.provision_number.clone()).collect(),
                total_kurus: members
                    .iter()
                    .filter(|p| p.status == ProvisionStatus::Approved)
                    .map(|p| p.amount_kurus)
                    .sum(),
                period,
                status,
            }
        })
        .collect()
}

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Provision counts by status and the total billed amount.
pub fn calculate_medula_stats(provisions: &[Provision]) -> MedulaStats {
    let mut stats = MedulaStats {
        total: provisions.len(),
        ..MedulaStats::default()
    };
    for p in provisions {
        match p.status {
            ProvisionStatus::Approved => stats.approved += 1,
            ProvisionStatus::Pending => stats.pending += 1,
            ProvisionStatus::Rejected => stats.rejected += 1,
            ProvisionStatus::Expired => stats.expired += 1,
        }
        stats.total_amount_kurus += p.amount_kurus;
    }
    stats
}
