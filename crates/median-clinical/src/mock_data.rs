//! Fixed name pools and small drawing helpers shared by the generators.
//!
//! All names are fictional. Pools are plain constants handed to the
//! generators; nothing in this module holds state.

use chrono::{Duration, NaiveDate};
use rand::Rng;

// ── Identity pools ────────────────────────────────────────────────────────────

pub const FIRST_NAMES: &[&str] = &[
    "Ahmet", "Ayşe", "Mehmet", "Fatma", "Mustafa", "Emine", "Ali", "Hatice", "Hüseyin", "Zeynep",
    "Hasan", "Elif", "İbrahim", "Meryem", "Murat", "Selin", "Emre", "Deniz", "Burak", "Ece",
];

pub const LAST_NAMES: &[&str] = &[
    "Yılmaz", "Kaya", "Demir", "Şahin", "Çelik", "Yıldız", "Yıldırım", "Öztürk", "Aydın", "Özdemir",
    "Arslan", "Doğan", "Kılıç", "Aslan", "Çetin", "Kara", "Koç", "Kurt", "Özkan", "Şimşek",
];

/// Prescriber name and specialty pairs.
pub const PRESCRIBERS: &[(&str, &str)] = &[
    ("Dr. Can Erdem", "Internal Medicine"),
    ("Dr. Leyla Aksoy", "Cardiology"),
    ("Dr. Kemal Tunç", "Endocrinology"),
    ("Dr. Nur Başaran", "Psychiatry"),
    ("Dr. Okan Güler", "Pulmonology"),
    ("Dr. Seda Uçar", "Neurology"),
    ("Dr. Tolga Avcı", "Infectious Diseases"),
    ("Dr. Pınar Ekinci", "Family Medicine"),
    ("Dr. Serkan Polat", "Orthopedics"),
    ("Dr. Gül Tekin", "Anesthesiology"),
];

// ── Medula pools ──────────────────────────────────────────────────────────────

/// Clinic branch codes as used in Medula provision requests.
pub const BRANCH_CODES: &[&str] = &["1000", "1500", "1800", "2300", "2800", "3100", "3300", "4400"];

pub const REJECTION_REASONS: &[&str] = &[
    "Patient has no active SGK coverage on the provision date",
    "Duplicate provision for the same branch within 10 days",
    "SUT code not billable for the selected treatment type",
    "Referral document missing for second-level facility",
    "National ID does not match MERNIS records",
];

// ── Compliance pools ──────────────────────────────────────────────────────────

pub const AI_VENDORS: &[&str] = &[
    "Anatolia Imaging AI",
    "Bosphorus Health Labs",
    "Median Clinical AI",
    "Kapadokya Diagnostics",
    "Ege Signal Systems",
];

/// Model name stems paired with their clinical specialty.
pub const AI_MODEL_STEMS: &[(&str, &str)] = &[
    ("ChestScan", "Radiology"),
    ("StrokeAlert", "Neurology"),
    ("RetinaGrade", "Ophthalmology"),
    ("SepsisWatch", "Critical Care"),
    ("EchoMeasure", "Cardiology"),
    ("DermaCheck", "Dermatology"),
    ("PathSlide", "Pathology"),
    ("FractureFind", "Orthopedics"),
];

// ── Drawing helpers ───────────────────────────────────────────────────────────

/// Pick one element uniformly.
///
/// # Panics
///
/// Panics if `list` is empty; every pool in this crate is a non-empty
/// constant.
pub fn pick<'a, T: ?Sized, R: Rng + ?Sized>(rng: &mut R, list: &'a [&'a T]) -> &'a T {
    list[rng.gen_range(0..list.len())]
}

/// A string of `len` random decimal digits; the first digit is never zero.
pub fn digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    let mut out = String::with_capacity(len);
    for i in 0..len {
        let lower = if i == 0 { 1 } else { 0 };
        let d: u8 = rng.gen_range(lower..10);
        out.push(char::from(b'0' + d));
    }
    out
}

/// A UUID built from RNG bytes, so identifiers are reproducible under a seed.
pub fn uuid_from<R: Rng + ?Sized>(rng: &mut R) -> uuid::Uuid {
    let bytes: [u8; 16] = rng.gen();
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// A date uniformly within the `days` days ending at `today` (inclusive).
pub fn date_within<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate, days: i64) -> NaiveDate {
    let back = rng.gen_range(0..days.max(1));
    today - Duration::days(back)
}

/// "First Last" from the patient pools.
pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}
