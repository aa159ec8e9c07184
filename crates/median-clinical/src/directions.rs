//! Directions (sig) synthesis.
//!
//! The generator draws a structured `Dosing` first and renders the sentence
//! from it, so the dispensed quantity never depends on re-reading the text.
//! [`parse_directions`] covers the other direction for sig text that comes
//! from outside the generator; it agrees with [`synthesize`] on every phrase
//! the templates can produce.

use rand::Rng;
use serde::{Deserialize, Serialize};

use median_contracts::{
    medication::{Medication, Route},
    prescription::Dosing,
};

/// A frequency phrase and the doses per day it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frequency {
    pub phrase: &'static str,
    pub per_day: u32,
}

const fn freq(phrase: &'static str, per_day: u32) -> Frequency {
    Frequency { phrase, per_day }
}

const ORAL: &[Frequency] = &[
    freq("once daily", 1),
    freq("twice daily", 2),
    freq("three times daily", 3),
    freq("every 12 hours", 2),
    freq("every 8 hours", 3),
    freq("at bedtime", 1),
];

const INJECTABLE: &[Frequency] = &[freq("once daily", 1), freq("every 12 hours", 2), freq("every 8 hours", 3)];

const INHALED: &[Frequency] = &[freq("twice daily", 2), freq("every 6 hours as needed", 4)];

const TOPICAL: &[Frequency] = &[freq("once daily", 1), freq("twice daily", 2)];

const PATCH: &[Frequency] = &[freq("once daily", 1)];

const DROPS: &[Frequency] = &[
    freq("once daily", 1),
    freq("twice daily", 2),
    freq("three times daily", 3),
    freq("four times daily", 4),
];

/// Verbs every template opens with; the token after the verb is the
/// per-dose unit count.
const VERBS: &[&str] = &["take", "dissolve", "inject", "inhale", "apply", "instill", "use", "insert"];

/// A rendered sig with the structured value it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directions {
    pub text: String,
    pub dosing: Dosing,
}

/// Frequency phrases available for `route`.
pub fn frequencies_for(route: Route) -> &'static [Frequency] {
    match route {
        Route::Oral | Route::Sublingual => ORAL,
        Route::Iv | Route::Im | Route::Sc => INJECTABLE,
        Route::Inhalation => INHALED,
        Route::Topical | Route::Rectal => TOPICAL,
        Route::Transdermal => PATCH,
        Route::Ophthalmic | Route::Otic | Route::Nasal => DROPS,
    }
}

fn plural(word: &str, n: u32) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Draw a dose and frequency for `medication` and render the sig.
pub fn synthesize<R: Rng + ?Sized>(rng: &mut R, medication: &Medication) -> Directions {
    let frequencies = frequencies_for(medication.route);
    let f = frequencies[rng.gen_range(0..frequencies.len())];

    let (units, text) = match medication.route {
        Route::Oral => {
            let n = rng.gen_range(1..=2);
            (n, format!("Take {} {} by mouth {}", n, plural(&medication.dosage_form, n), f.phrase))
        }
        Route::Sublingual => (1, format!("Dissolve 1 {} under the tongue {}", medication.dosage_form, f.phrase)),
        Route::Iv | Route::Im | Route::Sc => {
            let how = match medication.route {
                Route::Iv => "intravenously",
                Route::Im => "intramuscularly",
                _ => "subcutaneously",
            };
            (
                1,
                format!("Inject 1 {} ({}) {} {}", medication.dosage_form, medication.strength, how, f.phrase),
            )
        }
        Route::Inhalation => {
            let n = rng.gen_range(1..=2);
            (n, format!("Inhale {} {} {}", n, plural("puff", n), f.phrase))
        }
        Route::Topical => (1, format!("Apply 1 thin layer of {} to affected area {}", medication.dosage_form, f.phrase)),
        Route::Transdermal => (1, format!("Apply 1 patch to clean, dry skin {}", f.phrase)),
        Route::Rectal => (1, format!("Insert 1 suppository rectally {}", f.phrase)),
        Route::Ophthalmic | Route::Otic => {
            let n = rng.gen_range(1..=2);
            let site = if medication.route == Route::Ophthalmic { "each eye" } else { "the affected ear" };
            (n, format!("Instill {} {} in {} {}", n, plural("drop", n), site, f.phrase))
        }
        Route::Nasal => {
            let n = rng.gen_range(1..=2);
            (n, format!("Use {} {} in each nostril {}", n, plural("spray", n), f.phrase))
        }
    };

    Directions {
        text,
        dosing: Dosing::new(f.per_day, units),
    }
}

/// Recover a `Dosing` from free-text directions by keyword matching.
///
/// Frequency: "four times"/"every 6 hours" → 4, "three times"/"every 8 hours"
/// → 3, "twice"/"every 12 hours" → 2, anything else → 1. Units: the number
/// right after a leading verb ("Take 2 ...", "Inhale 2 ..."), else 1.
pub fn parse_directions(text: &str) -> Dosing {
    let lower = text.to_lowercase();

    let doses_per_day = if lower.contains("four times") || lower.contains("every 6 hours") {
        4
    } else if lower.contains("three times") || lower.contains("every 8 hours") {
        3
    } else if lower.contains("twice") || lower.contains("every 12 hours") {
        2
    } else {
        1
    };

    let mut tokens = lower.split_whitespace();
    let units_per_dose = match (tokens.next(), tokens.next()) {
        (Some(verb), Some(count)) if VERBS.contains(&verb) => count.parse::<u32>().ok().filter(|n| *n > 0).unwrap_or(1),
        _ => 1,
    };

    Dosing::new(doses_per_day, units_per_dose)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use median_contracts::{medication::Route, prescription::Dosing};

    use super::{parse_directions, synthesize};
    use crate::formulary::Formulary;

    #[test]
    fn parser_agrees_with_every_synthesized_sig() {
        let formulary = Formulary::standard();
        let mut rng = StdRng::seed_from_u64(11);

        for medication in formulary.medications() {
            for _ in 0..50 {
                let directions = synthesize(&mut rng, medication);
                assert_eq!(
                    parse_directions(&directions.text),
                    directions.dosing,
                    "mismatch for '{}'",
                    directions.text
                );
            }
        }
    }

    #[test]
    fn injectable_sig_is_not_read_as_strength() {
        let formulary = Formulary::standard();
        let enoxaparin = formulary.get("MED-0015").unwrap();
        assert_eq!(enoxaparin.route, Route::Sc);

        let mut rng = StdRng::seed_from_u64(1);
        let directions = synthesize(&mut rng, enoxaparin);
        assert!(directions.text.starts_with("Inject 1 prefilled syringe (40 mg/0.4 mL) subcutaneously"));
        assert_eq!(directions.dosing.units_per_dose, 1);
    }

    #[test]
    fn transdermal_patch_is_once_daily() {
        let formulary = Formulary::standard();
        let fentanyl = formulary.get("MED-0020").unwrap();
        assert_eq!(fentanyl.route, Route::Transdermal);

        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..40 {
            let directions = synthesize(&mut rng, fentanyl);
            assert_eq!(directions.text, "Apply 1 patch to clean, dry skin once daily");
            assert_eq!(directions.dosing, Dosing::new(1, 1));
        }
    }

    #[test]
    fn parser_keyword_rules() {
        assert_eq!(parse_directions("Take 2 tablets by mouth twice daily"), Dosing::new(2, 2));
        assert_eq!(parse_directions("Take 1 capsule by mouth every 8 hours"), Dosing::new(3, 1));
        assert_eq!(parse_directions("Inhale 2 puffs every 6 hours as needed"), Dosing::new(4, 2));
        assert_eq!(parse_directions("Instill 1 drop in each eye four times daily"), Dosing::new(4, 1));
        assert_eq!(parse_directions("Apply to affected area at bedtime"), Dosing::new(1, 1));
        assert_eq!(parse_directions(""), Dosing::new(1, 1));
    }
}
