//! The formulary catalog and its curated indication lists.
//!
//! `Formulary` is an immutable value: build it once (usually with
//! [`Formulary::standard`]) and pass it by reference to the generators.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use median_contracts::medication::{
    DeaSchedule, FormularyStatus, Medication, Route, TherapeuticClass,
};

/// Indication used when a class has no curated list.
pub const GENERAL_INDICATION: &str = "General";

/// A medication catalog plus indication lists keyed by therapeutic class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formulary {
    medications: Vec<Medication>,
    indications: HashMap<TherapeuticClass, Vec<String>>,
}

impl Formulary {
    pub fn new(
        medications: Vec<Medication>,
        indications: HashMap<TherapeuticClass, Vec<String>>,
    ) -> Self {
        Self { medications, indications }
    }

    /// The stock demo formulary: 26 entries across all 12 routes and all
    /// four tiers, including Schedule II through V substances.
    pub fn standard() -> Self {
        Self::new(standard_medications(), standard_indications())
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn len(&self) -> usize {
        self.medications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medications.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Medication> {
        self.medications.iter().find(|m| m.code == code)
    }

    pub fn by_class(&self, class: TherapeuticClass) -> Vec<&Medication> {
        self.medications.iter().filter(|m| m.therapeutic_class == class).collect()
    }

    /// Entries on DEA schedules I through V.
    pub fn controlled(&self) -> Vec<&Medication> {
        self.medications.iter().filter(|m| m.is_controlled()).collect()
    }

    /// Curated indications for `class`; empty when none are curated.
    pub fn indications_for(&self, class: TherapeuticClass) -> &[String] {
        self.indications.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ── Stock catalog ─────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn entry(
    code: &str,
    generic_name: &str,
    brand_name: &str,
    strength: &str,
    dosage_form: &str,
    route: Route,
    therapeutic_class: TherapeuticClass,
    dea_schedule: DeaSchedule,
    formulary_status: FormularyStatus,
    unit_price: f64,
) -> Medication {
    Medication {
        code: code.to_string(),
        generic_name: generic_name.to_string(),
        brand_name: brand_name.to_string(),
        strength: strength.to_string(),
        dosage_form: dosage_form.to_string(),
        route,
        therapeutic_class,
        dea_schedule,
        formulary_status,
        unit_price,
        warning: None,
        contraindications: Vec::new(),
        side_effects: Vec::new(),
        clinical_note: None,
    }
}

fn with_safety(
    mut medication: Medication,
    warning: &str,
    contraindications: &[&str],
    side_effects: &[&str],
) -> Medication {
    medication.warning = Some(warning.to_string());
    medication.contraindications = contraindications.iter().map(|s| s.to_string()).collect();
    medication.side_effects = side_effects.iter().map(|s| s.to_string()).collect();
    medication
}

fn with_note(mut medication: Medication, note: &str) -> Medication {
    medication.clinical_note = Some(note.to_string());
    medication
}

fn standard_medications() -> Vec<Medication> {
    use DeaSchedule::*;
    use FormularyStatus::*;
    use Route::*;
    use TherapeuticClass::*;

    vec![
        entry("MED-0001", "Amoxicillin", "Amoksil", "500 mg", "capsule", Oral, Antibiotic, NonControlled, Preferred, 2.15),
        entry("MED-0002", "Metformin", "Glifor", "1000 mg", "tablet", Oral, Antidiabetic, NonControlled, Preferred, 0.85),
        with_safety(
            entry("MED-0003", "Warfarin", "Coumadin", "5 mg", "tablet", Oral, Anticoagulant, NonControlled, Preferred, 1.10),
            "Narrow therapeutic index; monitor INR",
            &["Active bleeding", "Pregnancy"],
            &["Bleeding", "Bruising"],
        ),
        entry("MED-0004", "Lisinopril", "Zestril", "10 mg", "tablet", Oral, Antihypertensive, NonControlled, Preferred, 0.60),
        entry("MED-0005", "Atorvastatin", "Lipitor", "20 mg", "tablet", Oral, Statin, NonControlled, Preferred, 1.45),
        entry("MED-0006", "Pantoprazole", "Pulcet", "40 mg", "tablet", Oral, ProtonPumpInhibitor, NonControlled, Preferred, 0.95),
        entry("MED-0007", "Sertraline", "Lustral", "50 mg", "tablet", Oral, Antidepressant, NonControlled, NonPreferred, 1.80),
        entry("MED-0008", "Quetiapine", "Seroquel", "100 mg", "tablet", Oral, Antipsychotic, NonControlled, Restricted, 3.25),
        with_safety(
            entry("MED-0009", "Oxycodone", "OxyContin", "10 mg", "tablet", Oral, Opioid, II, Restricted, 4.70),
            "Risk of addiction, abuse, and respiratory depression",
            &["Severe asthma", "Paralytic ileus"],
            &["Constipation", "Sedation", "Nausea"],
        ),
        entry("MED-0010", "Tramadol", "Contramal", "50 mg", "capsule", Oral, Analgesic, IV, NonPreferred, 1.20),
        entry("MED-0011", "Pregabalin", "Lyrica", "75 mg", "capsule", Oral, Anticonvulsant, V, NonPreferred, 2.60),
        entry("MED-0012", "Cetirizine", "Zyrtec", "10 mg", "tablet", Oral, Antihistamine, NonControlled, Preferred, 0.40),
        with_note(
            entry("MED-0013", "Ceftriaxone", "Rocephin", "1 g", "vial", Iv, Antibiotic, NonControlled, Preferred, 18.50),
            "Do not co-administer with calcium-containing IV solutions",
        ),
        with_safety(
            entry("MED-0014", "Morphine", "Duramorph", "4 mg/mL", "vial", Iv, Opioid, II, Restricted, 9.90),
            "Respiratory depression; keep naloxone available",
            &["Respiratory depression", "Acute asthma"],
            &["Hypotension", "Pruritus"],
        ),
        entry("MED-0015", "Enoxaparin", "Clexane", "40 mg/0.4 mL", "prefilled syringe", Sc, Anticoagulant, NonControlled, Preferred, 12.30),
        entry("MED-0016", "Insulin Glargine", "Lantus", "100 U/mL", "pen", Sc, Antidiabetic, NonControlled, NonPreferred, 24.00),
        entry("MED-0017", "Methylprednisolone", "Prednol", "40 mg", "vial", Im, Corticosteroid, NonControlled, Preferred, 6.75),
        entry("MED-0018", "Salbutamol", "Ventolin", "100 mcg", "inhaler", Inhalation, Bronchodilator, NonControlled, Preferred, 7.80),
        entry("MED-0019", "Hydrocortisone", "Locoid", "1%", "cream", Topical, Corticosteroid, NonControlled, Preferred, 3.10),
        with_safety(
            entry("MED-0020", "Fentanyl", "Durogesic", "25 mcg/h", "patch", Transdermal, Opioid, II, NonFormulary, 21.40),
            "For opioid-tolerant patients only",
            &["Opioid-naive patients"],
            &["Somnolence", "Application site reaction"],
        ),
        entry("MED-0021", "Nitroglycerin", "Nitrolingual", "0.4 mg", "tablet", Sublingual, Antihypertensive, NonControlled, Preferred, 1.95),
        entry("MED-0022", "Ofloxacin", "Exocin", "0.3%", "drops", Ophthalmic, Antibiotic, NonControlled, NonPreferred, 5.40),
        entry("MED-0023", "Ciprofloxacin", "Ciloxan", "0.3%", "drops", Otic, Antibiotic, NonControlled, Preferred, 5.10),
        entry("MED-0024", "Mometasone", "Nasonex", "50 mcg", "spray", Nasal, Corticosteroid, NonControlled, Preferred, 8.20),
        entry("MED-0025", "Diclofenac", "Voltaren", "100 mg", "suppository", Rectal, Analgesic, NonControlled, Preferred, 1.35),
        entry("MED-0026", "Lorazepam", "Ativan", "2 mg/mL", "vial", Im, Anticonvulsant, IV, Restricted, 6.10),
    ]
}

fn standard_indications() -> HashMap<TherapeuticClass, Vec<String>> {
    use TherapeuticClass::*;

    let curated: &[(TherapeuticClass, &[&str])] = &[
        (Analgesic, &["Osteoarthritis pain", "Postoperative pain", "Low back pain"]),
        (Antibiotic, &["Community-acquired pneumonia", "Urinary tract infection", "Acute otitis media", "Bacterial conjunctivitis"]),
        (Anticoagulant, &["Atrial fibrillation", "DVT prophylaxis", "Pulmonary embolism"]),
        (Antidiabetic, &["Type 2 diabetes mellitus", "Type 1 diabetes mellitus"]),
        (Antihypertensive, &["Essential hypertension", "Heart failure", "Stable angina"]),
        (Antidepressant, &["Major depressive disorder", "Generalized anxiety disorder"]),
        (Antipsychotic, &["Schizophrenia", "Bipolar disorder"]),
        (Anticonvulsant, &["Focal epilepsy", "Neuropathic pain", "Status epilepticus"]),
        (Bronchodilator, &["Asthma", "COPD exacerbation"]),
        (Corticosteroid, &["Allergic rhinitis", "Atopic dermatitis", "Acute asthma exacerbation"]),
        (Statin, &["Hyperlipidemia", "Secondary prevention of ASCVD"]),
        (ProtonPumpInhibitor, &["GERD", "Peptic ulcer disease"]),
        (Opioid, &["Severe cancer pain", "Acute postoperative pain"]),
    ];

    curated
        .iter()
        .map(|(class, list)| (*class, list.iter().map(|s| s.to_string()).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use median_contracts::medication::{DeaSchedule, FormularyStatus, Route, TherapeuticClass};

    use super::Formulary;

    #[test]
    fn standard_formulary_covers_every_route() {
        let formulary = Formulary::standard();
        let routes: HashSet<Route> = formulary.medications().iter().map(|m| m.route).collect();
        assert_eq!(routes.len(), 12);
    }

    #[test]
    fn standard_formulary_has_unique_codes() {
        let formulary = Formulary::standard();
        let codes: HashSet<&str> = formulary.medications().iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes.len(), formulary.len());
    }

    #[test]
    fn standard_formulary_mixes_tiers_and_schedules() {
        let formulary = Formulary::standard();
        let meds = formulary.medications();
        assert!(meds.iter().any(|m| m.formulary_status == FormularyStatus::NonPreferred));
        assert!(meds.iter().any(|m| m.formulary_status == FormularyStatus::NonFormulary));
        assert!(meds.iter().any(|m| m.dea_schedule == DeaSchedule::II));
        assert!(!formulary.controlled().is_empty());
    }

    #[test]
    fn antihistamines_have_no_curated_indication() {
        let formulary = Formulary::standard();
        assert!(formulary.indications_for(TherapeuticClass::Antihistamine).is_empty());
        assert!(!formulary.indications_for(TherapeuticClass::Statin).is_empty());
    }

    #[test]
    fn lookup_by_code_and_class() {
        let formulary = Formulary::standard();
        assert_eq!(formulary.get("MED-0003").map(|m| m.generic_name.as_str()), Some("Warfarin"));
        assert!(formulary.get("MED-9999").is_none());
        assert_eq!(formulary.by_class(TherapeuticClass::Opioid).len(), 3);
    }
}
