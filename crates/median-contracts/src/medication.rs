//! Formulary catalog types.
//!
//! A `Medication` is an immutable catalog entry. Generated prescriptions hold
//! an owned snapshot of the entry they reference, so the catalog itself is
//! never borrowed past generation or mutated.

use serde::{Deserialize, Serialize};

use crate::{impl_labeled, label::Labeled};

/// Route of administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Oral,
    #[serde(rename = "IV")]
    Iv,
    #[serde(rename = "IM")]
    Im,
    #[serde(rename = "SC")]
    Sc,
    Topical,
    Inhalation,
    Ophthalmic,
    Otic,
    Rectal,
    Transdermal,
    Sublingual,
    Nasal,
}

impl Route {
    /// True for IV, IM, and SC.
    pub fn is_injectable(self) -> bool {
        matches!(self, Route::Iv | Route::Im | Route::Sc)
    }
}

impl Labeled for Route {
    const KIND: &'static str = "route";
    const ALL: &'static [Self] = &[
        Route::Oral,
        Route::Iv,
        Route::Im,
        Route::Sc,
        Route::Topical,
        Route::Inhalation,
        Route::Ophthalmic,
        Route::Otic,
        Route::Rectal,
        Route::Transdermal,
        Route::Sublingual,
        Route::Nasal,
    ];

    fn label(self) -> &'static str {
        match self {
            Route::Oral => "Oral",
            Route::Iv => "IV",
            Route::Im => "IM",
            Route::Sc => "SC",
            Route::Topical => "Topical",
            Route::Inhalation => "Inhalation",
            Route::Ophthalmic => "Ophthalmic",
            Route::Otic => "Otic",
            Route::Rectal => "Rectal",
            Route::Transdermal => "Transdermal",
            Route::Sublingual => "Sublingual",
            Route::Nasal => "Nasal",
        }
    }
}

impl_labeled!(Route);

/// Pharmacological class used to pick a plausible indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TherapeuticClass {
    Analgesic,
    Antibiotic,
    Anticoagulant,
    Antidiabetic,
    Antihypertensive,
    Antidepressant,
    Antipsychotic,
    Anticonvulsant,
    Bronchodilator,
    Corticosteroid,
    Statin,
    #[serde(rename = "Proton Pump Inhibitor")]
    ProtonPumpInhibitor,
    Opioid,
    Antihistamine,
}

impl Labeled for TherapeuticClass {
    const KIND: &'static str = "therapeutic class";
    const ALL: &'static [Self] = &[
        TherapeuticClass::Analgesic,
        TherapeuticClass::Antibiotic,
        TherapeuticClass::Anticoagulant,
        TherapeuticClass::Antidiabetic,
        TherapeuticClass::Antihypertensive,
        TherapeuticClass::Antidepressant,
        TherapeuticClass::Antipsychotic,
        TherapeuticClass::Anticonvulsant,
        TherapeuticClass::Bronchodilator,
        TherapeuticClass::Corticosteroid,
        TherapeuticClass::Statin,
        TherapeuticClass::ProtonPumpInhibitor,
        TherapeuticClass::Opioid,
        TherapeuticClass::Antihistamine,
    ];

    fn label(self) -> &'static str {
        match self {
            TherapeuticClass::Analgesic => "Analgesic",
            TherapeuticClass::Antibiotic => "Antibiotic",
            TherapeuticClass::Anticoagulant => "Anticoagulant",
            TherapeuticClass::Antidiabetic => "Antidiabetic",
            TherapeuticClass::Antihypertensive => "Antihypertensive",
            TherapeuticClass::Antidepressant => "Antidepressant",
            TherapeuticClass::Antipsychotic => "Antipsychotic",
            TherapeuticClass::Anticonvulsant => "Anticonvulsant",
            TherapeuticClass::Bronchodilator => "Bronchodilator",
            TherapeuticClass::Corticosteroid => "Corticosteroid",
            TherapeuticClass::Statin => "Statin",
            TherapeuticClass::ProtonPumpInhibitor => "Proton Pump Inhibitor",
            TherapeuticClass::Opioid => "Opioid",
            TherapeuticClass::Antihistamine => "Antihistamine",
        }
    }
}

impl_labeled!(TherapeuticClass);

/// U.S. DEA controlled-substance schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeaSchedule {
    I,
    II,
    III,
    IV,
    V,
    #[serde(rename = "Non-Controlled")]
    NonControlled,
}

impl DeaSchedule {
    pub fn is_controlled(self) -> bool {
        self != DeaSchedule::NonControlled
    }
}

impl Labeled for DeaSchedule {
    const KIND: &'static str = "DEA schedule";
    const ALL: &'static [Self] = &[
        DeaSchedule::I,
        DeaSchedule::II,
        DeaSchedule::III,
        DeaSchedule::IV,
        DeaSchedule::V,
        DeaSchedule::NonControlled,
    ];

    fn label(self) -> &'static str {
        match self {
            DeaSchedule::I => "I",
            DeaSchedule::II => "II",
            DeaSchedule::III => "III",
            DeaSchedule::IV => "IV",
            DeaSchedule::V => "V",
            DeaSchedule::NonControlled => "Non-Controlled",
        }
    }
}

impl_labeled!(DeaSchedule);

/// Formulary tier. Non-Preferred entries require prior authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormularyStatus {
    Preferred,
    #[serde(rename = "Non-Preferred")]
    NonPreferred,
    Restricted,
    #[serde(rename = "Non-Formulary")]
    NonFormulary,
}

impl FormularyStatus {
    pub fn requires_prior_auth(self) -> bool {
        self == FormularyStatus::NonPreferred
    }
}

impl Labeled for FormularyStatus {
    const KIND: &'static str = "formulary status";
    const ALL: &'static [Self] = &[
        FormularyStatus::Preferred,
        FormularyStatus::NonPreferred,
        FormularyStatus::Restricted,
        FormularyStatus::NonFormulary,
    ];

    fn label(self) -> &'static str {
        match self {
            FormularyStatus::Preferred => "Preferred",
            FormularyStatus::NonPreferred => "Non-Preferred",
            FormularyStatus::Restricted => "Restricted",
            FormularyStatus::NonFormulary => "Non-Formulary",
        }
    }
}

impl_labeled!(FormularyStatus);

/// One formulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    /// Catalog code, e.g. "MED-0001".
    pub code: String,
    pub generic_name: String,
    pub brand_name: String,
    /// Strength as printed on the label, e.g. "500 mg".
    pub strength: String,
    /// Dosage form, e.g. "tablet", "vial", "inhaler".
    pub dosage_form: String,
    pub route: Route,
    pub therapeutic_class: TherapeuticClass,
    pub dea_schedule: DeaSchedule,
    pub formulary_status: FormularyStatus,
    /// Reference price per dispensed unit.
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contraindications: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub side_effects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_note: Option<String>,
}

impl Medication {
    pub fn is_controlled(&self) -> bool {
        self.dea_schedule.is_controlled()
    }

    /// "Generic (Brand) strength", the form shown in pharmacy tables.
    pub fn display_name(&self) -> String {
        format!("{} ({}) {}", self.generic_name, self.brand_name, self.strength)
    }
}
