//! Customer case-study listing entries.

use serde::{Deserialize, Serialize};

use crate::{impl_labeled, label::Labeled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStudyCategory {
    Hospital,
    Pharmacy,
    Laboratory,
    Clinic,
    Insurance,
}

impl Labeled for CaseStudyCategory {
    const KIND: &'static str = "case study category";
    const ALL: &'static [Self] = &[
        CaseStudyCategory::Hospital,
        CaseStudyCategory::Pharmacy,
        CaseStudyCategory::Laboratory,
        CaseStudyCategory::Clinic,
        CaseStudyCategory::Insurance,
    ];

    fn label(self) -> &'static str {
        match self {
            CaseStudyCategory::Hospital => "Hospital",
            CaseStudyCategory::Pharmacy => "Pharmacy",
            CaseStudyCategory::Laboratory => "Laboratory",
            CaseStudyCategory::Clinic => "Clinic",
            CaseStudyCategory::Insurance => "Insurance",
        }
    }
}

impl_labeled!(CaseStudyCategory);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub slug: String,
    pub title: String,
    pub hospital: String,
    pub city: String,
    pub category: CaseStudyCategory,
    /// Median products deployed, e.g. "Median HBYS".
    pub products: Vec<String>,
    pub year: u16,
    /// One-line outcome, e.g. "38% shorter pharmacy queue".
    pub headline_metric: String,
}
