//! FDA AI/ML-enabled device compliance records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{impl_labeled, label::Labeled};

/// FDA device risk class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    I,
    II,
    III,
}

impl Labeled for DeviceClass {
    const KIND: &'static str = "device class";
    const ALL: &'static [Self] = &[DeviceClass::I, DeviceClass::II, DeviceClass::III];

    fn label(self) -> &'static str {
        match self {
            DeviceClass::I => "I",
            DeviceClass::II => "II",
            DeviceClass::III => "III",
        }
    }
}

impl_labeled!(DeviceClass);

/// Premarket submission pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegulatoryPathway {
    #[serde(rename = "510(k)")]
    Clearance510k,
    #[serde(rename = "De Novo")]
    DeNovo,
    #[serde(rename = "PMA")]
    Pma,
}

impl Labeled for RegulatoryPathway {
    const KIND: &'static str = "regulatory pathway";
    const ALL: &'static [Self] = &[
        RegulatoryPathway::Clearance510k,
        RegulatoryPathway::DeNovo,
        RegulatoryPathway::Pma,
    ];

    fn label(self) -> &'static str {
        match self {
            RegulatoryPathway::Clearance510k => "510(k)",
            RegulatoryPathway::DeNovo => "De Novo",
            RegulatoryPathway::Pma => "PMA",
        }
    }
}

impl_labeled!(RegulatoryPathway);

/// Regulatory standing of a deployed model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Cleared,
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "Post-Market Monitoring")]
    PostMarketMonitoring,
    Recalled,
}

impl ComplianceStatus {
    /// Cleared models and models under post-market monitoring carry a
    /// clearance date.
    pub fn has_clearance(self) -> bool {
        matches!(self, ComplianceStatus::Cleared | ComplianceStatus::PostMarketMonitoring)
    }
}

impl Labeled for ComplianceStatus {
    const KIND: &'static str = "compliance status";
    const ALL: &'static [Self] = &[
        ComplianceStatus::Cleared,
        ComplianceStatus::UnderReview,
        ComplianceStatus::PostMarketMonitoring,
        ComplianceStatus::Recalled,
    ];

    fn label(self) -> &'static str {
        match self {
            ComplianceStatus::Cleared => "Cleared",
            ComplianceStatus::UnderReview => "Under Review",
            ComplianceStatus::PostMarketMonitoring => "Post-Market Monitoring",
            ComplianceStatus::Recalled => "Recalled",
        }
    }
}

impl_labeled!(ComplianceStatus);

/// One AI model tracked in the compliance registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiModelRecord {
    pub id: uuid::Uuid,
    pub name: String,
    pub vendor: String,
    /// Clinical specialty, e.g. "Radiology".
    pub specialty: String,
    pub device_class: DeviceClass,
    pub pathway: RegulatoryPathway,
    pub status: ComplianceStatus,
    pub clearance_date: Option<NaiveDate>,
    /// Validation sensitivity, 0.80 to 0.99.
    pub sensitivity: f64,
    /// Validation specificity, 0.80 to 0.99.
    pub specificity: f64,
    pub last_audit: NaiveDate,
    pub open_findings: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceStats {
    pub total: usize,
    pub cleared: usize,
    pub under_review: usize,
    pub post_market: usize,
    pub recalled: usize,
    /// Mean sensitivity, 0.0 for an empty registry.
    pub average_sensitivity: f64,
    pub models_with_findings: usize,
}
