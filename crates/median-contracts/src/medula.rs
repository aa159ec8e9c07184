//! Medula (SGK insurance) billing records: SUT codes, provisions, invoices.
//!
//! Monetary amounts are kept in kuruş (1/100 TRY) so provision and invoice
//! totals add up exactly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{impl_labeled, label::Labeled};

/// Format an amount in kuruş as "1.234,56 TL".
pub fn format_try(kurus: u64) -> String {
    let lira = kurus / 100;
    let rest = kurus % 100;
    let digits = lira.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{},{:02} TL", grouped, rest)
}

/// Billing category of a SUT code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SutCategory {
    Examination,
    Laboratory,
    Radiology,
    Surgery,
    Pharmacy,
    Physiotherapy,
    Emergency,
}

impl Labeled for SutCategory {
    const KIND: &'static str = "SUT category";
    const ALL: &'static [Self] = &[
        SutCategory::Examination,
        SutCategory::Laboratory,
        SutCategory::Radiology,
        SutCategory::Surgery,
        SutCategory::Pharmacy,
        SutCategory::Physiotherapy,
        SutCategory::Emergency,
    ];

    fn label(self) -> &'static str {
        match self {
            SutCategory::Examination => "Examination",
            SutCategory::Laboratory => "Laboratory",
            SutCategory::Radiology => "Radiology",
            SutCategory::Surgery => "Surgery",
            SutCategory::Pharmacy => "Pharmacy",
            SutCategory::Physiotherapy => "Physiotherapy",
            SutCategory::Emergency => "Emergency",
        }
    }
}

impl_labeled!(SutCategory);

/// One entry of the SUT (Sağlık Uygulama Tebliği) billing catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SutCode {
    /// Code as published, e.g. "520.030".
    pub code: String,
    pub name: String,
    pub category: SutCategory,
    pub points: u32,
    pub price_kurus: u64,
    /// Flag for codes billed with a special justification (P-codes).
    #[serde(default)]
    pub special_code: bool,
}

/// Lifecycle of a provision (insurance pre-authorization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProvisionStatus {
    Approved,
    Pending,
    Rejected,
    Expired,
}

impl Labeled for ProvisionStatus {
    const KIND: &'static str = "provision status";
    const ALL: &'static [Self] = &[
        ProvisionStatus::Approved,
        ProvisionStatus::Pending,
        ProvisionStatus::Rejected,
        ProvisionStatus::Expired,
    ];

    fn label(self) -> &'static str {
        match self {
            ProvisionStatus::Approved => "Approved",
            ProvisionStatus::Pending => "Pending",
            ProvisionStatus::Rejected => "Rejected",
            ProvisionStatus::Expired => "Expired",
        }
    }
}

impl_labeled!(ProvisionStatus);

/// SGK coverage group of the insured patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceType {
    Employee,
    Retired,
    #[serde(rename = "Self-Employed")]
    SelfEmployed,
    #[serde(rename = "Green Card")]
    GreenCard,
}

impl Labeled for InsuranceType {
    const KIND: &'static str = "insurance type";
    const ALL: &'static [Self] = &[
        InsuranceType::Employee,
        InsuranceType::Retired,
        InsuranceType::SelfEmployed,
        InsuranceType::GreenCard,
    ];

    fn label(self) -> &'static str {
        match self {
            InsuranceType::Employee => "Employee",
            InsuranceType::Retired => "Retired",
            InsuranceType::SelfEmployed => "Self-Employed",
            InsuranceType::GreenCard => "Green Card",
        }
    }
}

impl_labeled!(InsuranceType);

/// Care setting the provision was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreatmentType {
    Outpatient,
    Inpatient,
    Emergency,
    #[serde(rename = "Day Treatment")]
    DayTreatment,
}

impl Labeled for TreatmentType {
    const KIND: &'static str = "treatment type";
    const ALL: &'static [Self] = &[
        TreatmentType::Outpatient,
        TreatmentType::Inpatient,
        TreatmentType::Emergency,
        TreatmentType::DayTreatment,
    ];

    fn label(self) -> &'static str {
        match self {
            TreatmentType::Outpatient => "Outpatient",
            TreatmentType::Inpatient => "Inpatient",
            TreatmentType::Emergency => "Emergency",
            TreatmentType::DayTreatment => "Day Treatment",
        }
    }
}

impl_labeled!(TreatmentType);

/// One provision record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provision {
    /// Medula takip number, e.g. "PRV-2026-004812".
    pub provision_number: String,
    pub patient_name: String,
    pub national_id: String,
    pub insurance_type: InsuranceType,
    pub treatment_type: TreatmentType,
    /// Clinic branch code, e.g. "1500" (cardiology).
    pub branch_code: String,
    pub date: NaiveDate,
    pub status: ProvisionStatus,
    /// SUT codes billed under this provision.
    pub sut_codes: Vec<String>,
    /// Sum of the billed SUT code prices.
    pub amount_kurus: u64,
    /// Present only when `status` is Rejected.
    pub rejection_reason: Option<String>,
}

/// Submission state of a monthly invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Submitted,
    Paid,
}

impl Labeled for InvoiceStatus {
    const KIND: &'static str = "invoice status";
    const ALL: &'static [Self] = &[InvoiceStatus::Draft, InvoiceStatus::Submitted, InvoiceStatus::Paid];

    fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Submitted => "Submitted",
            InvoiceStatus::Paid => "Paid",
        }
    }
}

impl_labeled!(InvoiceStatus);

/// Monthly invoice aggregating the provisions of one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// e.g. "INV-2026-10".
    pub invoice_number: String,
    /// "YYYY-MM".
    pub period: String,
    pub provision_numbers: Vec<String>,
    /// Sum of the Approved provisions in the period.
    pub total_kurus: u64,
    pub status: InvoiceStatus,
}

/// Provision counts by status plus the total billed amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedulaStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
    pub expired: usize,
    pub total_amount_kurus: u64,
}

#[cfg(test)]
mod tests {
    use super::format_try;

    #[test]
    fn format_try_groups_thousands() {
        assert_eq!(format_try(0), "0,00 TL");
        assert_eq!(format_try(5), "0,05 TL");
        assert_eq!(format_try(123_456), "1.234,56 TL");
        assert_eq!(format_try(100_000_000), "1.000.000,00 TL");
    }
}
