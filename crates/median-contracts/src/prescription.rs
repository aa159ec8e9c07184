//! Generated prescription records and pharmacy dashboard stats.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{impl_labeled, label::Labeled, medication::Medication};

/// Lifecycle status shown in the pharmacy queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrescriptionStatus {
    Pending,
    Verified,
    Dispensed,
    Completed,
    Cancelled,
    Hold,
    Discontinued,
}

impl Labeled for PrescriptionStatus {
    const KIND: &'static str = "prescription status";
    const ALL: &'static [Self] = &[
        PrescriptionStatus::Pending,
        PrescriptionStatus::Verified,
        PrescriptionStatus::Dispensed,
        PrescriptionStatus::Completed,
        PrescriptionStatus::Cancelled,
        PrescriptionStatus::Hold,
        PrescriptionStatus::Discontinued,
    ];

    fn label(self) -> &'static str {
        match self {
            PrescriptionStatus::Pending => "Pending",
            PrescriptionStatus::Verified => "Verified",
            PrescriptionStatus::Dispensed => "Dispensed",
            PrescriptionStatus::Completed => "Completed",
            PrescriptionStatus::Cancelled => "Cancelled",
            PrescriptionStatus::Hold => "Hold",
            PrescriptionStatus::Discontinued => "Discontinued",
        }
    }
}

impl_labeled!(PrescriptionStatus);

/// State of a prior-authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorAuthStatus {
    Pending,
    Approved,
    Denied,
}

impl Labeled for PriorAuthStatus {
    const KIND: &'static str = "prior authorization status";
    const ALL: &'static [Self] = &[
        PriorAuthStatus::Pending,
        PriorAuthStatus::Approved,
        PriorAuthStatus::Denied,
    ];

    fn label(self) -> &'static str {
        match self {
            PriorAuthStatus::Pending => "Pending",
            PriorAuthStatus::Approved => "Approved",
            PriorAuthStatus::Denied => "Denied",
        }
    }
}

impl_labeled!(PriorAuthStatus);

/// Prior-authorization fields. Present only for Non-Preferred medications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorAuth {
    pub status: PriorAuthStatus,
    /// Payer reference, e.g. "PA-204817".
    pub reference: String,
}

/// Synthetic patient identity. No real person is ever represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    /// Hospital medical record number, e.g. "MRN-0048213".
    pub mrn: String,
    /// 11-digit national identity number (synthetic, not checksum-valid).
    pub national_id: String,
    pub birth_date: NaiveDate,
}

/// Synthetic prescriber identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescriber {
    pub name: String,
    pub specialty: String,
    pub license_number: String,
}

/// Structured dose frequency carried alongside the directions text.
///
/// The directions sentence is rendered from this value, so the dispensed
/// quantity never depends on re-reading the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dosing {
    pub doses_per_day: u32,
    pub units_per_dose: u32,
}

impl Dosing {
    pub fn new(doses_per_day: u32, units_per_dose: u32) -> Self {
        Self { doses_per_day, units_per_dose }
    }

    /// Units consumed per day, or `None` if the product overflows `u32`.
    pub fn daily_units(self) -> Option<u32> {
        self.doses_per_day.checked_mul(self.units_per_dose)
    }

    /// Units to dispense for `days_supply` days, or `None` on overflow.
    pub fn quantity_for(self, days_supply: u32) -> Option<u32> {
        self.daily_units()?.checked_mul(days_supply)
    }
}

/// One generated prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: uuid::Uuid,
    /// Pharmacy-facing number, e.g. "RX-4402917".
    pub rx_number: String,
    pub patient: Patient,
    pub prescriber: Prescriber,
    pub medication: Medication,
    pub status: PrescriptionStatus,
    pub indication: String,
    pub write_date: NaiveDate,
    pub days_supply: u32,
    pub refills: u32,
    pub refills_remaining: u32,
    pub directions: String,
    pub dosing: Dosing,
    pub quantity: u32,
    /// `write_date + days_supply` when refills were authorized.
    pub next_refill_date: Option<NaiveDate>,
    pub prior_auth: Option<PriorAuth>,
}

impl Prescription {
    pub fn prior_auth_required(&self) -> bool {
        self.prior_auth.is_some()
    }

    pub fn is_controlled(&self) -> bool {
        self.medication.is_controlled()
    }
}

/// Aggregates shown on the pharmacy dashboard.
///
/// Always computed from the prescription slice it is given; nothing here is
/// meant to be cached across changes to that slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacyStats {
    pub total_prescriptions: usize,
    pub pending: usize,
    pub verified: usize,
    pub dispensed: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub hold: usize,
    pub discontinued: usize,
    /// Prior authorization required and still pending.
    pub prior_auth_needed: usize,
    /// Schedule I through V.
    pub controlled_substances: usize,
    /// Next refill date reached and refills still remaining.
    pub refills_due: usize,
}

impl PharmacyStats {
    /// Count for one status.
    pub fn count(&self, status: PrescriptionStatus) -> usize {
        match status {
            PrescriptionStatus::Pending => self.pending,
            PrescriptionStatus::Verified => self.verified,
            PrescriptionStatus::Dispensed => self.dispensed,
            PrescriptionStatus::Completed => self.completed,
            PrescriptionStatus::Cancelled => self.cancelled,
            PrescriptionStatus::Hold => self.hold,
            PrescriptionStatus::Discontinued => self.discontinued,
        }
    }

    pub(crate) fn count_mut(&mut self, status: PrescriptionStatus) -> &mut usize {
        match status {
            PrescriptionStatus::Pending => &mut self.pending,
            PrescriptionStatus::Verified => &mut self.verified,
            PrescriptionStatus::Dispensed => &mut self.dispensed,
            PrescriptionStatus::Completed => &mut self.completed,
            PrescriptionStatus::Cancelled => &mut self.cancelled,
            PrescriptionStatus::Hold => &mut self.hold,
            PrescriptionStatus::Discontinued => &mut self.discontinued,
        }
    }

    /// Record one prescription with the given status.
    pub fn record_status(&mut self, status: PrescriptionStatus) {
        *self.count_mut(status) += 1;
    }
}
