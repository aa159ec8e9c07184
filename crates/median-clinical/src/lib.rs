//! # median-clinical
//!
//! Seedable mock-data service behind the Median demo pages.
//!
//! Every generator takes an injected RNG and an explicit `today`, so a fixed
//! seed reproduces the same batch on any machine. [`seed::SeedStreams`] fans
//! one user seed out into independent per-domain streams.
//!
//! - **Pharmacy**: [`formulary::Formulary`], [`pharmacy::generate_prescriptions`],
//!   [`stats::calculate_pharmacy_stats`] and the status/search filters.
//! - **Medula**: SUT catalog search, provision generation, monthly invoices.
//! - **Compliance**: FDA AI-model registry records and stats.
//! - **Case studies**: static catalog with category, text and product filters.
//!
//! [`invariants::check_prescription_batch`] and [`fingerprint::fingerprint`]
//! let callers confirm a batch is internally consistent and reproducible.
//!
//! All names and identifiers are fictional.

pub mod case_studies;
pub mod compliance;
pub mod directions;
pub mod fingerprint;
pub mod formulary;
pub mod invariants;
pub mod medula;
pub mod mock_data;
pub mod pharmacy;
pub mod seed;
pub mod stats;
