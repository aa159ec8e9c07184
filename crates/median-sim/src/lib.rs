//! # median-sim
//!
//! Deterministic traffic, weather, and navigation simulator behind the
//! Median map demo.
//!
//! This crate provides:
//! - [`engine::transition`], the single pure state-transition function
//! - [`Simulator`], which owns a virtual timer set and drives the engine
//!   from externally supplied elapsed time
//! - the [`geo::GeoLocator`] seam with an Istanbul fallback
//!
//! ## Usage
//!
//! ```rust,ignore
//! use median_sim::{geo::UnavailableLocator, Simulator};
//!
//! let mut sim = Simulator::start(settings, &UnavailableLocator::default())?;
//! sim.advance_ticks(3);
//! let final_state = sim.teardown();
//! ```

pub mod engine;
pub mod geo;
pub mod navigation;
pub mod simulator;

pub use engine::SimEvent;
pub use simulator::Simulator;
