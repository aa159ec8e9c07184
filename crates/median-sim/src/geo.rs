//! Geolocation seam.
//!
//! The simulator asks a `GeoLocator` for the vehicle's start position once,
//! at start-up. Hosts plug in whatever source they have; tests use
//! [`FixedLocator`] and [`UnavailableLocator`].

use tracing::{debug, warn};

use median_contracts::{
    error::{MedianError, MedianResult},
    simulation::GeoPoint,
};

/// Start position used when no location can be obtained: central Istanbul.
pub const ISTANBUL: GeoPoint = GeoPoint { lat: 41.0082, lon: 28.9784 };

/// A source of the current position.
pub trait GeoLocator {
    /// Return the current position, or `MedianError::Geolocation` when the
    /// source is unavailable or denied.
    fn locate(&self) -> MedianResult<GeoPoint>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocator(pub GeoPoint);

impl GeoLocator for FixedLocator {
    fn locate(&self) -> MedianResult<GeoPoint> {
        Ok(self.0)
    }
}

/// A locator with no position source; every call fails.
#[derive(Debug, Clone, Default)]
pub struct UnavailableLocator {
    pub reason: String,
}

impl UnavailableLocator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl GeoLocator for UnavailableLocator {
    fn locate(&self) -> MedianResult<GeoPoint> {
        Err(MedianError::Geolocation {
            reason: if self.reason.is_empty() {
                "no position source configured".to_string()
            } else {
                self.reason.clone()
            },
        })
    }
}

/// Ask `locator` for a position, falling back to [`ISTANBUL`] on error.
pub fn locate_or_fallback(locator: &dyn GeoLocator) -> GeoPoint {
    match locator.locate() {
        Ok(point) => {
            debug!(lat = point.lat, lon = point.lon, "start position located");
            point
        }
        Err(e) => {
            warn!(error = %e, lat = ISTANBUL.lat, lon = ISTANBUL.lon, "using fallback start position");
            ISTANBUL
        }
    }
}
