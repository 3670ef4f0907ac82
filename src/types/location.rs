//! Geographic location.

use serde::{Deserialize, Serialize};

/// An immutable geo-coordinate pair with an optional human label.
///
/// Equality is coordinate equality; the label carries no identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            label: None,
        }
    }

    pub fn labeled(latitude: f64, longitude: f64, label: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            label: Some(label.into()),
        }
    }

    /// `true` when both coordinates are finite and within their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}
