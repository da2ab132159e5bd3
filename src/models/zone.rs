use serde::{Deserialize, Serialize};

/// A named reference point. `tolerance` is a per-axis bound in degrees,
/// applied to latitude and longitude independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub tolerance: f64,
}

impl Zone {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64, tolerance: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            tolerance,
        }
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (lat - self.lat).abs() <= self.tolerance && (lon - self.lon).abs() <= self.tolerance
    }
}
