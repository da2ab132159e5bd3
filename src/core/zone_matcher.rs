//! Classification of raw coordinates against named zones.

use crate::models::zone::Zone;

/// Name of the first zone (in list order) containing `(lat, lon)`.
///
/// Latitude and longitude are checked independently against the zone's
/// tolerance; overlapping zones are not ranked by distance.
pub fn match_zone(lat: f64, lon: f64, zones: &[Zone]) -> Option<&str> {
    zones
        .iter()
        .find(|z| z.contains(lat, lon))
        .map(|z| z.name.as_str())
}
