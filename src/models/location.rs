use super::EmbeddedName;
use crate::utils::time::{format_utc, parse_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A geolocation ping sent by a technician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub technician_id: Option<i64>,

    /// ⇔ embedded `technicians(name)`
    #[serde(rename = "technicians", default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<EmbeddedName>,
}

impl LocationRecord {
    pub fn technician_name(&self) -> Option<&str> {
        self.technician.as_ref().map(|t| t.name.as_str())
    }

    pub fn recorded_at_str(&self) -> String {
        format_utc(&self.recorded_at)
    }
}

/// A location record annotated with its computed display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    pub record: LocationRecord,
    pub place: String,
}

/// Insert payload for `locations`.
#[derive(Debug, Clone, Serialize)]
pub struct NewLocation {
    pub technician_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: String, // RFC 3339, UTC
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
