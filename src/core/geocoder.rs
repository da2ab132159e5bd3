//! Reverse geocoding fallback for coordinates that match no zone.
//!
//! The lookup service is best-effort: [`describe`] never fails, it degrades
//! to [`GEOLOCATION_ERROR`] and logs the cause.

use crate::config::GeocoderConfig;
use crate::errors::AppResult;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const ADDRESS_NOT_FOUND: &str = "Address not found";
pub const GEOLOCATION_ERROR: &str = "Geolocation error";

/// The subset of a structured address used for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressParts {
    pub road: Option<String>,
    pub neighbourhood: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl AddressParts {
    /// Present, non-empty fields in display order.
    pub fn fields(&self) -> Vec<&str> {
        [
            &self.road,
            &self.neighbourhood,
            &self.suburb,
            &self.city,
            &self.state,
            &self.country,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
    }
}

/// Join the present fields with ", ", or [`ADDRESS_NOT_FOUND`].
pub fn format_address(parts: &AddressParts) -> String {
    let fields = parts.fields();
    if fields.is_empty() {
        ADDRESS_NOT_FOUND.to_string()
    } else {
        fields.join(", ")
    }
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn lookup(&self, lat: f64, lon: f64) -> AppResult<AddressParts>;
}

/// Nominatim-compatible `/reverse` client.
pub struct NominatimClient {
    url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ReverseResponse {
    address: AddressParts,
}

impl NominatimClient {
    pub fn new(cfg: &GeocoderConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(cfg.user_agent.clone());
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            url: cfg.url.clone(),
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn lookup(&self, lat: f64, lon: f64) -> AppResult<AddressParts> {
        debug!(lat, lon, url = %self.url, "reverse geocoding");

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ReverseResponse = response.json().await?;
        Ok(body.address)
    }
}

/// Display string for a coordinate pair. Lookup failures are swallowed.
pub async fn describe(geocoder: &dyn ReverseGeocoder, lat: f64, lon: f64) -> String {
    match geocoder.lookup(lat, lon).await {
        Ok(parts) => format_address(&parts),
        Err(e) => {
            warn!(lat, lon, error = %e, "address lookup failed");
            GEOLOCATION_ERROR.to_string()
        }
    }
}
