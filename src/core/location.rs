use crate::config::Config;
use crate::core::geocoder::ReverseGeocoder;
use crate::core::or_empty;
use crate::core::resolver::PlaceResolver;
use crate::core::zones::{ZoneLogic, validate_coordinates};
use crate::db::DataStore;
use crate::db::queries::{insert_location, load_locations};
use crate::errors::AppResult;
use crate::models::location::{LocationRecord, NewLocation, ResolvedLocation};
use crate::utils::time::to_storage;
use chrono::{DateTime, Utc};
use tracing::{error, info};

pub struct LocationLogic;

impl LocationLogic {
    pub async fn record(
        store: &dyn DataStore,
        technician_id: i64,
        lat: f64,
        lon: f64,
        at: DateTime<Utc>,
    ) -> AppResult<LocationRecord> {
        validate_coordinates(lat, lon)?;

        let new = NewLocation {
            technician_id,
            latitude: lat,
            longitude: lon,
            recorded_at: to_storage(&at),
        };
        let created = insert_location(store, &new).await?;
        info!(id = created.id, technician_id, "location recorded");
        Ok(created)
    }

    /// All locations, newest first, each labelled with a zone name or a
    /// geocoded address. A zone fetch failure blanks the whole list.
    pub async fn list_resolved(
        store: &dyn DataStore,
        cfg: &Config,
        geocoder: &dyn ReverseGeocoder,
    ) -> Vec<ResolvedLocation> {
        let zones = match ZoneLogic::load(store, cfg).await {
            Ok(z) => z,
            Err(e) => {
                error!(error = %e, "failed to load controlled zones");
                return Vec::new();
            }
        };

        let records = or_empty("locations", load_locations(store).await);
        PlaceResolver::new(&zones, geocoder)
            .annotate(records, cfg.geocoder.max_concurrency)
            .await
    }
}
