//! Location → display name: zone table first, geocoder second.

use crate::core::geocoder::{ReverseGeocoder, describe};
use crate::core::zone_matcher::match_zone;
use crate::models::location::{LocationRecord, ResolvedLocation};
use crate::models::zone::Zone;
use futures::stream::{self, StreamExt};

pub struct PlaceResolver<'a> {
    zones: &'a [Zone],
    geocoder: &'a dyn ReverseGeocoder,
}

impl<'a> PlaceResolver<'a> {
    pub fn new(zones: &'a [Zone], geocoder: &'a dyn ReverseGeocoder) -> Self {
        Self { zones, geocoder }
    }

    pub async fn resolve(&self, lat: f64, lon: f64) -> String {
        if let Some(name) = match_zone(lat, lon, self.zones) {
            return name.to_string();
        }
        describe(self.geocoder, lat, lon).await
    }

    /// Resolve every record, at most `concurrency` lookups in flight.
    /// Output order matches input order.
    pub async fn annotate(
        &self,
        records: Vec<LocationRecord>,
        concurrency: usize,
    ) -> Vec<ResolvedLocation> {
        stream::iter(records)
            .map(|record| async move {
                let place = self.resolve(record.latitude, record.longitude).await;
                ResolvedLocation { record, place }
            })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}
