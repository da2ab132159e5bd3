use crate::config::{Config, ZoneSource};
use crate::db::DataStore;
use crate::db::queries::{insert_zone, load_zones};
use crate::errors::{AppError, AppResult};
use crate::models::zone::Zone;
use tracing::info;

pub struct ZoneLogic;

impl ZoneLogic {
    /// Zones in match order, from the store or the configuration file.
    pub async fn load(store: &dyn DataStore, cfg: &Config) -> AppResult<Vec<Zone>> {
        match cfg.zones.source {
            ZoneSource::Store => load_zones(store).await,
            ZoneSource::Config => Ok(cfg.zones.list.clone()),
        }
    }

    pub async fn add(store: &dyn DataStore, zone: &Zone) -> AppResult<Zone> {
        validate_coordinates(zone.lat, zone.lon)?;
        if !zone.tolerance.is_finite() || zone.tolerance < 0.0 {
            return Err(AppError::InvalidCoordinate(format!(
                "tolerance must be a non-negative number, got {}",
                zone.tolerance
            )));
        }
        if zone.name.trim().is_empty() {
            return Err(AppError::Other("zone name cannot be empty".into()));
        }

        let created = insert_zone(store, zone).await?;
        info!(name = %created.name, "zone registered");
        Ok(created)
    }
}

pub fn validate_coordinates(lat: f64, lon: f64) -> AppResult<()> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::InvalidCoordinate(format!(
            "latitude {lat} is outside [-90, 90]"
        )));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::InvalidCoordinate(format!(
            "longitude {lon} is outside [-180, 180]"
        )));
    }
    Ok(())
}
