use crate::cli::parser::ZoneAction;
use crate::config::{Config, ZoneSource};
use crate::core::geocoder::NominatimClient;
use crate::core::or_empty;
use crate::core::resolver::PlaceResolver;
use crate::core::zones::{ZoneLogic, validate_coordinates};
use crate::db::open_store;
use crate::errors::AppResult;
use crate::models::zone::Zone;
use crate::ui::messages::{empty_list, header, success, warning};
use crate::utils::colors::{CYAN, RESET};
use crate::utils::table::{Column, Table};

pub async fn handle(action: &ZoneAction, cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;
    let store = store.as_ref();

    match action {
        ZoneAction::Add {
            name,
            lat,
            lon,
            tolerance,
        } => {
            let zone = Zone::new(name.trim(), *lat, *lon, *tolerance);
            let created = ZoneLogic::add(store, &zone).await?;
            success(format!("Zone added: {}", created.name));
            if cfg.zones.source == ZoneSource::Config {
                warning("zones.source is 'config': stored zones are not used for matching");
            }
        }
        ZoneAction::List => {
            let zones = or_empty("controlled zones", ZoneLogic::load(store, cfg).await);
            if zones.is_empty() {
                empty_list("zones");
                return Ok(());
            }

            header("Controlled zones (match order)");
            let mut table = Table::new(vec![
                Column::new("#", 2),
                Column::new("Name", 12),
                Column::new("Latitude", 10),
                Column::new("Longitude", 11),
                Column::new("Tolerance", 9),
            ]);
            for (i, z) in zones.into_iter().enumerate() {
                table.add_row(vec![
                    (i + 1).to_string(),
                    z.name,
                    format!("{:.6}", z.lat),
                    format!("{:.6}", z.lon),
                    z.tolerance.to_string(),
                ]);
            }
            print!("{}", table.render());
        }
        ZoneAction::Resolve { lat, lon } => {
            validate_coordinates(*lat, *lon)?;
            let zones = or_empty("controlled zones", ZoneLogic::load(store, cfg).await);
            let geocoder = NominatimClient::new(&cfg.geocoder)?;
            let place = PlaceResolver::new(&zones, &geocoder).resolve(*lat, *lon).await;
            println!("{CYAN}{place}{RESET}");
        }
    }

    Ok(())
}
