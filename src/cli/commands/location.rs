use crate::cli::parser::LocationAction;
use crate::config::Config;
use crate::core::geocoder::NominatimClient;
use crate::core::location::LocationLogic;
use crate::db::open_store;
use crate::errors::AppResult;
use crate::ui::messages::{empty_list, header, success};
use crate::utils::formatting::or_dash;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_utc, now_utc, parse_timestamp};

pub async fn handle(action: &LocationAction, cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;
    let store = store.as_ref();

    match action {
        LocationAction::Add {
            technician,
            lat,
            lon,
            at,
        } => {
            let at = match at {
                Some(raw) => parse_timestamp(raw)?,
                None => now_utc(),
            };
            let created = LocationLogic::record(store, *technician, *lat, *lon, at).await?;
            success(format!(
                "Location #{} recorded for technician #{} at {}",
                created.id,
                technician,
                format_utc(&created.recorded_at)
            ));
        }
        LocationAction::List => {
            let geocoder = NominatimClient::new(&cfg.geocoder)?;
            let locations = LocationLogic::list_resolved(store, cfg, &geocoder).await;
            if locations.is_empty() {
                empty_list("locations");
                return Ok(());
            }

            header("Technician locations (newest first)");
            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Place", 20),
                Column::new("Recorded (UTC)", 19),
                Column::new("Technician", 10),
            ]);
            for loc in locations {
                table.add_row(vec![
                    loc.record.id.to_string(),
                    loc.place.clone(),
                    loc.record.recorded_at_str(),
                    or_dash(loc.record.technician_name()),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
