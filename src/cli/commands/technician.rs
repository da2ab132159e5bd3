use crate::cli::parser::TechnicianAction;
use crate::config::Config;
use crate::core::or_empty;
use crate::db::open_store;
use crate::db::queries::{insert_technician, load_technicians};
use crate::errors::{AppError, AppResult};
use crate::models::technician::NewTechnician;
use crate::ui::messages::{empty_list, success};
use crate::utils::table::{Column, Table};

pub async fn handle(action: &TechnicianAction, cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;

    match action {
        TechnicianAction::Add { name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::Other("technician name cannot be empty".into()));
            }
            let created = insert_technician(
                store.as_ref(),
                &NewTechnician {
                    name: name.to_string(),
                },
            )
            .await?;
            success(format!("Technician #{} added: {}", created.id, created.name));
        }
        TechnicianAction::List => {
            let technicians = or_empty("technicians", load_technicians(store.as_ref()).await);
            if technicians.is_empty() {
                empty_list("technicians");
                return Ok(());
            }

            let mut table = Table::new(vec![Column::new("ID", 4), Column::new("Name", 10)]);
            for t in technicians {
                table.add_row(vec![t.id.to_string(), t.name]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
