pub mod config;
pub mod init;
pub mod location;
pub mod project;
pub mod task;
pub mod technician;
pub mod zone;

use crate::core::assignment::AssignLogic;
use crate::core::or_empty;
use crate::db::DataStore;
use crate::db::queries::load_technicians;
use crate::errors::{AppError, AppResult};
use crate::models::assignment::{AssignmentKind, AssignmentMap, Toggle};
use crate::models::technician::{Technician, names_for};
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_date;
use crate::utils::join_or_dash;
use chrono::NaiveDate;

use super::parser::AssignmentArgs;

pub(crate) fn required_date(flag: &str, raw: &str) -> AppResult<NaiveDate> {
    parse_date(raw)
        .ok_or_else(|| AppError::InvalidDate(format!("{flag}: '{raw}' (expected YYYY-MM-DD)")))
}

pub(crate) fn optional_date(flag: &str, raw: Option<&String>) -> AppResult<Option<NaiveDate>> {
    raw.map(|r| required_date(flag, r)).transpose()
}

/// Start/end pair; an end before the start is rejected.
pub(crate) fn date_range(
    start: &str,
    end: Option<&String>,
) -> AppResult<(NaiveDate, Option<NaiveDate>)> {
    let start = required_date("--start", start)?;
    let end = optional_date("--end", end)?;
    if let Some(e) = end
        && e < start
    {
        return Err(AppError::InvalidDate(format!(
            "end date {e} is before start date {start}"
        )));
    }
    Ok((start, end))
}

/// Empty or blank labels are stored as absent.
pub(crate) fn non_blank(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn print_staff(technicians: &[Technician], kind: AssignmentKind, id: i64, map: &AssignmentMap) {
    let names = names_for(technicians, &map.technicians(id));
    println!("Technicians on {} #{}: {}", kind.label(), id, join_or_dash(&names));
}

pub(crate) enum AssignOp {
    Assign,
    Unassign,
    Toggle,
}

/// Shared by `project` and `task`: mutate one pair, then show the reloaded
/// technicians of that entity.
pub(crate) async fn run_assignment(
    store: &dyn DataStore,
    kind: AssignmentKind,
    op: AssignOp,
    args: &AssignmentArgs,
) -> AppResult<()> {
    let map = match op {
        AssignOp::Assign => {
            match AssignLogic::assign(store, kind, args.id, args.technician).await {
                Ok(map) => {
                    success(format!(
                        "Technician #{} assigned to {} #{}",
                        args.technician,
                        kind.label(),
                        args.id
                    ));
                    map
                }
                Err(e @ AppError::AlreadyAssigned { .. }) => {
                    warning(e);
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
        AssignOp::Unassign => {
            let map = AssignLogic::unassign(store, kind, args.id, args.technician).await?;
            success(format!(
                "Technician #{} removed from {} #{}",
                args.technician,
                kind.label(),
                args.id
            ));
            map
        }
        AssignOp::Toggle => {
            let (action, map) = AssignLogic::toggle(store, kind, args.id, args.technician).await?;
            let verb = match action {
                Toggle::Added => "assigned to",
                Toggle::Removed => "removed from",
            };
            success(format!(
                "Technician #{} {} {} #{}",
                args.technician,
                verb,
                kind.label(),
                args.id
            ));
            map
        }
    };

    let technicians = or_empty("technicians", load_technicians(store).await);
    print_staff(&technicians, kind, args.id, &map);
    Ok(())
}
