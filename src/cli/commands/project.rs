use super::{AssignOp, date_range, non_blank, run_assignment};
use crate::cli::parser::ProjectAction;
use crate::config::Config;
use crate::core::project::ProjectLogic;
use crate::db::open_store;
use crate::errors::{AppError, AppResult};
use crate::models::assignment::AssignmentKind;
use crate::models::project::NewProject;
use crate::ui::messages::{empty_list, header, success};
use crate::utils::date::{format_date, format_optional_date};
use crate::utils::formatting::or_dash;
use crate::utils::join_or_dash;
use crate::utils::table::{Column, Table};

pub async fn handle(action: &ProjectAction, cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;
    let store = store.as_ref();

    match action {
        ProjectAction::Add {
            name,
            duration,
            start,
            end,
        } => {
            if name.trim().is_empty() {
                return Err(AppError::Other("project name cannot be empty".into()));
            }
            let (start_date, end_date) = date_range(start, end.as_ref())?;

            let project = NewProject {
                name: name.trim().to_string(),
                duration: non_blank(duration.as_ref()),
                start_date,
                end_date,
            };
            let created = ProjectLogic::create(store, &project).await?;
            success(format!("Project #{} added: {}", created.id, created.name));
        }
        ProjectAction::List => {
            let projects = ProjectLogic::list(store).await;
            if projects.is_empty() {
                empty_list("projects");
                return Ok(());
            }

            header("Projects");
            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Name", 12),
                Column::new("Duration", 8),
                Column::new("Start", 10),
                Column::new("End", 10),
                Column::new("Technicians", 11),
            ]);
            for view in projects {
                let p = view.project;
                table.add_row(vec![
                    p.id.to_string(),
                    p.name,
                    or_dash(p.duration.as_deref()),
                    format_date(&p.start_date),
                    format_optional_date(p.end_date.as_ref()),
                    join_or_dash(&view.technicians),
                ]);
            }
            print!("{}", table.render());
        }
        ProjectAction::Assign(args) => {
            run_assignment(store, AssignmentKind::Project, AssignOp::Assign, args).await?;
        }
        ProjectAction::Unassign(args) => {
            run_assignment(store, AssignmentKind::Project, AssignOp::Unassign, args).await?;
        }
        ProjectAction::Toggle(args) => {
            run_assignment(store, AssignmentKind::Project, AssignOp::Toggle, args).await?;
        }
    }

    Ok(())
}
