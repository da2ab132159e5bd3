use super::{AssignOp, date_range, non_blank, run_assignment};
use crate::cli::parser::TaskAction;
use crate::config::Config;
use crate::core::task::TaskLogic;
use crate::db::open_store;
use crate::errors::{AppError, AppResult};
use crate::models::assignment::AssignmentKind;
use crate::models::task::NewTask;
use crate::models::task_state::TaskState;
use crate::ui::messages::{empty_list, header, success};
use crate::utils::colors::colorize_state;
use crate::utils::date::{format_date, format_optional_date};
use crate::utils::formatting::{or_dash, truncate};
use crate::utils::join_or_dash;
use crate::utils::table::{Column, Table};

const NOTE_WIDTH: usize = 40;

pub async fn handle(action: &TaskAction, cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;
    let store = store.as_ref();

    match action {
        TaskAction::Add {
            name,
            project,
            duration,
            start,
            end,
            state,
            note,
            technicians,
        } => {
            if name.trim().is_empty() {
                return Err(AppError::Other("task name cannot be empty".into()));
            }
            let (start_date, end_date) = date_range(start, end.as_ref())?;
            let state = TaskState::from_db_str(state)
                .ok_or_else(|| AppError::InvalidState(state.clone()))?;

            let task = NewTask {
                name: name.trim().to_string(),
                duration: non_blank(duration.as_ref()),
                start_date,
                end_date,
                project_id: *project,
                state,
                note: non_blank(note.as_ref()),
            };
            let created = TaskLogic::create(store, &task, technicians).await?;
            success(format!(
                "Task #{} added to project #{}: {}",
                created.id, created.project_id, created.name
            ));
        }
        TaskAction::List { project } => {
            let tasks = TaskLogic::list(store, *project).await;
            if tasks.is_empty() {
                empty_list("tasks");
                return Ok(());
            }

            header("Tasks");
            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Name", 12),
                Column::new("Project", 10),
                Column::new("State", 8),
                Column::new("Start", 10),
                Column::new("End", 10),
                Column::new("Duration", 8),
                Column::new("Technicians", 11),
                Column::new("Note", 4),
            ]);
            for view in tasks {
                let t = view.task;
                table.add_row(vec![
                    t.id.to_string(),
                    t.name.clone(),
                    or_dash(t.project_name()),
                    t.state.to_db_str().to_string(),
                    format_date(&t.start_date),
                    format_optional_date(t.end_date.as_ref()),
                    or_dash(t.duration.as_deref()),
                    join_or_dash(&view.technicians),
                    truncate(&or_dash(t.note.as_deref()), NOTE_WIDTH),
                ]);
            }
            print!("{}", table.render());
        }
        TaskAction::ToggleState { id } => {
            let task = TaskLogic::toggle_state(store, *id).await?;
            success(format!(
                "Task #{} is now {}",
                task.id,
                colorize_state(task.state)
            ));
        }
        TaskAction::Note { id, text } => {
            TaskLogic::update_note(store, *id, text).await?;
            success(format!("Note of task #{id} updated"));
        }
        TaskAction::Assign(args) => {
            run_assignment(store, AssignmentKind::Task, AssignOp::Assign, args).await?;
        }
        TaskAction::Unassign(args) => {
            run_assignment(store, AssignmentKind::Task, AssignOp::Unassign, args).await?;
        }
        TaskAction::Toggle(args) => {
            run_assignment(store, AssignmentKind::Task, AssignOp::Toggle, args).await?;
        }
    }

    Ok(())
}
