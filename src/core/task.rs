use crate::core::assignment::AssignLogic;
use crate::core::or_empty;
use crate::db::DataStore;
use crate::db::queries::{
    insert_assignments, insert_task, load_task, load_tasks, load_technicians, update_task_note,
    update_task_state,
};
use crate::errors::AppResult;
use crate::models::assignment::{Assignment, AssignmentKind};
use crate::models::task::{NewTask, Task};
use crate::models::technician::names_for;
use tracing::{error, info, warn};

/// A task row as the list shows it.
#[derive(Debug, Clone)]
pub struct TaskView {
    pub task: Task,
    pub technicians: Vec<String>,
}

pub struct TaskLogic;

impl TaskLogic {
    /// Insert the task, then its technician assignments.
    ///
    /// The two writes are independent: when the second fails the task stays
    /// in place without assignments and the error is returned.
    pub async fn create(
        store: &dyn DataStore,
        task: &NewTask,
        technicians: &[i64],
    ) -> AppResult<Task> {
        let created = insert_task(store, task).await?;
        info!(id = created.id, name = %created.name, "task created");

        let mut pairs: Vec<Assignment> = Vec::with_capacity(technicians.len());
        for &technician_id in technicians {
            let pair = Assignment {
                entity_id: created.id,
                technician_id,
            };
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }

        if let Err(e) = insert_assignments(store, AssignmentKind::Task, &pairs).await {
            warn!(id = created.id, error = %e, "task saved without assignments");
            return Err(e);
        }

        Ok(created)
    }

    /// Flip `pending` ⇄ `complete`. Only the state column is written.
    pub async fn toggle_state(store: &dyn DataStore, id: i64) -> AppResult<Task> {
        let current = load_task(store, id).await?;
        let toggled = current.with_toggled_state();
        update_task_state(store, id, toggled.state).await?;
        info!(id, state = toggled.state.to_db_str(), "task state changed");
        Ok(toggled)
    }

    pub async fn update_note(store: &dyn DataStore, id: i64, note: &str) -> AppResult<()> {
        update_task_note(store, id, note).await?;
        info!(id, "task note updated");
        Ok(())
    }

    /// Tasks with their assigned technician names. Read failures yield an
    /// empty list.
    pub async fn list(store: &dyn DataStore, project_id: Option<i64>) -> Vec<TaskView> {
        let tasks = or_empty("tasks", load_tasks(store, project_id).await);
        if tasks.is_empty() {
            return Vec::new();
        }

        let technicians = or_empty("technicians", load_technicians(store).await);
        let assignments = AssignLogic::load_map(store, AssignmentKind::Task)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "failed to load task assignments");
                Default::default()
            });

        tasks
            .into_iter()
            .map(|task| {
                let ids = assignments.technicians(task.id);
                TaskView {
                    technicians: names_for(&technicians, &ids),
                    task,
                }
            })
            .collect()
    }
}
