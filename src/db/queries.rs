use crate::db::DataStore;
use crate::db::query::{Direction, Filter, Select, Table};
use crate::errors::{AppError, AppResult};
use crate::models::assignment::{Assignment, AssignmentKind};
use crate::models::location::{LocationRecord, NewLocation};
use crate::models::project::{NewProject, Project};
use crate::models::task::{NewTask, Task};
use crate::models::task_state::TaskState;
use crate::models::technician::{NewTechnician, Technician};
use crate::models::zone::Zone;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

fn decode<T: DeserializeOwned>(rows: Vec<Value>) -> AppResult<Vec<T>> {
    rows.into_iter()
        .map(|r| serde_json::from_value(r).map_err(AppError::from))
        .collect()
}

fn encode<T: Serialize>(row: &T) -> AppResult<Value> {
    Ok(serde_json::to_value(row)?)
}

/// First decoded row, or an "insert returned nothing" error.
fn first<T: DeserializeOwned>(rows: Vec<Value>, table: Table) -> AppResult<T> {
    decode::<T>(rows)?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Other(format!("{table}: store returned no row")))
}

// ---------------------------
// Technicians
// ---------------------------

pub async fn load_technicians(store: &dyn DataStore) -> AppResult<Vec<Technician>> {
    let q = Select::new(Table::Technicians)
        .columns(&["id", "name"])
        .order_by("id", Direction::Asc);
    decode(store.select(&q).await?)
}

pub async fn insert_technician(store: &dyn DataStore, t: &NewTechnician) -> AppResult<Technician> {
    let rows = store.insert(Table::Technicians, vec![encode(t)?]).await?;
    first(rows, Table::Technicians)
}

// ---------------------------
// Projects
// ---------------------------

pub async fn load_projects(store: &dyn DataStore) -> AppResult<Vec<Project>> {
    let q = Select::new(Table::Projects).order_by("id", Direction::Asc);
    decode(store.select(&q).await?)
}

pub async fn insert_project(store: &dyn DataStore, p: &NewProject) -> AppResult<Project> {
    let rows = store.insert(Table::Projects, vec![encode(p)?]).await?;
    first(rows, Table::Projects)
}

// ---------------------------
// Tasks
// ---------------------------

fn task_select() -> Select {
    Select::new(Table::Tasks)
        .columns(&[
            "id",
            "name",
            "duration",
            "start_date",
            "end_date",
            "project_id",
            "state",
            "note",
        ])
        .embed(Table::Projects, "project_id", &["name"])
}

/// Tasks ordered by start date, optionally restricted to one project.
pub async fn load_tasks(store: &dyn DataStore, project_id: Option<i64>) -> AppResult<Vec<Task>> {
    let mut q = task_select().order_by("start_date", Direction::Asc);
    if let Some(pid) = project_id {
        q = q.eq("project_id", pid);
    }
    decode(store.select(&q).await?)
}

pub async fn load_task(store: &dyn DataStore, id: i64) -> AppResult<Task> {
    let q = task_select().eq("id", id);
    decode::<Task>(store.select(&q).await?)?
        .into_iter()
        .next()
        .ok_or(AppError::NotFound { entity: "task", id })
}

pub async fn insert_task(store: &dyn DataStore, t: &NewTask) -> AppResult<Task> {
    let rows = store.insert(Table::Tasks, vec![encode(t)?]).await?;
    first(rows, Table::Tasks)
}

async fn patch_task(store: &dyn DataStore, id: i64, patch: Value) -> AppResult<()> {
    let updated = store
        .update(Table::Tasks, patch, &[Filter::eq("id", id)])
        .await?;
    if updated.is_empty() {
        return Err(AppError::NotFound { entity: "task", id });
    }
    Ok(())
}

/// Patch only the `state` column.
pub async fn update_task_state(store: &dyn DataStore, id: i64, state: TaskState) -> AppResult<()> {
    patch_task(store, id, json!({ "state": state.to_db_str() })).await
}

/// Patch only the `note` column.
pub async fn update_task_note(store: &dyn DataStore, id: i64, note: &str) -> AppResult<()> {
    patch_task(store, id, json!({ "note": note })).await
}

// ---------------------------
// Assignments
// ---------------------------

fn assignment_from_row(kind: AssignmentKind, row: &Value) -> AppResult<Assignment> {
    let field = |col: &str| {
        row.get(col).and_then(Value::as_i64).ok_or_else(|| {
            AppError::Other(format!("{}: row without integer '{}'", kind.table(), col))
        })
    };

    Ok(Assignment {
        entity_id: field(kind.entity_column())?,
        technician_id: field("technician_id")?,
    })
}

fn assignment_to_row(kind: AssignmentKind, a: &Assignment) -> Value {
    let mut row = serde_json::Map::new();
    row.insert(kind.entity_column().to_string(), json!(a.entity_id));
    row.insert("technician_id".to_string(), json!(a.technician_id));
    Value::Object(row)
}

fn assignment_filters(kind: AssignmentKind, a: &Assignment) -> [Filter; 2] {
    [
        Filter::eq(kind.entity_column(), a.entity_id),
        Filter::eq("technician_id", a.technician_id),
    ]
}

pub async fn load_assignments(
    store: &dyn DataStore,
    kind: AssignmentKind,
) -> AppResult<Vec<Assignment>> {
    let rows = store.select(&Select::new(kind.table())).await?;
    rows.iter().map(|r| assignment_from_row(kind, r)).collect()
}

/// Batch insert of join rows (one call).
pub async fn insert_assignments(
    store: &dyn DataStore,
    kind: AssignmentKind,
    pairs: &[Assignment],
) -> AppResult<()> {
    if pairs.is_empty() {
        return Ok(());
    }
    let rows = pairs.iter().map(|a| assignment_to_row(kind, a)).collect();
    store.insert(kind.table(), rows).await?;
    Ok(())
}

/// Delete the join row keyed by both foreign keys.
pub async fn delete_assignment(
    store: &dyn DataStore,
    kind: AssignmentKind,
    pair: &Assignment,
) -> AppResult<usize> {
    store
        .delete(kind.table(), &assignment_filters(kind, pair))
        .await
}

// ---------------------------
// Locations
// ---------------------------

/// Newest first, with the technician's name embedded.
pub async fn load_locations(store: &dyn DataStore) -> AppResult<Vec<LocationRecord>> {
    let q = Select::new(Table::Locations)
        .columns(&["id", "latitude", "longitude", "recorded_at", "technician_id"])
        .embed(Table::Technicians, "technician_id", &["name"])
        .order_by("recorded_at", Direction::Desc);
    decode(store.select(&q).await?)
}

pub async fn insert_location(store: &dyn DataStore, l: &NewLocation) -> AppResult<LocationRecord> {
    let rows = store.insert(Table::Locations, vec![encode(l)?]).await?;
    first(rows, Table::Locations)
}

// ---------------------------
// Zones
// ---------------------------

pub async fn load_zones(store: &dyn DataStore) -> AppResult<Vec<Zone>> {
    let q = Select::new(Table::ControlledZones)
        .columns(&["name", "lat", "lon", "tolerance"])
        .order_by("id", Direction::Asc);
    decode(store.select(&q).await?)
}

pub async fn insert_zone(store: &dyn DataStore, z: &Zone) -> AppResult<Zone> {
    let rows = store.insert(Table::ControlledZones, vec![encode(z)?]).await?;
    first(rows, Table::ControlledZones)
}
