//! Core operations against an in-memory SQLite store.

use chrono::{NaiveDate, TimeZone, Utc};
use fieldtrack::config::{Config, ZoneSource};
use fieldtrack::core::assignment::AssignLogic;
use fieldtrack::core::geocoder::{AddressParts, ReverseGeocoder};
use fieldtrack::core::location::LocationLogic;
use fieldtrack::core::project::ProjectLogic;
use fieldtrack::core::task::TaskLogic;
use fieldtrack::core::zones::ZoneLogic;
use fieldtrack::db::DataStore;
use fieldtrack::db::initialize::init_db;
use fieldtrack::db::migrate::latest_version;
use fieldtrack::db::pool::DbPool;
use fieldtrack::db::queries::{insert_technician, load_task, load_tasks, load_zones};
use fieldtrack::db::query::{Filter, Table};
use fieldtrack::errors::{AppError, AppResult};
use fieldtrack::models::assignment::{AssignmentKind, Toggle};
use fieldtrack::models::project::NewProject;
use fieldtrack::models::task::NewTask;
use fieldtrack::models::task_state::TaskState;
use fieldtrack::models::technician::NewTechnician;
use fieldtrack::models::zone::Zone;
use serde_json::json;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn fresh_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool).expect("migrations");
    pool
}

/// Two technicians (#1 Ana, #2 Luis) and one project (#1).
async fn seeded() -> DbPool {
    let pool = fresh_pool();
    for name in ["Ana", "Luis"] {
        insert_technician(
            &pool,
            &NewTechnician {
                name: name.to_string(),
            },
        )
        .await
        .unwrap();
    }
    ProjectLogic::create(
        &pool,
        &NewProject {
            name: "Fiber rollout".into(),
            duration: Some("4 months".into()),
            start_date: date("2025-03-01"),
            end_date: Some(date("2025-06-30")),
        },
    )
    .await
    .unwrap();
    pool
}

fn new_task(name: &str, start: &str) -> NewTask {
    NewTask {
        name: name.into(),
        duration: None,
        start_date: date(start),
        end_date: None,
        project_id: 1,
        state: TaskState::Pending,
        note: None,
    }
}

struct NoGeocoder;

#[async_trait::async_trait]
impl ReverseGeocoder for NoGeocoder {
    async fn lookup(&self, _lat: f64, _lon: f64) -> AppResult<AddressParts> {
        Err(AppError::Other("offline".into()))
    }
}

#[test]
fn test_migrations_are_idempotent() {
    let pool = DbPool::in_memory().unwrap();
    assert_eq!(init_db(&pool).unwrap(), latest_version() as usize);
    assert_eq!(init_db(&pool).unwrap(), 0);
}

#[tokio::test]
async fn test_tasks_sorted_by_start_date_and_filtered() {
    let pool = seeded().await;
    ProjectLogic::create(
        &pool,
        &NewProject {
            name: "Tower audit".into(),
            duration: None,
            start_date: date("2025-01-01"),
            end_date: None,
        },
    )
    .await
    .unwrap();

    TaskLogic::create(&pool, &new_task("Splice", "2025-04-10"), &[])
        .await
        .unwrap();
    TaskLogic::create(&pool, &new_task("Survey", "2025-03-02"), &[])
        .await
        .unwrap();
    let mut other = new_task("Climb", "2025-01-05");
    other.project_id = 2;
    TaskLogic::create(&pool, &other, &[]).await.unwrap();

    let all: Vec<String> = load_tasks(&pool, None)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(all, vec!["Climb", "Survey", "Splice"]);

    let first_project = load_tasks(&pool, Some(1)).await.unwrap();
    assert_eq!(first_project.len(), 2);
    assert!(
        first_project
            .iter()
            .all(|t| t.project_name() == Some("Fiber rollout"))
    );
}

#[tokio::test]
async fn test_task_create_assigns_technicians_once() {
    let pool = seeded().await;
    let task = TaskLogic::create(&pool, &new_task("Survey", "2025-03-02"), &[2, 1, 2])
        .await
        .unwrap();

    let views = TaskLogic::list(&pool, None).await;
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].task.id, task.id);
    assert_eq!(views[0].technicians, vec!["Ana", "Luis"]);
}

#[tokio::test]
async fn test_task_kept_when_assignment_insert_fails() {
    let pool = seeded().await;
    let err = TaskLogic::create(&pool, &new_task("Survey", "2025-03-02"), &[1, 99])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Db(_)));

    let tasks = load_tasks(&pool, None).await.unwrap();
    assert_eq!(tasks.len(), 1);
    let map = AssignLogic::load_map(&pool, AssignmentKind::Task)
        .await
        .unwrap();
    assert!(map.is_empty());
}

#[tokio::test]
async fn test_toggle_state_round_trip() {
    let pool = seeded().await;
    let mut payload = new_task("Survey", "2025-03-02");
    payload.note = Some("north side".into());
    let task = TaskLogic::create(&pool, &payload, &[]).await.unwrap();

    let done = TaskLogic::toggle_state(&pool, task.id).await.unwrap();
    assert_eq!(done.state, TaskState::Complete);
    let stored = load_task(&pool, task.id).await.unwrap();
    assert_eq!(stored.state, TaskState::Complete);
    assert_eq!(stored.note.as_deref(), Some("north side"));

    TaskLogic::toggle_state(&pool, task.id).await.unwrap();
    let back = load_task(&pool, task.id).await.unwrap();
    assert_eq!(back.state, TaskState::Pending);
    assert_eq!(back.name, "Survey");
    assert_eq!(back.start_date, date("2025-03-02"));
}

#[tokio::test]
async fn test_missing_task_is_not_found() {
    let pool = seeded().await;
    let err = TaskLogic::toggle_state(&pool, 42).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: 42, .. }));

    let err = TaskLogic::update_note(&pool, 42, "x").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: 42, .. }));
}

#[tokio::test]
async fn test_update_note() {
    let pool = seeded().await;
    let task = TaskLogic::create(&pool, &new_task("Survey", "2025-03-02"), &[])
        .await
        .unwrap();
    TaskLogic::update_note(&pool, task.id, "cable delivered")
        .await
        .unwrap();
    let stored = load_task(&pool, task.id).await.unwrap();
    assert_eq!(stored.note.as_deref(), Some("cable delivered"));
    assert_eq!(stored.state, TaskState::Pending);
}

#[tokio::test]
async fn test_project_assignment_toggle_and_duplicate_check() {
    let pool = seeded().await;

    let map = AssignLogic::assign(&pool, AssignmentKind::Project, 1, 2)
        .await
        .unwrap();
    assert_eq!(map.technicians(1), vec![2]);

    let err = AssignLogic::assign(&pool, AssignmentKind::Project, 1, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyAssigned { technician: 2, .. }));

    let (action, map) = AssignLogic::toggle(&pool, AssignmentKind::Project, 1, 1)
        .await
        .unwrap();
    assert_eq!(action, Toggle::Added);
    assert_eq!(map.technicians(1), vec![1, 2]);

    let (action, map) = AssignLogic::toggle(&pool, AssignmentKind::Project, 1, 1)
        .await
        .unwrap();
    assert_eq!(action, Toggle::Removed);
    assert_eq!(map.technicians(1), vec![2]);

    let map = AssignLogic::unassign(&pool, AssignmentKind::Project, 1, 2)
        .await
        .unwrap();
    assert!(map.is_empty());

    let views = ProjectLogic::list(&pool).await;
    assert!(views[0].technicians.is_empty());
}

#[tokio::test]
async fn test_unfiltered_writes_are_refused() {
    let pool = seeded().await;
    assert!(pool.delete(Table::Technicians, &[]).await.is_err());
    assert!(
        pool.update(Table::Technicians, json!({ "name": "x" }), &[])
            .await
            .is_err()
    );
    assert!(
        pool.delete(Table::Technicians, &[Filter::eq("nickname", "x")])
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_zones_from_store_keep_insert_order() {
    let pool = fresh_pool();
    ZoneLogic::add(&pool, &Zone::new("B", 1.0, 1.0, 0.5)).await.unwrap();
    ZoneLogic::add(&pool, &Zone::new("A", 1.0, 1.0, 0.5)).await.unwrap();

    let names: Vec<String> = load_zones(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|z| z.name)
        .collect();
    assert_eq!(names, vec!["B", "A"]);

    assert!(ZoneLogic::add(&pool, &Zone::new("bad", 91.0, 0.0, 0.1)).await.is_err());
    assert!(ZoneLogic::add(&pool, &Zone::new("neg", 0.0, 0.0, -0.1)).await.is_err());
}

#[tokio::test]
async fn test_locations_newest_first_with_zone_names() {
    let pool = seeded().await;
    let mut cfg = Config::default();
    cfg.zones.source = ZoneSource::Config;

    LocationLogic::record(
        &pool,
        1,
        -17.740728,
        -63.191753,
        Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
    )
    .await
    .unwrap();
    LocationLogic::record(
        &pool,
        2,
        10.0,
        10.0,
        Utc.with_ymd_and_hms(2025, 5, 2, 9, 30, 0).unwrap(),
    )
    .await
    .unwrap();

    let listed = LocationLogic::list_resolved(&pool, &cfg, &NoGeocoder).await;
    assert_eq!(listed.len(), 2);

    assert_eq!(listed[0].place, "Geolocation error");
    assert_eq!(listed[0].record.recorded_at_str(), "2025-05-02 09:30:00");
    assert_eq!(listed[0].record.technician_name(), Some("Luis"));

    assert_eq!(listed[1].place, "Punto Central - Distrito 1");
    assert_eq!(listed[1].record.technician_name(), Some("Ana"));
}

#[tokio::test]
async fn test_read_failure_renders_empty() {
    // No migrations: every table is missing
    let pool = DbPool::in_memory().unwrap();
    let cfg = Config::default();

    assert!(TaskLogic::list(&pool, None).await.is_empty());
    assert!(ProjectLogic::list(&pool).await.is_empty());
    assert!(
        LocationLogic::list_resolved(&pool, &cfg, &NoGeocoder)
            .await
            .is_empty()
    );
}
