use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ft, ft_db, init_db, init_db_with_data, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    ft_db(&db_path)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Migration 1 applied"))
        .stdout(contains("Database initialized"));

    // Second run has nothing to migrate
    ft_db(&db_path)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Schema already up to date"));
}

#[test]
fn test_technicians_add_and_list() {
    let db_path = setup_test_db("cli_technicians");
    init_db(&db_path);

    ft_db(&db_path)
        .args(["technician", "add", "José Pérez"])
        .assert()
        .success()
        .stdout(contains("Technician #1 added: José Pérez"));

    ft_db(&db_path)
        .args(["technician", "list"])
        .assert()
        .success()
        .stdout(contains("ID").and(contains("José Pérez")));
}

#[test]
fn test_empty_lists() {
    let db_path = setup_test_db("cli_empty");
    init_db(&db_path);

    ft_db(&db_path)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(contains("No projects found."));

    ft_db(&db_path)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(contains("No tasks found."));

    ft_db(&db_path)
        .args(["location", "list"])
        .assert()
        .success()
        .stdout(contains("No locations found."));
}

#[test]
fn test_read_failure_lists_as_empty() {
    // Never initialized: tables are missing
    let db_path = setup_test_db("cli_uninitialized");

    ft_db(&db_path)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(contains("No projects found."))
        .stderr(contains("failed to load projects"));
}

#[test]
fn test_project_list_shows_dates_and_technicians() {
    let db_path = setup_test_db("cli_projects");
    init_db_with_data(&db_path);

    ft_db(&db_path)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(
            contains("Fiber rollout")
                .and(contains("4 months"))
                .and(contains("2025-03-01"))
                .and(contains("2025-06-30"))
                .and(contains("—")),
        );

    ft_db(&db_path)
        .args(["project", "assign", "1", "2"])
        .assert()
        .success()
        .stdout(contains("Technicians on project #1: Luis"));

    ft_db(&db_path)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(contains("Luis"));
}

#[test]
fn test_project_rejects_bad_dates() {
    let db_path = setup_test_db("cli_project_dates");
    init_db(&db_path);

    ft_db(&db_path)
        .args(["project", "add", "Bad", "--start", "03/01/2025"])
        .assert()
        .failure()
        .stderr(contains("Error: Invalid date format"));

    ft_db(&db_path)
        .args([
            "project", "add", "Bad", "--start", "2025-03-01", "--end", "2025-02-01",
        ])
        .assert()
        .failure()
        .stderr(contains("before start date"));
}

#[test]
fn test_assign_duplicate_is_refused() {
    let db_path = setup_test_db("cli_assign_dup");
    init_db_with_data(&db_path);

    ft_db(&db_path)
        .args(["project", "assign", "1", "1"])
        .assert()
        .success();

    ft_db(&db_path)
        .args(["project", "assign", "1", "1"])
        .assert()
        .success()
        .stdout(contains("already assigned"));

    ft_db(&db_path)
        .args(["project", "unassign", "1", "1"])
        .assert()
        .success()
        .stdout(contains("Technicians on project #1: —"));
}

#[test]
fn test_task_lifecycle() {
    let db_path = setup_test_db("cli_task_lifecycle");
    init_db_with_data(&db_path);

    ft_db(&db_path)
        .args([
            "task",
            "add",
            "Splice cabinet",
            "--project",
            "1",
            "--start",
            "2025-04-10",
            "--tech",
            "1",
            "--tech",
            "2",
            "--note",
            "bring ladder",
        ])
        .assert()
        .success()
        .stdout(contains("Task #1 added to project #1"));

    ft_db(&db_path)
        .args([
            "task", "add", "Survey", "--project", "1", "--start", "2025-03-02",
        ])
        .assert()
        .success();

    // Ordered by start date: Survey (#2) before Splice cabinet (#1)
    let out = ft_db(&db_path)
        .args(["task", "list", "--project", "1"])
        .assert()
        .success()
        .stdout(contains("Ana, Luis").and(contains("bring ladder")))
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    let survey = text.find("Survey").expect("survey listed");
    let splice = text.find("Splice cabinet").expect("splice listed");
    assert!(survey < splice);

    ft_db(&db_path)
        .args(["task", "toggle-state", "1"])
        .assert()
        .success()
        .stdout(contains("complete"));

    ft_db(&db_path)
        .args(["task", "note", "1", "cabinet sealed"])
        .assert()
        .success()
        .stdout(contains("Note of task #1 updated"));

    ft_db(&db_path)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(
            contains("complete")
                .and(contains("cabinet sealed"))
                .and(contains("bring ladder").not()),
        );

    ft_db(&db_path)
        .args(["task", "toggle-state", "1"])
        .assert()
        .success()
        .stdout(contains("pending"));
}

#[test]
fn test_task_list_filter_by_other_project() {
    let db_path = setup_test_db("cli_task_filter");
    init_db_with_data(&db_path);

    ft_db(&db_path)
        .args([
            "task", "add", "Survey", "--project", "1", "--start", "2025-03-02",
        ])
        .assert()
        .success();

    ft_db(&db_path)
        .args(["task", "list", "--project", "2"])
        .assert()
        .success()
        .stdout(contains("No tasks found."));
}

#[test]
fn test_task_assignment_toggle() {
    let db_path = setup_test_db("cli_task_toggle");
    init_db_with_data(&db_path);

    ft_db(&db_path)
        .args([
            "task", "add", "Survey", "--project", "1", "--start", "2025-03-02",
        ])
        .assert()
        .success();

    ft_db(&db_path)
        .args(["task", "toggle", "1", "2"])
        .assert()
        .success()
        .stdout(contains("Technician #2 assigned to task #1"))
        .stdout(contains("Technicians on task #1: Luis"));

    ft_db(&db_path)
        .args(["task", "toggle", "1", "2"])
        .assert()
        .success()
        .stdout(contains("Technician #2 removed from task #1"))
        .stdout(contains("Technicians on task #1: —"));
}

#[test]
fn test_task_rejects_unknown_state() {
    let db_path = setup_test_db("cli_task_state");
    init_db_with_data(&db_path);

    ft_db(&db_path)
        .args([
            "task", "add", "Survey", "--project", "1", "--start", "2025-03-02", "--state",
            "done",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid task state"));
}

#[test]
fn test_toggle_state_of_missing_task_fails() {
    let db_path = setup_test_db("cli_task_missing");
    init_db(&db_path);

    ft_db(&db_path)
        .args(["task", "toggle-state", "7"])
        .assert()
        .failure()
        .stderr(contains("task #7 not found"));
}

#[test]
fn test_zones_and_resolve() {
    let db_path = setup_test_db("cli_zones");
    init_db(&db_path);

    ft_db(&db_path)
        .args(["zone", "list"])
        .assert()
        .success()
        .stdout(contains("No zones found."));

    ft_db(&db_path)
        .args([
            "zone",
            "add",
            "Base Técnica - DM3",
            "--lat",
            "-17.789001",
            "--lon",
            "-63.155678",
            "--tolerance",
            "0.0002",
        ])
        .assert()
        .success();

    ft_db(&db_path)
        .args(["zone", "list"])
        .assert()
        .success()
        .stdout(contains("Base Técnica - DM3").and(contains("-17.789001")));

    ft_db(&db_path)
        .args(["zone", "resolve", "--lat", "-17.7891", "--lon", "-63.1557"])
        .assert()
        .success()
        .stdout(contains("Base Técnica - DM3"));

    // Outside the zone, and the geocoder is unreachable
    ft_db(&db_path)
        .args(["zone", "resolve", "--lat", "-17.70", "--lon", "-63.1557"])
        .assert()
        .success()
        .stdout(contains("Geolocation error"));
}

#[test]
fn test_location_list_newest_first() {
    let db_path = setup_test_db("cli_locations");
    init_db_with_data(&db_path);

    ft_db(&db_path)
        .args([
            "zone",
            "add",
            "Punto Central - Distrito 1",
            "--lat",
            "-17.740728",
            "--lon",
            "-63.191753",
            "--tolerance",
            "0.0002",
        ])
        .assert()
        .success();

    ft_db(&db_path)
        .args([
            "location",
            "add",
            "--technician",
            "1",
            "--lat",
            "-17.74080",
            "--lon",
            "-63.19170",
            "--at",
            "2024-03-05T13:07:09.000Z",
        ])
        .assert()
        .success()
        .stdout(contains("2024-03-05 13:07:09"));

    ft_db(&db_path)
        .args([
            "location",
            "add",
            "--technician",
            "2",
            "--lat",
            "-16.5",
            "--lon",
            "-68.15",
            "--at",
            "2024-03-06T08:00:00-04:00",
        ])
        .assert()
        .success();

    let out = ft_db(&db_path)
        .args(["location", "list"])
        .assert()
        .success()
        .stdout(
            contains("Punto Central - Distrito 1")
                .and(contains("Geolocation error"))
                .and(contains("2024-03-05 13:07:09"))
                .and(contains("2024-03-06 12:00:00"))
                .and(contains("Ana"))
                .and(contains("Luis")),
        )
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8_lossy(&out);
    let newest = text.find("2024-03-06 12:00:00").expect("newest row");
    let oldest = text.find("2024-03-05 13:07:09").expect("oldest row");
    assert!(newest < oldest);
}

#[test]
fn test_location_rejects_out_of_range_coordinates() {
    let db_path = setup_test_db("cli_location_range");
    init_db_with_data(&db_path);

    ft_db(&db_path)
        .args([
            "location",
            "add",
            "--technician",
            "1",
            "--lat",
            "95",
            "--lon",
            "0",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid coordinate"));
}

#[test]
fn test_config_print_in_test_mode() {
    ft()
        .args(["--test", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("backend: sqlite").and(contains("max_concurrency: 4")));
}
