#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Nothing listens here: every reverse-geocoding request is refused.
pub const CLOSED_GEOCODER: &str = "http://127.0.0.1:9/reverse";

pub fn ft() -> Command {
    cargo_bin_cmd!("fieldtrack")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fieldtrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// `fieldtrack --db <db> --test --geocoder-url <closed> <args...>`
pub fn ft_db(db_path: &str) -> Command {
    let mut cmd = ft();
    cmd.args([
        "--db",
        db_path,
        "--test",
        "--geocoder-url",
        CLOSED_GEOCODER,
    ]);
    cmd
}

/// Initialize the schema
pub fn init_db(db_path: &str) {
    ft_db(db_path).arg("init").assert().success();
}

/// Initialized DB with two technicians (#1 Ana, #2 Luis) and one project (#1)
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    for name in ["Ana", "Luis"] {
        ft_db(db_path)
            .args(["technician", "add", name])
            .assert()
            .success();
    }

    ft_db(db_path)
        .args([
            "project",
            "add",
            "Fiber rollout",
            "--start",
            "2025-03-01",
            "--end",
            "2025-06-30",
            "--duration",
            "4 months",
        ])
        .assert()
        .success();
}
