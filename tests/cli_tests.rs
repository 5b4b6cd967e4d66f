use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::TestEnv;

/// Fresh storage with project 1 "Team A" (password `pw`) and Alice on the roster.
fn team_a(env: &TestEnv) {
    env.init();

    env.cmd()
        .args(["project", "add", "--name", "Team A", "--password", "pw"])
        .assert()
        .success()
        .stdout(contains("Project 'Team A' created with id 1"));

    env.cmd()
        .args(["member", "add", "1", "Alice", "--password", "pw"])
        .assert()
        .success();
}

#[test]
fn test_init_creates_main_database() {
    let env = TestEnv::new();
    env.init();

    assert!(env.layout().main_db().exists());
    assert!(env.layout().files_dir().is_dir());

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied").and(contains("init")));
}

#[test]
fn test_project_lifecycle() {
    let env = TestEnv::new();
    team_a(&env);

    env.cmd()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(contains("Team A"));

    env.cmd()
        .args(["project", "del", "1", "--password", "nope"])
        .assert()
        .failure()
        .stderr(contains("Wrong password for project 1"));

    env.cmd()
        .args(["project", "del", "1", "--password", "tangshengwei"])
        .assert()
        .failure()
        .stderr(contains("Wrong password"));

    env.cmd()
        .args(["project", "passwd", "1", "--old", "pw", "--new", "pw2"])
        .assert()
        .success();

    env.cmd()
        .args(["project", "del", "1", "--password", "pw2"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    assert!(!env.layout().project_db(1).exists());

    env.cmd()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(contains("No projects yet"));
}

#[test]
fn test_blank_project_name_is_rejected() {
    let env = TestEnv::new();
    env.init();

    env.cmd()
        .args(["project", "add", "--name", "  ", "--password", "pw"])
        .assert()
        .failure()
        .stderr(contains("project name must not be blank"));
}

#[test]
fn test_check_in_and_same_day_overwrite() {
    let env = TestEnv::new();
    team_a(&env);
    let photo = env.photo("alice.png", 16, 12);
    let photo = photo.to_string_lossy();

    env.cmd()
        .args([
            "checkin", "1", "Alice", "--photo", &photo, "--lat", "41.9", "--lon", "12.5", "--at",
            "2024-01-01 08:00:00",
        ])
        .assert()
        .success()
        .stdout(contains("Location: 41.9, 12.5"));

    env.cmd()
        .args([
            "checkin", "1", "Alice", "--photo", &photo, "--location", "Main Hall", "--at",
            "2024-01-01 17:45",
        ])
        .assert()
        .success()
        .stdout(contains("record 2"));

    env.cmd()
        .args(["records", "list", "1"])
        .assert()
        .success()
        .stdout(
            contains("Main Hall")
                .and(contains("17:45:00"))
                .and(contains("41.9, 12.5").not()),
        );

    env.cmd()
        .args(["records", "show", "1", "2"])
        .assert()
        .success()
        .stdout(contains("project_1"));

    env.cmd()
        .args(["records", "show", "1", "1"])
        .assert()
        .failure()
        .stderr(contains("Check-in 1 not found"));
}

#[test]
fn test_check_in_needs_a_position_or_location() {
    let env = TestEnv::new();
    team_a(&env);
    let photo = env.photo("alice.png", 8, 8);

    env.cmd()
        .args(["checkin", "1", "Alice", "--photo", &photo.to_string_lossy()])
        .assert()
        .failure()
        .stderr(contains("no location provider is enabled"));
}

#[test]
fn test_check_in_for_unknown_member_or_project() {
    let env = TestEnv::new();
    team_a(&env);
    let photo = env.photo("p.png", 8, 8);
    let photo = photo.to_string_lossy();

    env.cmd()
        .args(["checkin", "1", "Mallory", "--photo", &photo, "--location", "Gate"])
        .assert()
        .failure()
        .stderr(contains("Member 'Mallory' not found in project 1"));

    env.cmd()
        .args(["checkin", "9", "Alice", "--photo", &photo, "--location", "Gate"])
        .assert()
        .failure()
        .stderr(contains("Project 9 not found"));

    env.cmd()
        .args(["member", "list", "abc"])
        .assert()
        .failure();
}

#[test]
fn test_edit_and_delete_records() {
    let env = TestEnv::new();
    team_a(&env);
    let photo = env.photo("p.png", 8, 8);
    let photo = photo.to_string_lossy();

    env.cmd()
        .args([
            "checkin", "1", "Alice", "--photo", &photo, "--location", "Gate", "--at",
            "2024-01-01 08:00:00",
        ])
        .assert()
        .success();

    env.cmd()
        .args(["records", "edit", "1", "1", "--password", "bad", "--location", "Hall"])
        .assert()
        .failure()
        .stderr(contains("Wrong password"));

    env.cmd()
        .args([
            "records", "edit", "1", "1", "--password", "pw", "--at", "2024-01-02 09:30:00",
            "--location", "Hall",
        ])
        .assert()
        .success()
        .stdout(contains("2024-01-02 09:30:00").and(contains("Hall")));

    env.cmd()
        .args(["records", "del", "1", "1", "--password", "pw"])
        .assert()
        .success();

    env.cmd()
        .args(["records", "list", "1"])
        .assert()
        .success()
        .stdout(contains("No check-ins"));
}

#[test]
fn test_export_csv_range() {
    let env = TestEnv::new();
    team_a(&env);
    env.cmd()
        .args(["member", "add", "1", "Bob", "--password", "pw"])
        .assert()
        .success();

    let photo = env.photo("p.png", 8, 8);
    env.cmd()
        .args([
            "checkin",
            "1",
            "Alice",
            "--photo",
            &photo.to_string_lossy(),
            "--location",
            "Gate",
            "--at",
            "2024-01-01 08:15:00",
        ])
        .assert()
        .success();

    let out = env.file("team_a.csv");
    let out_str = out.to_string_lossy();

    env.cmd()
        .args([
            "export", "1", "--password", "wrong", "--file", &out_str, "--format", "csv",
            "--range", "2024-01-01:2024-01-02",
        ])
        .assert()
        .failure();
    assert!(!out.exists());

    env.cmd()
        .args([
            "export", "1", "--password", "pw", "--file", &out_str, "--format", "csv", "--range",
            "2024-01-01:2024-01-02",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed (4 rows)"));

    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 5);
    assert!(content.contains("Alice,2024-01-01,true,08:15:00,Gate"));
    assert!(content.contains("Bob,2024-01-02,false,Not checked in"));
}

#[test]
fn test_export_xlsx_refuses_bad_range() {
    let env = TestEnv::new();
    team_a(&env);
    let out = env.file("team_a.xlsx");

    env.cmd()
        .args([
            "export",
            "1",
            "--password",
            "pw",
            "--file",
            &out.to_string_lossy(),
            "--range",
            "2024-02:2024-01",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid range"));
    assert!(!out.exists());

    env.cmd()
        .args([
            "export",
            "1",
            "--password",
            "pw",
            "--file",
            &out.to_string_lossy(),
            "--range",
            "2024-01",
        ])
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn test_db_check_covers_project_databases() {
    let env = TestEnv::new();
    team_a(&env);

    env.cmd()
        .args(["db", "--check", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("main").and(contains("project 1 (Team A)")).and(contains("members=1")));
}
