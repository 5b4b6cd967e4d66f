mod common;
use chrono::NaiveDate;
use common::{TestEnv, ts};
use rcheckin::errors::AppError;
use rcheckin::export::model::NOT_CHECKED_IN;
use rcheckin::export::photo::{MAX_PHOTO_COLUMN_WIDTH, photo_column_width, prepare_photo};
use rcheckin::export::{
    ExportFormat, ExportOptions, build_attendance, export_attendance, parse_range,
    try_export_attendance,
};
use rcheckin::models::{CheckIn, Member};
use std::fs;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn team_a() -> (Vec<Member>, Vec<CheckIn>) {
    let members = vec![Member::new(1, "Alice"), Member::new(1, "Bob")];
    let mut ci = CheckIn::new(1, "Alice", ts("2024-01-01 08:15:00"), "Gate", "", 41.9, 12.5);
    ci.id = 1;
    (members, vec![ci])
}

fn csv_opts() -> ExportOptions {
    ExportOptions {
        format: ExportFormat::Csv,
        ..ExportOptions::default()
    }
}

#[test]
fn test_team_a_grid() {
    let (members, check_ins) = team_a();
    let rows = build_attendance(&members, &check_ins, d(2024, 1, 1), d(2024, 1, 2));

    let summary: Vec<(&str, String, bool)> = rows
        .iter()
        .map(|r| (r.member, r.date.to_string(), r.check_in.is_some()))
        .collect();

    assert_eq!(
        summary,
        [
            ("Alice", "2024-01-01".to_string(), true),
            ("Bob", "2024-01-01".to_string(), false),
            ("Alice", "2024-01-02".to_string(), false),
            ("Bob", "2024-01-02".to_string(), false),
        ]
    );
}

#[test]
fn test_grid_has_days_times_members_rows() {
    let members: Vec<Member> = ["A", "B", "C"].iter().map(|n| Member::new(1, n)).collect();

    let rows = build_attendance(&members, &[], d(2024, 2, 1), d(2024, 2, 29));
    assert_eq!(rows.len(), 29 * 3);

    assert!(build_attendance(&[], &[], d(2024, 2, 1), d(2024, 2, 29)).is_empty());
    assert!(build_attendance(&members, &[], d(2024, 3, 1), d(2024, 2, 1)).is_empty());
}

#[test]
fn test_csv_export_writes_every_row() {
    let env = TestEnv::new();
    let (members, check_ins) = team_a();
    let target = env.file("team_a.csv");

    let rows = try_export_attendance(
        &members,
        &check_ins,
        d(2024, 1, 1),
        d(2024, 1, 2),
        &target,
        &csv_opts(),
    )
    .unwrap();
    assert_eq!(rows, 4);

    let content = fs::read_to_string(&target).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("name,date,checked_in,time,location"));
    assert!(lines[1].starts_with("Alice,2024-01-01,true,08:15:00,Gate"));
    assert!(lines[2].starts_with(&format!("Bob,2024-01-01,false,{NOT_CHECKED_IN},-")));
}

#[test]
fn test_json_export_is_an_array_of_records() {
    let env = TestEnv::new();
    let (members, check_ins) = team_a();
    let target = env.file("team_a.json");
    let opts = ExportOptions {
        format: ExportFormat::Json,
        ..ExportOptions::default()
    };

    assert!(export_attendance(&members, &check_ins, d(2024, 1, 1), d(2024, 1, 1), &target, &opts));

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Alice");
    assert_eq!(records[0]["checked_in"], true);
    assert_eq!(records[1]["time"], NOT_CHECKED_IN);
    assert!(records[1]["latitude"].is_null());
}

#[test]
fn test_xlsx_export_with_photos() {
    let env = TestEnv::new();
    let photo = env.photo("alice.png", 40, 20);

    let members = vec![Member::new(1, "Alice"), Member::new(1, "Bob")];
    let check_ins = vec![
        CheckIn::new(1, "Alice", ts("2024-01-01 08:15:00"), "Gate", &photo.to_string_lossy(), 0.0, 0.0),
        CheckIn::new(1, "Bob", ts("2024-01-01 08:20:00"), "Gate", "/nowhere/bob.jpg", 0.0, 0.0),
    ];
    let target = env.file("out/attendance.xlsx");

    let rows = try_export_attendance(
        &members,
        &check_ins,
        d(2024, 1, 1),
        d(2024, 1, 3),
        &target,
        &ExportOptions::default(),
    )
    .unwrap();
    assert_eq!(rows, 6);

    // a missing photo does not fail the export
    let bytes = fs::read(&target).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    let leftovers: Vec<_> = fs::read_dir(target.parent().unwrap())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with(".rcheckin-export-"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_failed_export_leaves_no_file() {
    let env = TestEnv::new();
    let (members, check_ins) = team_a();
    let target = env.file("bad.csv");

    let err = try_export_attendance(
        &members,
        &check_ins,
        d(2024, 1, 5),
        d(2024, 1, 1),
        &target,
        &csv_opts(),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidRange(_)));
    assert!(!target.exists());

    // target is a directory: the rename fails
    let dir_target = env.file("taken");
    fs::create_dir(&dir_target).unwrap();
    assert!(!export_attendance(
        &members,
        &check_ins,
        d(2024, 1, 1),
        d(2024, 1, 1),
        &dir_target,
        &csv_opts(),
    ));
    assert!(dir_target.is_dir());
}

#[test]
fn test_photo_is_reencoded_as_jpeg() {
    let env = TestEnv::new();
    let photo = prepare_photo(&env.photo("wide.png", 40, 20), 70).unwrap();

    assert_eq!((photo.width, photo.height), (40, 20));
    assert_eq!(&photo.jpeg[..2], &[0xFF, 0xD8]);
    assert!((photo.aspect_ratio() - 2.0).abs() < f64::EPSILON);

    assert!(prepare_photo(&env.file("none.jpg"), 70).is_err());
}

#[test]
fn test_photo_column_width_is_capped() {
    assert!((photo_column_width(1.0, 150.0) - 25.0).abs() < 1e-9);
    assert!((photo_column_width(0.75, 150.0) - 18.75).abs() < 1e-9);
    assert_eq!(photo_column_width(4.0, 150.0), MAX_PHOTO_COLUMN_WIDTH);
}

#[test]
fn test_parse_range_forms() {
    assert_eq!(parse_range("2024").unwrap(), (d(2024, 1, 1), d(2024, 12, 31)));
    assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
    assert_eq!(parse_range("2024-02-10").unwrap(), (d(2024, 2, 10), d(2024, 2, 10)));
    assert_eq!(
        parse_range("2024-01:2024-03").unwrap(),
        (d(2024, 1, 1), d(2024, 3, 31))
    );
    assert_eq!(
        parse_range("2024-01-30:2024-02-02").unwrap(),
        (d(2024, 1, 30), d(2024, 2, 2))
    );

    assert!(matches!(parse_range("2024-03:2024-01"), Err(AppError::InvalidRange(_))));
    assert!(matches!(parse_range("2024:2024-01"), Err(AppError::InvalidRange(_))));
    assert!(parse_range("last week").is_err());
}
