mod common;
use common::{TestEnv, ts};
use rcheckin::core::{CheckInDesk, CheckInState, PasswordPolicy, ProjectBoard, ProjectListState};
use rcheckin::errors::AppError;
use rcheckin::location::ResolvedLocation;
use rcheckin::models::Project;

const LEGACY_BYPASS: &str = "tangshengwei";

fn gate() -> ResolvedLocation {
    ResolvedLocation {
        address: "Gate 3".into(),
        latitude: 45.07,
        longitude: 7.68,
    }
}

#[test]
fn test_policy_accepts_only_the_stored_password() {
    let project = Project::new("Team A", "s3cret");
    let policy = PasswordPolicy::default();

    assert!(policy.accepts(&project, "s3cret"));
    assert!(!policy.accepts(&project, "S3CRET"));
    assert!(!policy.accepts(&project, ""));
    assert!(!policy.accepts(&project, LEGACY_BYPASS));
}

#[test]
fn test_master_password_only_when_configured() {
    let project = Project::new("Team A", "s3cret");

    let with_master = PasswordPolicy::new(Some("override".into()));
    assert!(with_master.accepts(&project, "override"));
    assert!(with_master.accepts(&project, "s3cret"));
    assert!(!with_master.accepts(&project, LEGACY_BYPASS));

    let blank_master = PasswordPolicy::new(Some(String::new()));
    assert!(!blank_master.accepts(&project, ""));
}

#[test]
fn test_board_loads_and_tracks_state() {
    let env = TestEnv::new();
    let store = env.store();
    let mut board = ProjectBoard::new(&store, PasswordPolicy::default());

    assert_eq!(board.state(), &ProjectListState::Success(vec![]));

    let created = board.create_project("  Team A ", "pw").unwrap();
    assert_eq!(created.name, "Team A");
    match board.state() {
        ProjectListState::Success(list) => assert_eq!(list, &vec![created.clone()]),
        other => panic!("unexpected state {other:?}"),
    }

    assert!(matches!(
        board.create_project("   ", "pw"),
        Err(AppError::Blank("project name"))
    ));
    assert!(matches!(board.state(), ProjectListState::Error(msg) if msg.contains("must not be blank")));

    board.refresh();
    assert!(matches!(board.state(), ProjectListState::Success(_)));
}

#[test]
fn test_board_password_change_requires_old_password() {
    let env = TestEnv::new();
    let store = env.store();
    let mut board = ProjectBoard::new(&store, PasswordPolicy::default());
    let p = board.create_project("Team A", "old").unwrap();

    assert!(matches!(
        board.change_password(p.id, "wrong", "new"),
        Err(AppError::WrongPassword(_))
    ));
    assert!(matches!(
        board.change_password(p.id, LEGACY_BYPASS, "new"),
        Err(AppError::WrongPassword(_))
    ));

    board.change_password(p.id, "old", "new").unwrap();
    assert!(board.verify_password(p.id, "new"));
    assert!(!board.verify_password(p.id, "old"));
    assert!(!board.verify_password(999, "new"));
}

#[test]
fn test_desk_rejects_unknown_project() {
    let env = TestEnv::new();
    let store = env.store();

    assert!(matches!(
        CheckInDesk::open(&store, PasswordPolicy::default(), 5),
        Err(AppError::ProjectNotFound(5))
    ));
}

#[test]
fn test_desk_roster_and_check_in_rules() {
    let env = TestEnv::new();
    let store = env.store();
    let mut board = ProjectBoard::new(&store, PasswordPolicy::default());
    let p = board.create_project("Team A", "pw").unwrap();

    let mut desk = CheckInDesk::open(&store, PasswordPolicy::default(), p.id).unwrap();
    assert_eq!(desk.state(), &CheckInState::Ready);

    desk.add_member("Bob").unwrap();
    desk.add_member("Alice").unwrap();
    desk.add_member("Alice").unwrap();
    let names: Vec<String> = desk.members().unwrap().into_iter().map(|m| m.name).collect();
    assert_eq!(names, ["Alice", "Bob"]);

    let photo = env.photo("p.png", 4, 4);

    let err = desk
        .check_in("Carol", ts("2024-05-01 09:00:00"), &gate(), &photo)
        .unwrap_err();
    assert!(matches!(err, AppError::MemberNotFound { .. }));
    assert!(matches!(desk.state(), CheckInState::Error(_)));

    let missing = env.file("missing.png");
    assert!(matches!(
        desk.check_in("Alice", ts("2024-05-01 09:00:00"), &gate(), &missing),
        Err(AppError::Photo(_))
    ));

    let ci = desk
        .check_in("Alice", ts("2024-05-01 09:00:00"), &gate(), &photo)
        .unwrap();
    assert_eq!(desk.state(), &CheckInState::Ready);
    assert_eq!(ci.location, "Gate 3");
    assert!(ci.photo_path.contains("project_"));
    assert!(std::path::Path::new(&ci.photo_path).is_file());

    assert_eq!(desk.check_in_by_id(ci.id).unwrap(), ci);

    desk.update_check_in(ci.id, ts("2024-05-01 10:30:00"), "Hall").unwrap();
    let edited = desk.check_in_by_id(ci.id).unwrap();
    assert_eq!(edited.time_str(), "10:30:00");
    assert_eq!(edited.location, "Hall");

    assert!(matches!(
        desk.update_check_in(ci.id, ts("2024-05-01 10:30:00"), " "),
        Err(AppError::Blank("location"))
    ));

    desk.delete_check_in(ci.id).unwrap();
    assert!(matches!(
        desk.delete_check_in(ci.id),
        Err(AppError::CheckInNotFound(_))
    ));

    desk.remove_member("Bob").unwrap();
    assert!(matches!(
        desk.remove_member("Bob"),
        Err(AppError::MemberNotFound { .. })
    ));
}

#[test]
fn test_desk_authorize() {
    let env = TestEnv::new();
    let store = env.store();
    let mut board = ProjectBoard::new(&store, PasswordPolicy::default());
    let p = board.create_project("Team A", "pw").unwrap();

    let desk = CheckInDesk::open(&store, PasswordPolicy::new(Some("admin".into())), p.id).unwrap();
    assert!(desk.authorize("pw").is_ok());
    assert!(desk.authorize("admin").is_ok());
    assert!(matches!(desk.authorize(LEGACY_BYPASS), Err(AppError::WrongPassword(_))));
}
