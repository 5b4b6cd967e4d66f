pub mod check_in;
pub mod member;
pub mod project;

pub use check_in::CheckIn;
pub use member::Member;
pub use project::Project;

/// Storage format for timestamps (`date()` in SQLite understands it).
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FMT: &str = "%Y-%m-%d";
pub const TIME_FMT: &str = "%H:%M:%S";
