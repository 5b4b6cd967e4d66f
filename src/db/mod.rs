pub mod check_ins;
pub mod log;
pub mod maintenance;
pub mod members;
pub mod migrate;
pub mod pool;
pub mod projects;
pub mod registry;

pub use registry::{DatabaseRegistry, DbHandle, PurgeReport, StorageLayout};
