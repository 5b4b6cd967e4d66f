pub mod checkin;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod member;
pub mod project;
pub mod records;
