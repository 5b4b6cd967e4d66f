use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{CheckInDesk, CheckInState, policy_from};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::{ExportOptions, parse_range};
use crate::repo::Store;
use crate::utils::date::today;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config, store: &Store) -> AppResult<()> {
    if let Commands::Export {
        project,
        password,
        file,
        range,
        format,
        force,
    } = cmd
    {
        let mut desk = CheckInDesk::open(store, policy_from(cfg), *project)?;
        desk.authorize(password)?;

        let (start, end) = match range {
            Some(r) => parse_range(r)?,
            None => parse_range(&today().format("%Y-%m").to_string())?,
        };

        let target = expand_tilde(file);
        ensure_writable(&target, *force)?;

        let opts = ExportOptions::from_config(cfg, *format);
        if !desk.export(start, end, &target, &opts) {
            let reason = match desk.state() {
                CheckInState::Error(msg) => msg.clone(),
                _ => format!("failed to export to {}", target.display()),
            };
            return Err(AppError::Export(reason));
        }
    }

    Ok(())
}
