use crate::cli::parser::{Commands, RecordsAction};
use crate::config::Config;
use crate::core::{CheckInDesk, policy_from};
use crate::errors::AppResult;
use crate::models::CheckIn;
use crate::repo::Store;
use crate::ui::messages::success;
use crate::utils::date::parse_timestamp;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, store: &Store) -> AppResult<()> {
    let Commands::Records { action } = cmd else {
        return Ok(());
    };

    match action {
        RecordsAction::List { project, member } => {
            let desk = CheckInDesk::open(store, policy_from(cfg), *project)?;
            let records: Vec<CheckIn> = desk
                .check_ins()?
                .into_iter()
                .filter(|ci| member.as_deref().is_none_or(|m| ci.member_name == m.trim()))
                .collect();

            if records.is_empty() {
                println!("No check-ins for project '{}'.", desk.current_project().name);
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Member", 12),
                Column::new("Date", 10),
                Column::new("Time", 8),
                Column::new("Location", 20),
            ]);
            for ci in &records {
                table.add_row(vec![
                    ci.id.to_string(),
                    ci.member_name.clone(),
                    ci.date_str(),
                    ci.time_str(),
                    ci.location.clone(),
                ]);
            }
            print!("{}", table.render());
        }

        RecordsAction::Show { project, id } => {
            let desk = CheckInDesk::open(store, policy_from(cfg), *project)?;
            print_record(&desk.check_in_by_id(*id)?);
        }

        RecordsAction::Edit {
            project,
            id,
            password,
            at,
            location,
        } => {
            let mut desk = CheckInDesk::open(store, policy_from(cfg), *project)?;
            desk.authorize(password)?;

            let current = desk.check_in_by_id(*id)?;
            let new_time = match at {
                Some(s) => parse_timestamp(s)?,
                None => current.check_in_time,
            };
            let new_location = location.as_deref().unwrap_or(&current.location);

            desk.update_check_in(*id, new_time, new_location)?;
            print_record(&desk.check_in_by_id(*id)?);
            success(format!("Check-in {id} updated"));
        }

        RecordsAction::Del {
            project,
            id,
            password,
        } => {
            let mut desk = CheckInDesk::open(store, policy_from(cfg), *project)?;
            desk.authorize(password)?;
            desk.delete_check_in(*id)?;
            success(format!("Check-in {id} deleted"));
        }
    }

    Ok(())
}

fn print_record(ci: &CheckIn) {
    println!("🆔 Record    : {}", ci.id);
    println!("👤 Member    : {}", ci.member_name);
    println!("🕒 Time      : {}", ci.timestamp_str());
    println!("📍 Location  : {}", ci.location);
    println!("🌐 Position  : {:.6}, {:.6}", ci.latitude, ci.longitude);
    println!("📷 Photo     : {}", ci.photo_path);
}
