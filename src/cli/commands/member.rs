use crate::cli::parser::{Commands, MemberAction};
use crate::config::Config;
use crate::core::{CheckInDesk, policy_from};
use crate::errors::AppResult;
use crate::repo::Store;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config, store: &Store) -> AppResult<()> {
    let Commands::Member { action } = cmd else {
        return Ok(());
    };

    match action {
        MemberAction::Add {
            project,
            name,
            password,
        } => {
            let mut desk = CheckInDesk::open(store, policy_from(cfg), *project)?;
            desk.authorize(password)?;
            let member = desk.add_member(name)?;
            success(format!(
                "'{}' added to project '{}'",
                member.name,
                desk.current_project().name
            ));
        }

        MemberAction::Del {
            project,
            name,
            password,
        } => {
            let mut desk = CheckInDesk::open(store, policy_from(cfg), *project)?;
            desk.authorize(password)?;
            desk.remove_member(name)?;
            success(format!(
                "'{}' removed from project '{}'",
                name.trim(),
                desk.current_project().name
            ));
        }

        MemberAction::List { project } => {
            let desk = CheckInDesk::open(store, policy_from(cfg), *project)?;
            let members = desk.members()?;

            println!("👥 Roster of '{}':", desk.current_project().name);
            if members.is_empty() {
                println!("(no members)");
            }
            for m in members {
                println!("  • {}", m.name);
            }
        }
    }

    Ok(())
}
