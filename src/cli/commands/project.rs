use crate::cli::parser::{Commands, ProjectAction};
use crate::config::Config;
use crate::core::{ProjectBoard, ProjectListState, policy_from};
use crate::errors::{AppError, AppResult};
use crate::repo::Store;
use crate::ui::messages::{success, warning};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, store: &Store) -> AppResult<()> {
    let Commands::Project { action } = cmd else {
        return Ok(());
    };

    let mut board = ProjectBoard::new(store, policy_from(cfg));

    match action {
        ProjectAction::Add { name, password } => {
            let project = board.create_project(name, password)?;
            success(format!(
                "Project '{}' created with id {}",
                project.name, project.id
            ));
        }

        ProjectAction::List => match board.state() {
            ProjectListState::Success(projects) if projects.is_empty() => {
                println!("No projects yet. Create one with `rcheckin project add`.");
            }
            ProjectListState::Success(projects) => {
                let mut table = Table::new(vec![
                    Column::new("ID", 4),
                    Column::new("Name", 20),
                    Column::new("Created", 19),
                ]);
                for p in projects {
                    table.add_row(vec![p.id.to_string(), p.name.clone(), p.created_at_str()]);
                }
                print!("{}", table.render());
            }
            ProjectListState::Error(msg) => return Err(AppError::Other(msg.clone())),
            ProjectListState::Loading => {}
        },

        ProjectAction::Del { id, password } => {
            let project = board.authorize(*id, password)?;
            let report = board.delete_project(*id)?;

            if report.is_clean() {
                success(format!("Project '{}' ({}) deleted", project.name, id));
            } else {
                for step in report.failures() {
                    warning(format!(
                        "Could not remove {}: {}",
                        step.target.display(),
                        step.error.as_deref().unwrap_or_default()
                    ));
                }
                warning(format!(
                    "Project '{}' ({}) deleted; leftover files listed above are retried on the next start",
                    project.name, id
                ));
            }
        }

        ProjectAction::Passwd { id, old, new } => {
            board.change_password(*id, old, new)?;
            success(format!("Password of project {id} changed"));
        }
    }

    Ok(())
}
