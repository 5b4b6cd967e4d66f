use crate::cli::parser::Commands;
use crate::core::log::print_log;
use crate::db::log::load_log;
use crate::errors::AppResult;
use crate::repo::Store;

pub fn handle(cmd: &Commands, store: &Store) -> AppResult<()> {
    if let Commands::Log {
        print: true,
        project,
    } = cmd
    {
        match project {
            Some(id) => {
                let entries = store.registry().project(*id)?.with_conn(|c| load_log(c))?;
                print_log(&format!("Log of project {id}"), &entries);
            }
            None => {
                let entries = store.registry().main()?.with_conn(|c| load_log(c))?;
                print_log("Internal log", &entries);
            }
        }
    }

    Ok(())
}
