use crate::cli::parser::Commands;
use crate::db::DbHandle;
use crate::db::maintenance::{count_rows, integrity_check, vacuum};
use crate::errors::AppResult;
use crate::repo::Store;
use ansi_term::Colour::{Cyan, Green, Red};

const MAIN_TABLES: &[&str] = &["projects", "log"];
const PROJECT_TABLES: &[&str] = &["members", "check_ins", "log"];

pub fn handle(cmd: &Commands, store: &Store) -> AppResult<()> {
    if let Commands::Db { check, vacuum: do_vacuum } = cmd {
        let mut targets: Vec<(String, DbHandle, &[&str])> =
            vec![("main".into(), store.registry().main()?, MAIN_TABLES)];

        for p in store.projects().all()? {
            targets.push((
                format!("project {} ({})", p.id, p.name),
                store.registry().project(p.id)?,
                PROJECT_TABLES,
            ));
        }

        if *check {
            println!("{}", Cyan.paint("▶ Running integrity check…"));
            for (label, handle, tables) in &targets {
                let result = handle.with_conn(|c| integrity_check(c))?;
                let counts = handle.with_conn(|c| {
                    tables
                        .iter()
                        .map(|t| Ok(format!("{t}={}", count_rows(c, t)?)))
                        .collect::<AppResult<Vec<String>>>()
                })?;

                if result == "ok" {
                    println!(
                        "{} {label} [{}]",
                        Green.paint("✔"),
                        counts.join(", ")
                    );
                } else {
                    println!("{} {label}: {result}", Red.paint("✘"));
                }
            }
            println!();
        }

        if *do_vacuum {
            println!("{}", Cyan.paint("▶ Running VACUUM…"));
            for (label, handle, _) in &targets {
                handle.with_conn(|c| vacuum(c))?;
                println!("{} {label}", Green.paint("✔"));
            }
            println!();
        }
    }

    Ok(())
}
