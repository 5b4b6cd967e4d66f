use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::open_store;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the storage root with its `databases/` and `files/` folders
///  - the main database and its migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.data_dir.as_deref(), cli.test)?;

    println!("⚙️  Initializing rcheckin…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Data dir    : {}", cfg.data_dir);

    let store = open_store(&cfg)?;
    let main = store.registry().main()?;
    std::fs::create_dir_all(store.registry().layout().files_dir())?;

    main.with_conn(|conn| {
        ttlog_quiet(
            conn,
            "init",
            "",
            &format!("Storage initialized at {}", cfg.data_dir),
        );
        Ok(())
    })?;
    let db_path = main.path()?;
    drop(main);
    store.registry().release_all()?;

    success(format!("Main database ready at {}", db_path.display()));
    Ok(())
}
