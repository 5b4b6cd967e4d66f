use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            let mut shown = cfg.clone();
            if shown.master_password.is_some() {
                shown.master_password = Some("********".into());
            }

            println!("📄 Current configuration ({}):\n", path.display());
            let yaml = serde_yaml::to_string(&shown).map_err(|e| AppError::Config(e.to_string()))?;
            println!("{yaml}");
        }

        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {}; defaults are in use. Run `rcheckin init`.",
                    path.display()
                ));
                return Ok(());
            }

            let missing = Config::missing_fields(&path)?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                for field in missing {
                    warning(format!("Missing field '{field}' (default value in use)"));
                }
            }
        }
    }

    Ok(())
}
