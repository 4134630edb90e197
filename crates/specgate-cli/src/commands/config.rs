//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config, formatter: &Formatter) -> Result<bool> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Init { path, force } => {
            let path = match path {
                Some(path) => path,
                None => Config::path()?,
            };
            if path.exists() && !force {
                return Err(CliError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            Config::default().save_to(&path)?;
            println!("{}", formatter.success(&format!("Wrote {}", path.display())));
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    fn init(path: std::path::PathBuf, force: bool) -> Result<bool> {
        let formatter = Formatter::new(OutputFormat::Table, false);
        execute_config(
            ConfigArgs {
                action: ConfigAction::Init {
                    path: Some(path),
                    force,
                },
            },
            &Config::default(),
            &formatter,
        )
    }

    #[test]
    fn test_init_writes_loadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        init(path.clone(), false).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.engine.conflict.tolerance_factor, 2.0);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        init(path.clone(), false).unwrap();

        assert!(matches!(init(path.clone(), false), Err(CliError::InvalidInput(_))));
        assert!(init(path, true).is_ok());
    }
}
