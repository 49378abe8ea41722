use clap::Subcommand;
use colored::Colorize;
use plugctl_config::Config;
use plugctl_logger as logger;
use std::path::PathBuf;

use crate::errors::CliError;
use crate::GlobalOpts;

const SUPPORTED_KEYS: &[&str] = &["root"];

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Set a configuration value
    Set { key: String, value: String },
    /// Print the configuration file path
    Path,
}

pub fn handle_config(action: &ConfigAction, opts: &GlobalOpts) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", "Configuration:".bold().green());
            match &config.root {
                Some(root) => println!("  {}: {}", "root".cyan(), root.display()),
                None => {
                    if opts.verbosity_level() > 0 {
                        println!("  {}", "(empty)".yellow());
                    }
                }
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "root" => config.root = Some(PathBuf::from(value)),
                _ => {
                    return Err(CliError::UnknownConfigKey {
                        key: key.clone(),
                        supported: SUPPORTED_KEYS.join(", "),
                    })
                }
            }
            config.save()?;
            logger::success(&format!("Set {} = {}", key, value));
            Ok(())
        }
        ConfigAction::Path => {
            let path = Config::path()?;
            logger::debug(&format!("Reading config from: {}", path.display()));
            println!("{}", path.display());
            Ok(())
        }
    }
}
