//! Config command: inspect and bootstrap the configuration file.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use crate::error::{LektorError, Result};

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&settings)
                .map_err(|e| LektorError::Config(e.to_string()))?;
            println!("{}", content);
        }

        ConfigAction::Path => {
            println!("{}", Settings::default_config_path().display());
        }

        ConfigAction::Init => {
            let path = Settings::default_config_path();
            if path.exists() {
                Output::info(&format!("Configuration already exists at {}", path.display()));
            } else {
                Settings::default().save_to(&path)?;
                Output::success(&format!("Wrote default configuration to {}", path.display()));
            }
        }
    }

    Ok(())
}
