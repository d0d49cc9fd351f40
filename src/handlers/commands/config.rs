//! Configuration command handlers

use clap::Subcommand;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
    /// Validate the effective configuration
    Check,
}

pub fn handle(services: &ServiceFactory, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            print!("{}", services.settings.to_toml()?);
            Ok(())
        }
        ConfigCommand::Check => {
            services.settings.validate()?;
            println!("Configuration OK (api: {})", services.settings.api.base_url);
            Ok(())
        }
    }
}
