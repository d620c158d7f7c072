//! Config command handler.

use clap::Args;
use kotae_core::{config::AppConfig, AppResult};

/// Show the resolved configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Also validate the configuration and fail if it is incomplete
    #[arg(long)]
    pub check: bool,
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        print!("{}", render(config)?);

        if self.check {
            config.validate()?;
            tracing::info!("Configuration is valid");
        }

        Ok(())
    }
}

/// Render the configuration as YAML with the API key redacted.
fn render(config: &AppConfig) -> AppResult<String> {
    let mut value = serde_yaml::to_value(config)?;

    if config.api_key.is_some() {
        if let serde_yaml::Value::Mapping(ref mut map) = value {
            map.insert("api_key".into(), "<redacted>".into());
        }
    }

    Ok(serde_yaml::to_string(&value)?)
}
