use clap::Subcommand;

use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Print the effective configuration as JSON (secrets omitted)")]
    Show,

    #[command(about = "Validate the configuration and exit")]
    Check,
}

pub fn handle(cmd: ConfigCommands, config: &AppConfig) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
            Ok(())
        }
        ConfigCommands::Check => {
            config.validate()?;
            println!("Configuration OK ({:?})", config.environment);
            Ok(())
        }
    }
}
