pub mod config;
pub mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Environment};

#[derive(Parser)]
#[command(name = "dalkom-api")]
#[command(about = "Dalkom API - photocard catalog and binder backend")]
#[command(version)]
pub struct Cli {
    /// development, staging or production. Falls back to APP_ENV, then development.
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Server {
        #[arg(long, short, help = "Port to listen on (overrides PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Inspect the effective configuration")]
    Config {
        #[command(subcommand)]
        cmd: config::ConfigCommands,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let profile = cli
        .profile
        .or_else(|| std::env::var("APP_ENV").ok())
        .unwrap_or_default();
    let environment = Environment::from_profile(&profile);

    if environment != Environment::Production {
        // Missing .env is fine.
        let _ = dotenvy::dotenv();
    }
    init_tracing(environment);

    let config = AppConfig::for_environment(environment).with_env_overrides();
    tracing::info!("Starting Dalkom API in {:?} mode", config.environment);

    match cli.command {
        Commands::Server { port } => server::serve(config, port).await,
        Commands::Config { cmd } => config::handle(cmd, &config),
    }
}

fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(environment.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
