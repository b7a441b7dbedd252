pub mod cli;
pub mod core;
pub mod pipeline;
pub mod providers;
pub mod server;

use anyhow::Result;
use tracing::{debug, info};

/// Commands that need a resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Serve,
    Show,
    Series { tax: String },
    Means,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("brlfx starting...");

    let config = crate::core::config::AppConfig::resolve(config_path)?;
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Serve => server::serve(&config).await,
        AppCommand::Show => cli::rates::run_show(&config).await,
        AppCommand::Series { tax } => cli::rates::run_series(&config, &tax).await,
        AppCommand::Means => cli::rates::run_means(&config).await,
    }
}
