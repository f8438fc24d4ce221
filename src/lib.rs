pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::purchase::PurchaseArgs;
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Purchase(PurchaseArgs),
    Rates { currency: Option<String> },
    Demo,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("cryptosplit starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Purchase(args) => cli::purchase::run(&config, &args).await,
        AppCommand::Rates { currency } => cli::rates::run(&config, currency.as_deref()).await,
        AppCommand::Demo => cli::demo::run(&config).await,
    }
}
