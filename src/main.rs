use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use cryptosplit::cli::purchase::PurchaseArgs;
use cryptosplit::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cryptosplit::AppCommand {
    fn from(cmd: Commands) -> cryptosplit::AppCommand {
        match cmd {
            Commands::Purchase {
                amount,
                btc_ratio,
                eth_ratio,
                currency,
            } => cryptosplit::AppCommand::Purchase(PurchaseArgs {
                amount,
                btc_ratio,
                eth_ratio,
                currency,
            }),
            Commands::Rates { currency } => cryptosplit::AppCommand::Rates { currency },
            Commands::Demo => cryptosplit::AppCommand::Demo,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show how much BTC and ETH an amount buys
    Purchase {
        /// Amount of fiat currency to spend
        #[arg(short, long, allow_negative_numbers = true)]
        amount: f64,

        /// Share of the amount spent on BTC, e.g. 0.7
        #[arg(short, long, allow_hyphen_values = true)]
        btc_ratio: Option<String>,

        /// Share of the amount spent on ETH, e.g. 0.3
        #[arg(short, long, allow_hyphen_values = true)]
        eth_ratio: Option<String>,

        /// Fiat currency code, e.g. USD
        #[arg(long)]
        currency: Option<String>,
    },
    /// Display current BTC and ETH exchange rates
    Rates {
        /// Fiat currency code, e.g. USD
        #[arg(long)]
        currency: Option<String>,
    },
    /// Run the sample purchase scenarios
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => cryptosplit::cli::setup::setup(),
        Some(cmd) => cryptosplit::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
