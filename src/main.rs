use anyhow::Result;
use cambio::core::Currency;
use cambio::core::log::init_logging;
use clap::{CommandFactory, Parser, Subcommand};

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

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display current rates against BRL
    Quotes,
    /// Convert an amount in BRL and record it in the history
    Convert {
        /// Source currency code (USD, EUR, BTC or JPY)
        currency: String,
        /// Amount in BRL
        amount: f64,
    },
    /// Display the conversion history ordered by converted amount
    History,
    /// Find the first conversion whose currency matches a term
    Search {
        /// Currency code or part of it, e.g. USD
        term: String,
    },
}

impl TryFrom<Commands> for cambio::AppCommand {
    type Error = anyhow::Error;

    fn try_from(cmd: Commands) -> Result<cambio::AppCommand> {
        Ok(match cmd {
            Commands::Quotes => cambio::AppCommand::Quotes,
            Commands::Convert { currency, amount } => cambio::AppCommand::Convert {
                currency: currency.parse::<Currency>()?,
                amount,
            },
            Commands::History => cambio::AppCommand::History,
            Commands::Search { term } => cambio::AppCommand::Search { term },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => cambio::cli::setup::setup(),
        Some(cmd) => match cmd.try_into() {
            Ok(command) => cambio::run_command(command, cli.config_path.as_deref()).await,
            Err(e) => Err(e),
        },
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
