pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::Currency;
use crate::core::config::AppConfig;
use crate::providers::AwesomeApiProvider;
use crate::store::{JsonFileStore, QuoteCache};
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Quotes,
    Convert { currency: Currency, amount: f64 },
    History,
    Search { term: String },
}

pub fn quote_provider(config: &AppConfig) -> Result<AwesomeApiProvider> {
    let cache = QuoteCache::new(config.quote_cache_path()?, config.fetch.cache_ttl());
    AwesomeApiProvider::new(
        &config.providers.awesome.base_url,
        config.fetch.timeout(),
        config.fetch.retry_policy(),
        cache,
    )
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Cambio starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = JsonFileStore::new(config.history_path()?);

    match command {
        AppCommand::Quotes => cli::quotes::run(&quote_provider(&config)?).await,
        AppCommand::Convert { currency, amount } => {
            cli::convert::run(&quote_provider(&config)?, &store, currency, amount).await
        }
        AppCommand::History => cli::history::run(&store),
        AppCommand::Search { term } => cli::history::search(&store, &term),
    }
}
