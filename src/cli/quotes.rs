use super::ui;
use crate::core::{Currency, FetchedQuotes, QuoteError, QuoteProvider, QuoteSource};
use comfy_table::Cell;

pub const UNAVAILABLE_NOTICE: &str =
    "Could not fetch quotes from the API and no cached quotes are available. Try again later.";

/// Fetches quotes behind a spinner.
pub async fn fetch(provider: &dyn QuoteProvider) -> Result<FetchedQuotes, QuoteError> {
    let pb = ui::new_spinner("Fetching quotes...");
    let result = provider.fetch().await;
    pb.finish_and_clear();
    result
}

/// Notice shown when quotes did not come straight from the API.
pub fn source_notice(source: QuoteSource) -> Option<String> {
    match source {
        QuoteSource::Live => None,
        QuoteSource::FreshCache => Some(ui::style_text(
            "Using quotes from the local cache (recent).",
            ui::StyleType::Subtle,
        )),
        QuoteSource::StaleCache => Some(ui::style_text(
            "Using quotes from the local cache (may be outdated).",
            ui::StyleType::Warning,
        )),
    }
}

pub fn unavailable_notice() -> String {
    ui::style_text(UNAVAILABLE_NOTICE, ui::StyleType::Error)
}

fn format_bid(currency: Currency, bid: f64) -> String {
    match currency {
        Currency::Btc => format!("R$ {bid:.2}"),
        _ => format!("R$ {bid:.4}"),
    }
}

pub fn render_quotes(fetched: &FetchedQuotes) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Bid (BRL)"),
        ui::header_cell("Change"),
    ]);

    for currency in Currency::ALL {
        let Some(quote) = fetched.quotes.get(&currency.pair_code()) else {
            continue;
        };
        table.add_row(vec![
            Cell::new(currency.label()),
            ui::amount_cell(format_bid(currency, quote.bid)),
            ui::change_cell(quote.pct_change),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Current rates (vs BRL)", ui::StyleType::Title),
        table
    )
}

pub async fn run(provider: &dyn QuoteProvider) -> anyhow::Result<()> {
    match fetch(provider).await {
        Ok(fetched) => {
            if let Some(notice) = source_notice(fetched.source) {
                println!("{notice}");
            }
            println!("{}", render_quotes(&fetched));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Quotes unavailable");
            println!("{}", unavailable_notice());
        }
    }
    Ok(())
}
