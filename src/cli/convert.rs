use super::{quotes, ui};
use crate::core::{ConversionError, ConversionRecord, Converter, Currency, QuoteProvider};
use crate::store::HistoryStore;
use anyhow::Result;
use tracing::warn;

pub fn render_conversion(record: &ConversionRecord, currency: Currency) -> String {
    format!(
        "{}\nR$ {:.2} is worth {} {}.",
        ui::style_text("Conversion done:", ui::StyleType::Success),
        record.original_amount,
        ui::style_text(
            &format!("{:.2}", record.converted_amount),
            ui::StyleType::TotalValue
        ),
        currency.code()
    )
}

/// Fetches the current rate for `currency` and records the conversion of
/// `amount` BRL. Missing quotes and rejected amounts are reported to the
/// user without failing the command.
pub async fn run(
    provider: &dyn QuoteProvider,
    store: &dyn HistoryStore,
    currency: Currency,
    amount: f64,
) -> Result<()> {
    let fetched = match quotes::fetch(provider).await {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!(error = %e, "Quotes unavailable");
            println!("{}", quotes::unavailable_notice());
            return Ok(());
        }
    };
    if let Some(notice) = quotes::source_notice(fetched.source) {
        println!("{notice}");
    }

    let Some(rate) = fetched.rate(currency) else {
        println!(
            "{}",
            ui::style_text(
                &format!("No quote available for {}.", currency.pair_code()),
                ui::StyleType::Error
            )
        );
        return Ok(());
    };

    match Converter::new(store).convert(rate, amount, currency.label()) {
        Ok(record) => println!("{}", render_conversion(&record, currency)),
        Err(ConversionError::Rejected { .. }) => println!(
            "{}",
            ui::style_text("Invalid amount for conversion.", ui::StyleType::Error)
        ),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
