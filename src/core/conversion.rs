//! Turns a quoted rate and a BRL amount into a persisted conversion record

use super::record::ConversionRecord;
use crate::store::HistoryStore;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Invalid conversion: rate {rate}, amount {original_amount}")]
    Rejected { rate: f64, original_amount: f64 },

    #[error("Failed to persist conversion history: {0}")]
    Storage(#[from] anyhow::Error),
}

pub struct Converter<'a> {
    store: &'a dyn HistoryStore,
}

impl<'a> Converter<'a> {
    pub fn new(store: &'a dyn HistoryStore) -> Self {
        Self { store }
    }

    /// Converts `original_amount` BRL at `rate` and appends the record to
    /// the stored history. Nothing is written when the input is rejected.
    pub fn convert(
        &self,
        rate: f64,
        original_amount: f64,
        source_currency_label: &str,
    ) -> Result<ConversionRecord, ConversionError> {
        let rejected = ConversionError::Rejected {
            rate,
            original_amount,
        };
        if !(rate.is_finite() && rate > 0.0) {
            return Err(rejected);
        }

        let converted_amount = original_amount / rate;
        if !(converted_amount.is_finite() && converted_amount > 0.0) {
            return Err(rejected);
        }

        let record =
            ConversionRecord::now(source_currency_label, original_amount, converted_amount);

        let mut history = self.store.load()?;
        history.push(record.clone());
        self.store.save(&history)?;

        info!(
            label = %record.source_currency_label,
            original_amount,
            converted_amount,
            "Recorded conversion"
        );
        debug!(records = history.len(), "History size");
        Ok(record)
    }
}
