use chrono::Local;
use serde::{Deserialize, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One completed conversion. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    #[serde(alias = "data")]
    pub timestamp: String,
    #[serde(alias = "moeda_origem")]
    pub source_currency_label: String,
    #[serde(alias = "valor_original")]
    pub original_amount: f64,
    #[serde(alias = "valor_convertido")]
    pub converted_amount: f64,
}

impl ConversionRecord {
    /// Builds a record stamped with the current local time.
    pub fn now(source_currency_label: &str, original_amount: f64, converted_amount: f64) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            source_currency_label: source_currency_label.to_string(),
            original_amount,
            converted_amount,
        }
    }
}
