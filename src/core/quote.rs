//! Quote abstractions and core types

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Source currencies that can be converted from BRL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Currency {
    Usd,
    Eur,
    Btc,
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Btc, Currency::Jpy];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Btc => "BTC",
            Currency::Jpy => "JPY",
        }
    }

    /// Human readable label stored in conversion records.
    pub fn label(&self) -> &'static str {
        match self {
            Currency::Usd => "Dólar Americano (USD)",
            Currency::Eur => "Euro (EUR)",
            Currency::Btc => "Bitcoin (BTC)",
            Currency::Jpy => "Iene Japonês (JPY)",
        }
    }

    /// Key of this currency in a `QuoteSet`, e.g. `USDBRL`.
    pub fn pair_code(&self) -> String {
        format!("{}BRL", self.code())
    }

    /// Pair as requested from the quote API, e.g. `USD-BRL`.
    pub fn api_pair(&self) -> String {
        format!("{}-BRL", self.code())
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "BTC" => Ok(Currency::Btc),
            "JPY" => Ok(Currency::Jpy),
            _ => Err(anyhow::anyhow!("Unsupported currency: {}", s)),
        }
    }
}

// AwesomeAPI sends numeric fields as strings.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(deserialize_with = "number_or_string")]
    pub bid: f64,
    #[serde(rename = "pctChange", deserialize_with = "number_or_string")]
    pub pct_change: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Pair code (e.g. `USDBRL`) to quote.
pub type QuoteSet = HashMap<String, Quote>;

/// Where a `QuoteSet` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSource {
    Live,
    FreshCache,
    StaleCache,
}

impl Display for QuoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QuoteSource::Live => "live",
            QuoteSource::FreshCache => "fresh-cache",
            QuoteSource::StaleCache => "stale-cache",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone)]
pub struct FetchedQuotes {
    pub quotes: QuoteSet,
    pub source: QuoteSource,
}

impl FetchedQuotes {
    /// Bid rate for `currency`, if the set carries its pair.
    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.quotes.get(&currency.pair_code()).map(|q| q.bid)
    }
}

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Rate limited, retry after {0:?}")]
    RateLimited(Duration),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Failed to parse quote response: {0}")]
    Parse(String),

    #[error("Quotes unavailable: API exhausted and no usable cache")]
    Unavailable,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches the current quotes. Transient failures are handled inside;
    /// only `QuoteError::Unavailable` is returned to callers.
    async fn fetch(&self) -> Result<FetchedQuotes, QuoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parsing_is_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" Jpy ".parse::<Currency>().unwrap(), Currency::Jpy);
        assert!("GBP".parse::<Currency>().is_err());
    }

    #[test]
    fn test_currency_pairs() {
        assert_eq!(Currency::Eur.pair_code(), "EURBRL");
        assert_eq!(Currency::Btc.api_pair(), "BTC-BRL");
        assert_eq!(Currency::Usd.label(), "Dólar Americano (USD)");
    }

    #[test]
    fn test_quote_accepts_strings_and_numbers() {
        let json = r#"{
            "USDBRL": {"code": "USD", "bid": "5.4321", "pctChange": "-0.12", "name": "Dólar Americano/Real Brasileiro"},
            "EURBRL": {"bid": 6.01, "pctChange": 0.5}
        }"#;
        let quotes: QuoteSet = serde_json::from_str(json).unwrap();

        let usd = &quotes["USDBRL"];
        assert_eq!(usd.bid, 5.4321);
        assert_eq!(usd.pct_change, -0.12);
        assert_eq!(usd.name.as_deref(), Some("Dólar Americano/Real Brasileiro"));
        assert_eq!(quotes["EURBRL"].bid, 6.01);
        assert!(quotes["EURBRL"].name.is_none());
    }

    #[test]
    fn test_quote_rejects_non_numeric_bid() {
        let json = r#"{"USDBRL": {"bid": "abc", "pctChange": "0"}}"#;
        assert!(serde_json::from_str::<QuoteSet>(json).is_err());
    }

    #[test]
    fn test_fetched_quotes_rate_lookup() {
        let mut quotes = QuoteSet::new();
        quotes.insert(
            "USDBRL".to_string(),
            Quote {
                bid: 5.0,
                pct_change: 0.0,
                name: None,
            },
        );
        let fetched = FetchedQuotes {
            quotes,
            source: QuoteSource::Live,
        };
        assert_eq!(fetched.rate(Currency::Usd), Some(5.0));
        assert_eq!(fetched.rate(Currency::Eur), None);
    }
}
