//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod history;
pub mod log;
pub mod quote;
pub mod record;

// Re-export main types for cleaner imports
pub use conversion::{ConversionError, Converter};
pub use quote::{
    Currency, FetchedQuotes, Quote, QuoteError, QuoteProvider, QuoteSet, QuoteSource,
};
pub use record::ConversionRecord;
