pub mod disk;
pub mod memory;
pub mod quote_cache;

use crate::core::record::ConversionRecord;
use anyhow::Result;

pub use disk::JsonFileStore;
pub use memory::MemoryStore;
pub use quote_cache::{CachedQuotes, QuoteCache};

/// Persistence for the conversion history.
pub trait HistoryStore: Send + Sync {
    /// Loads the full history in creation order. A missing or malformed
    /// backing store yields an empty history.
    fn load(&self) -> Result<Vec<ConversionRecord>>;

    /// Replaces the stored history with `history`.
    fn save(&self, history: &[ConversionRecord]) -> Result<()>;
}
