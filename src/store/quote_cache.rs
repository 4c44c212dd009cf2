use super::disk::to_json_pretty;
use crate::core::quote::{QuoteSet, QuoteSource};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Last successful quote fetch as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedQuotes {
    /// Epoch seconds at which the quotes were fetched.
    pub timestamp: f64,
    #[serde(alias = "cotacoes")]
    pub quotes: QuoteSet,
}

impl CachedQuotes {
    /// Time elapsed since the fetch. Saturates at `Duration::MAX` for
    /// timestamps too far in the past to represent.
    pub fn age(&self, now: f64) -> Duration {
        Duration::try_from_secs_f64((now - self.timestamp).max(0.0)).unwrap_or(Duration::MAX)
    }
}

pub(crate) fn epoch_seconds() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Single-entry disk cache of the last fetched `QuoteSet`.
pub struct QuoteCache {
    path: PathBuf,
    ttl: Duration,
}

impl QuoteCache {
    pub fn new<P: AsRef<Path>>(path: P, ttl: Duration) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ttl,
        }
    }

    /// Overwrites the cache with `quotes`. Failures are logged and dropped.
    pub fn write(&self, quotes: &QuoteSet) {
        let entry = CachedQuotes {
            timestamp: epoch_seconds(),
            quotes: quotes.clone(),
        };
        if let Err(e) = self.write_entry(&entry) {
            warn!(error = %e, "Failed to write quote cache");
        }
    }

    pub(crate) fn write_entry(&self, entry: &CachedQuotes) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&self.path, to_json_pretty(entry)?)
            .with_context(|| format!("Failed to write quote cache: {}", self.path.display()))?;
        debug!("Quote cache PUT");
        Ok(())
    }

    /// Reads the cached quotes, if a readable non-empty cache exists.
    pub fn read(&self) -> Option<CachedQuotes> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(error = %e, "Quote cache MISS");
                return None;
            }
        };

        match serde_json::from_str::<CachedQuotes>(&content) {
            Ok(entry) if !entry.quotes.is_empty() => {
                debug!("Quote cache HIT");
                Some(entry)
            }
            Ok(_) => {
                debug!("Quote cache is empty");
                None
            }
            Err(e) => {
                warn!(error = %e, "Unreadable quote cache");
                None
            }
        }
    }

    /// Freshness of a cache entry of the given age.
    pub fn classify(&self, age: Duration) -> QuoteSource {
        if age <= self.ttl {
            QuoteSource::FreshCache
        } else {
            QuoteSource::StaleCache
        }
    }
}
