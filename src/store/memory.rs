use super::HistoryStore;
use crate::core::record::ConversionRecord;
use anyhow::{Result, anyhow};
use std::sync::RwLock;
use tracing::debug;

/// In-memory history store
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Vec<ConversionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: Vec<ConversionRecord>) -> Self {
        Self {
            inner: RwLock::new(history),
        }
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<ConversionRecord>> {
        let history = self
            .inner
            .read()
            .map_err(|_| anyhow!("History lock poisoned"))?;
        Ok(history.clone())
    }

    fn save(&self, history: &[ConversionRecord]) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| anyhow!("History lock poisoned"))?;
        *inner = history.to_vec();
        debug!(records = inner.len(), "History SAVE");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_load_save() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        let record = ConversionRecord {
            timestamp: "01/01/2025 00:00:00".to_string(),
            source_currency_label: "Euro (EUR)".to_string(),
            original_amount: 10.0,
            converted_amount: 1.6,
        };
        store.save(std::slice::from_ref(&record)).unwrap();
        assert_eq!(store.load().unwrap(), vec![record.clone()]);

        // Save replaces rather than appends
        store.save(&[record.clone(), record]).unwrap();
        assert_eq!(store.load().unwrap().len(), 2);
    }
}
