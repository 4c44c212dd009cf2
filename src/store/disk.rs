use super::HistoryStore;
use crate::core::record::ConversionRecord;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// History persisted as a pretty-printed JSON array.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serializes `value` with four-space indentation.
pub(crate) fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<ConversionRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No history file at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read history file: {}", self.path.display())
                });
            }
        };

        match serde_json::from_str::<Vec<ConversionRecord>>(&content) {
            Ok(history) => {
                debug!(records = history.len(), "Loaded history");
                Ok(history)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Malformed history file, starting with empty history"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, history: &[ConversionRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let bytes = to_json_pretty(history)?;
        fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))?;
        debug!(records = history.len(), "Saved history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(label: &str, converted_amount: f64) -> ConversionRecord {
        ConversionRecord {
            timestamp: "10/10/2025 12:00:00".to_string(),
            source_currency_label: label.to_string(),
            original_amount: 100.0,
            converted_amount,
        }
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("conversoes.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty_history() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conversoes.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data").join("conversoes.json"));
        let history = vec![record("Euro (EUR)", 3.0), record("Bitcoin (BTC)", 0.01)];

        store.save(&history).unwrap();
        assert_eq!(store.load().unwrap(), history);
    }

    #[test]
    fn test_save_overwrites_and_indents() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("conversoes.json"));

        store.save(&[record("Euro (EUR)", 3.0)]).unwrap();
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());

        store.save(&[record("Euro (EUR)", 3.0)]).unwrap();
        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\n        \"sourceCurrencyLabel\": \"Euro (EUR)\""));
    }
}
