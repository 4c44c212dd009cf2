use crate::providers::RetryPolicy;
use crate::providers::awesome_api::DEFAULT_BASE_URL;
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const HISTORY_FILE: &str = "conversoes.json";
pub const QUOTE_CACHE_FILE: &str = "last_cotacoes.json";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AwesomeProviderConfig {
    pub base_url: String,
}

impl Default for AwesomeProviderConfig {
    fn default() -> Self {
        AwesomeProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub awesome: AwesomeProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    pub max_attempts: u32,
    pub backoff_factor_secs: f64,
    pub timeout_secs: f64,
    pub cache_ttl_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            max_attempts: 3,
            backoff_factor_secs: 1.0,
            timeout_secs: 5.0,
            cache_ttl_secs: 300,
        }
    }
}

fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
}

impl FetchConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff_factor: seconds(self.backoff_factor_secs),
        }
    }

    pub fn timeout(&self) -> Duration {
        seconds(self.timeout_secs)
    }

    /// Rejects durations that are negative, NaN or too large to represent.
    pub fn validate(&self) -> Result<()> {
        for (name, secs) in [
            ("backoff_factor_secs", self.backoff_factor_secs),
            ("timeout_secs", self.timeout_secs),
        ] {
            if secs < 0.0 || Duration::try_from_secs_f64(secs).is_err() {
                bail!("fetch.{name} must be a non-negative number of seconds, got {secs}");
            }
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    /// Loads the default config file, falling back to defaults when none
    /// has been set up.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("br", "cambio", "cambio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("br", "cambio", "cambio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn history_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(HISTORY_FILE))
    }

    pub fn quote_cache_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(QUOTE_CACHE_FILE))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .fetch
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  awesome:
    base_url: "http://example.com/awesome"
fetch:
  max_attempts: 5
  backoff_factor_secs: 0.5
  timeout_secs: 2
  cache_ttl_secs: 60
data_path: "/tmp/cambio"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.awesome.base_url, "http://example.com/awesome");
        assert_eq!(config.fetch.max_attempts, 5);
        assert_eq!(
            config.fetch.retry_policy().backoff_factor,
            Duration::from_millis(500)
        );
        assert_eq!(config.fetch.timeout(), Duration::from_secs(2));
        assert_eq!(config.fetch.cache_ttl(), Duration::from_secs(60));
        assert_eq!(
            config.history_path().unwrap(),
            PathBuf::from("/tmp/cambio").join(HISTORY_FILE)
        );
        assert_eq!(
            config.quote_cache_path().unwrap(),
            PathBuf::from("/tmp/cambio").join(QUOTE_CACHE_FILE)
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("fetch:\n  max_attempts: 2\n").unwrap();
        assert_eq!(config.providers.awesome.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.fetch.max_attempts, 2);
        assert_eq!(config.fetch.timeout(), Duration::from_secs(5));
        assert_eq!(config.fetch.cache_ttl(), Duration::from_secs(300));
        assert_eq!(
            config.fetch.retry_policy().backoff_factor,
            RetryPolicy::default().backoff_factor
        );
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("nope.yaml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_out_of_range_durations_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        for fetch in [
            "timeout_secs: 1e30",
            "timeout_secs: .inf",
            "timeout_secs: .nan",
            "backoff_factor_secs: -1",
        ] {
            fs::write(&path, format!("fetch:\n  {fetch}\n")).unwrap();
            let err = AppConfig::load_from_path(&path).unwrap_err();
            assert!(
                format!("{err:#}").contains("must be a non-negative number of seconds"),
                "{fetch}: {err:#}"
            );
        }
    }

    #[test]
    fn test_unvalidated_durations_saturate() {
        let config: AppConfig = serde_yaml::from_str("fetch:\n  timeout_secs: 1e30\n").unwrap();
        assert_eq!(config.fetch.timeout(), Duration::MAX);
    }
}
