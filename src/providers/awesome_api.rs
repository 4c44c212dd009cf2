use super::util::RetryPolicy;
use crate::core::quote::{
    Currency, FetchedQuotes, QuoteError, QuoteProvider, QuoteSet, QuoteSource,
};
use crate::store::quote_cache::{QuoteCache, epoch_seconds};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://economia.awesomeapi.com.br";

/// Quotes vs BRL from AwesomeAPI, with retries and a disk cache fallback.
pub struct AwesomeApiProvider {
    base_url: String,
    client: reqwest::Client,
    policy: RetryPolicy,
    cache: QuoteCache,
}

impl AwesomeApiProvider {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        policy: RetryPolicy,
        cache: QuoteCache,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cambio/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            policy,
            cache,
        })
    }

    fn url(&self) -> String {
        let pairs: Vec<String> = Currency::ALL.iter().map(|c| c.api_pair()).collect();
        format!("{}/json/last/{}", self.base_url, pairs.join(","))
    }

    async fn fetch_once(&self, url: &str, attempt: u32) -> Result<QuoteSet, QuoteError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let wait = self.policy.rate_limit_delay(response.headers(), attempt);
            return Err(QuoteError::RateLimited(wait));
        }
        if !status.is_success() {
            return Err(QuoteError::Http(status));
        }

        let text = response.text().await?;
        let quotes: QuoteSet =
            serde_json::from_str(&text).map_err(|e| QuoteError::Parse(e.to_string()))?;
        if quotes.is_empty() {
            return Err(QuoteError::Parse("no quotes in response".to_string()));
        }
        Ok(quotes)
    }

    fn fallback_to_cache(&self) -> Result<FetchedQuotes, QuoteError> {
        let Some(cached) = self.cache.read() else {
            warn!("No usable quote cache");
            return Err(QuoteError::Unavailable);
        };

        let age = cached.age(epoch_seconds());
        let source = self.cache.classify(age);
        info!(age_secs = age.as_secs(), %source, "Using cached quotes");
        Ok(FetchedQuotes {
            quotes: cached.quotes,
            source,
        })
    }
}

#[async_trait]
impl QuoteProvider for AwesomeApiProvider {
    #[instrument(name = "AwesomeQuoteFetch", skip(self))]
    async fn fetch(&self) -> Result<FetchedQuotes, QuoteError> {
        let url = self.url();
        debug!("Requesting quotes from {}", url);

        for attempt in 1..=self.policy.max_attempts {
            let wait = match self.fetch_once(&url, attempt).await {
                Ok(quotes) => {
                    debug!(pairs = quotes.len(), "Received quotes");
                    self.cache.write(&quotes);
                    return Ok(FetchedQuotes {
                        quotes,
                        source: QuoteSource::Live,
                    });
                }
                Err(QuoteError::RateLimited(wait)) => {
                    warn!(attempt, wait_secs = wait.as_secs_f64(), "Quote API rate limited");
                    wait
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Quote request failed");
                    self.policy.backoff(attempt)
                }
            };

            if self.policy.is_final(attempt) {
                break;
            }
            debug!(
                "Attempt {}/{} failed. Retrying in {:?}...",
                attempt, self.policy.max_attempts, wait
            );
            tokio::time::sleep(wait).await;
        }

        self.fallback_to_cache()
    }
}
