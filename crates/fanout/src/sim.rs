//! Simulated source lookups.
//!
//! Ready-made [`SourceLookup`] implementations for tests, examples and local
//! experimentation: an in-memory table stub and a latency simulator. Neither
//! performs any I/O.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rand::RngExt;
use tokio_util::sync::CancellationToken;

use crate::source::{SourceError, SourceLookup};

/// In-memory stub serving values from per-address key/value tables.
///
/// Lookups against addresses or keys without an entry fail, which makes the
/// stub convenient for scripting partial-failure scenarios.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    tables: HashMap<String, HashMap<String, String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` for `key` at `address`.
    pub fn insert(
        &mut self,
        address: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.tables
            .entry(address.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }
}

#[async_trait]
impl SourceLookup for StaticSource {
    async fn get(
        &self,
        address: &str,
        key: &str,
        _token: CancellationToken,
    ) -> Result<String, SourceError> {
        self.tables
            .get(address)
            .and_then(|table| table.get(key))
            .cloned()
            .ok_or_else(|| {
                std::io::Error::other(format!("no value for key `{key}` at `{address}`")).into()
            })
    }
}

/// Latency simulator answering every lookup with the key itself after a
/// uniformly random delay.
#[derive(Debug, Clone)]
pub struct RandomDelaySource {
    min_delay: Duration,
    max_delay: Duration,
}

impl Default for RandomDelaySource {
    fn default() -> Self {
        Self::new(Duration::from_micros(100), Duration::from_micros(200))
    }
}

impl RandomDelaySource {
    /// Simulate lookups taking between `min_delay` and `max_delay`.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay,
            max_delay,
        }
    }
}

#[async_trait]
impl SourceLookup for RandomDelaySource {
    async fn get(
        &self,
        _address: &str,
        key: &str,
        token: CancellationToken,
    ) -> Result<String, SourceError> {
        let delay_micros = rand::rng().random_range(
            self.min_delay.as_micros() as u64..=self.max_delay.as_micros() as u64,
        );

        tokio::select! {
            _ = token.cancelled() => Err(std::io::Error::other("lookup cancelled").into()),
            _ = tokio::time::sleep(Duration::from_micros(delay_micros)) => Ok(key.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "10.3.0.1";

    #[tokio::test]
    async fn static_source_serves_inserted_values() {
        let mut source = StaticSource::new();
        source.insert(ADDRESS, "greeting", "hello");

        let value = source
            .get(ADDRESS, "greeting", CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(value, "hello");
    }

    #[tokio::test]
    async fn static_source_fails_on_missing_entries() {
        let source = StaticSource::new();
        let result = source.get(ADDRESS, "greeting", CancellationToken::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn random_delay_source_echoes_the_key() {
        let source = RandomDelaySource::default();
        let value = source
            .get(ADDRESS, "greeting", CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(value, "greeting");
    }

    #[tokio::test]
    async fn random_delay_source_honors_cancellation() {
        let source = RandomDelaySource::new(Duration::from_secs(5), Duration::from_secs(5));
        let token = CancellationToken::new();
        token.cancel();

        let result = source.get(ADDRESS, "greeting", token).await;
        assert!(result.is_err());
    }
}
