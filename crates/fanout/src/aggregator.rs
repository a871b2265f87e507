//! # Fan-out aggregator
//!
//! Races one concurrent lookup per source address and resolves with whichever
//! attempt succeeds first. Attempts that lose the race are abandoned: the
//! aggregator requests early termination through the shared cancellation
//! token but tolerates collaborators that ignore it and finish on their own.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::config::FanoutConfig;
use crate::error::FanoutError;
use crate::source::SourceLookup;

/// Delivery capacity: one pending winner. Anything beyond that is dropped.
const WINNER_SLOTS: usize = 1;

/// Fan-out, first-success lookup over a set of source addresses.
///
/// Wraps a [`SourceLookup`] collaborator and turns its single-address `get`
/// into a concurrent race across many addresses. Each invocation resolves to
/// exactly one outcome: a delivered value, a cancellation/deadline failure,
/// or exhaustion once every attempt has failed.
pub struct FanoutAggregator {
    lookup: Arc<dyn SourceLookup>,
    config: FanoutConfig,
}

impl FanoutAggregator {
    /// Create an aggregator with the default configuration.
    pub fn new(lookup: Arc<dyn SourceLookup>) -> Self {
        Self::with_config(lookup, FanoutConfig::default())
    }

    /// Create an aggregator with a custom configuration.
    pub fn with_config(lookup: Arc<dyn SourceLookup>, config: FanoutConfig) -> Self {
        Self { lookup, config }
    }

    /// Look up `key` on every address concurrently and return the first
    /// successfully delivered value.
    ///
    /// Addresses are queried in parallel, so list order has no bearing on the
    /// winner; only wall-clock completion order matters. Errors:
    ///
    /// - [`FanoutError::Cancelled`] when `token` fires before a value lands
    ///   (or was already cancelled on entry, in which case nothing is
    ///   launched).
    /// - [`FanoutError::DeadlineExceeded`] when the configured timeout
    ///   elapses first.
    /// - [`FanoutError::Exhausted`] when every attempt fails, including the
    ///   empty address set. Individual failures are never surfaced here; they
    ///   are logged and swallowed.
    #[instrument(skip(self, token), level = "debug")]
    pub async fn get(
        &self,
        addresses: &[String],
        key: &str,
        token: CancellationToken,
    ) -> Result<String, FanoutError> {
        if token.is_cancelled() {
            return Err(FanoutError::Cancelled);
        }

        let attempt_token = token.child_token();
        let outcome = match self.config.timeout {
            Some(limit) => {
                tokio::time::timeout(limit, self.race(addresses, key, &attempt_token))
                    .await
                    .unwrap_or(Err(FanoutError::DeadlineExceeded))
            }
            None => self.race(addresses, key, &attempt_token).await,
        };

        // Request early termination from cooperating attempts. Stragglers
        // that ignore the token keep running in the background and their late
        // results are dropped by the delivery channel.
        attempt_token.cancel();

        outcome
    }

    async fn race(
        &self,
        addresses: &[String],
        key: &str,
        token: &CancellationToken,
    ) -> Result<String, FanoutError> {
        let (tx, mut rx) = mpsc::channel::<String>(WINNER_SLOTS);

        for address in addresses {
            let lookup = Arc::clone(&self.lookup);
            let tx = tx.clone();
            let token = token.clone();
            let address = address.clone();
            let key = key.to_owned();

            tokio::spawn(async move {
                debug!(address = %address, "source attempt started");
                match lookup.get(&address, &key, token).await {
                    Ok(value) => {
                        // The slot may already hold the winner, or the race
                        // may be over and the receiver gone. Either way the
                        // value is dropped without blocking.
                        match tx.try_send(value) {
                            Ok(()) => debug!(address = %address, "value delivered"),
                            Err(_) => {
                                debug!(address = %address, "race already decided, value dropped");
                            }
                        }
                    }
                    Err(error) => {
                        warn!(address = %address, error = %error, "source attempt failed");
                    }
                }
            });
        }

        // The attempts hold the remaining senders. Once the last one finishes
        // without delivering, the channel closes and `recv` resolves to
        // `None`: that is the all-attempts-failed signal, with no separate
        // completion counter. A panicking attempt drops its sender too, so it
        // counts as a failure instead of hanging the race.
        drop(tx);

        tokio::select! {
            _ = token.cancelled() => Err(FanoutError::Cancelled),
            received = rx.recv() => match received {
                Some(value) => Ok(value),
                None => Err(FanoutError::Exhausted {
                    attempted: addresses.len(),
                }),
            },
        }
    }
}
