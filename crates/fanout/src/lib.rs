//! # Fanout KV
//!
//! First-success fan-out reads over replicated key-value sources.
//!
//! Given a key and a set of candidate source addresses, [`FanoutAggregator`]
//! queries every source concurrently and resolves with the value from
//! whichever source answers successfully first, honoring cancellation and an
//! optional deadline along the way. The per-source lookup lives behind the
//! [`SourceLookup`] trait, so real network clients, in-memory stubs and
//! latency simulators are interchangeable collaborators.
//!
//! ## Features
//!
//! - One concurrent lookup attempt per address, first success wins
//! - Single-slot winner delivery: late results are dropped, never blocked on
//! - Cooperative cancellation via `tokio_util`'s `CancellationToken`
//! - Deterministic resolution when every source fails or the set is empty
//! - Simulated sources for tests and experimentation in [`sim`]
//!
//! ## License
//!
//! MIT License
//!
//! ## Authors
//!
//! - hua0512

pub mod aggregator;
pub mod config;
pub mod error;
pub mod sim;
pub mod source;

pub use aggregator::FanoutAggregator;
pub use config::FanoutConfig;
pub use error::FanoutError;
pub use source::{SourceError, SourceLookup};
