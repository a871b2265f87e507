//! Source lookup abstraction.
//!
//! The aggregator delegates every per-address read to this trait and treats
//! the implementation as opaque: a real network client, an in-memory table or
//! a latency simulator all look the same from the race's point of view.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Failure of a single source lookup.
///
/// The aggregator never branches on the failure kind, so implementations may
/// surface whatever error type they already have.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// A single-key lookup against one source address.
///
/// Implementations may block for an arbitrary duration. The supplied token is
/// a best-effort cancellation request: honoring it lets an abandoned attempt
/// stop early, but the aggregator stays correct even when it is ignored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceLookup: Send + Sync {
    /// Fetch the value stored for `key` at `address`.
    async fn get(
        &self,
        address: &str,
        key: &str,
        token: CancellationToken,
    ) -> Result<String, SourceError>;
}
