//! Error types for the fan-out race.

/// Terminal outcome of a race that ended without a delivered value.
#[derive(Debug, thiserror::Error)]
pub enum FanoutError {
    /// The caller's cancellation signal fired before any source delivered.
    #[error("lookup cancelled")]
    Cancelled,

    /// The configured race timeout elapsed before any source delivered.
    #[error("lookup deadline exceeded")]
    DeadlineExceeded,

    /// Every attempt finished without producing a value.
    #[error("no source delivered a value ({attempted} attempted)")]
    Exhausted { attempted: usize },
}

impl FanoutError {
    /// True when the race was cut short by time or an external signal rather
    /// than by the sources themselves running out.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}
