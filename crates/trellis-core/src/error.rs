//! Error types for Trellis core.

use thiserror::Error;

/// Failures reported by [`Signal`](crate::Signal).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// No slot is connected under this id.
    #[error("invalid or disconnected connection id")]
    InvalidConnection,
}
