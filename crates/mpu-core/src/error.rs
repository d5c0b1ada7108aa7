//! Driver error type

use thiserror_no_std::Error;

/// Errors returned by [`SensorDriver`](crate::SensorDriver) operations.
///
/// `E` is the error type of the underlying [`RegisterBus`](crate::RegisterBus).
/// Every error is terminal for the operation in progress; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error<E: core::fmt::Debug> {
    #[error("no bus transport attached")]
    TransportUnavailable,
    #[error("WHO_AM_I reported {reported:#04x}, expected {expected:#04x}")]
    IdentityMismatch { reported: u8, expected: u8 },
    #[error("register write failed: {0:?}")]
    WriteFailed(E),
    #[error("register read failed: {0:?}")]
    ReadFailed(E),
    #[error("invalid full-scale select code {0}")]
    InvalidScaleSelect(u8),
    #[error("device has not been initialized")]
    NotInitialized,
}
