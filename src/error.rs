use thiserror::Error;

/// Failure modes of the pairing engine.
///
/// Every fallible operation reports its failure as a value; malformed input
/// data never panics. `InvalidLoopCounter` guards the compiled-in Miller
/// loop schedule and is unreachable for the shipped curve data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PairingError {
    #[error("invalid input sizes: P and Q must be non-empty and of equal length")]
    SizeMismatch,

    #[error("invalid buffer size: expected {expected} bytes, got {got}")]
    InvalidBufferSize { expected: usize, got: usize },

    #[error("element is not invertible")]
    NonInvertible,

    #[error("invalid digit in Miller loop counter")]
    InvalidLoopCounter,
}
