//! Crate-wide error types using thiserror
//!
//! Every fallible operation in the crate returns `ElGamalError`. Errors are
//! synchronous and final: no operation returns a partial result, and nothing
//! is retried internally.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElGamalError {
    /// Plaintext outside `[0, 2^40 - 1]` or not an integer.
    #[error("Range error: plaintext is not an integer in the uint40 range: {0}")]
    Range(String),

    /// Externally supplied coordinates do not satisfy the curve equation.
    #[error("Invalid point: ({x}, {y}) is not on the BabyJubJub curve")]
    InvalidPoint { x: String, y: String },

    #[error("Invalid field element: {0}")]
    InvalidFieldElement(String),

    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// Curve constants failed their one-time self-check.
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Insufficient balance: cannot transfer {value} out of {balance}")]
    InsufficientBalance { balance: u64, value: u64 },

    #[error("Balance mismatch: encrypted balance does not decrypt to the claimed clear balance")]
    BalanceMismatch,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using ElGamalError
pub type Result<T> = std::result::Result<T, ElGamalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_message() {
        let err = ElGamalError::Range("1099511627776".to_string());
        assert!(err.to_string().contains("uint40 range"));
        assert!(err.to_string().contains("1099511627776"));
    }

    #[test]
    fn test_invalid_point_message_carries_coordinates() {
        let err = ElGamalError::InvalidPoint {
            x: "1".to_string(),
            y: "2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid point: (1, 2) is not on the BabyJubJub curve"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ElGamalError = io.into();
        assert!(matches!(err, ElGamalError::Io(_)));
    }
}
