//! Error taxonomy for the credit ledger
//!
//! Domain errors and infrastructure errors are kept apart: domain errors
//! (insufficient credits, invalid amounts) are final and must never be
//! retried, while store errors are transient and may be retried by the
//! caller.

use thiserror::Error;

/// Ledger-level error returned by credit operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient credits: {available} available, {requested} requested")]
    InsufficientCredits { available: u32, requested: u32 },

    #[error("amount must be a positive number of credits")]
    InvalidAmount,

    #[error("credit balance overflow")]
    BalanceOverflow,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Whether the caller may retry the operation as-is.
    ///
    /// Domain failures are final; only infrastructure failures are
    /// worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Store(_))
    }
}

/// Infrastructure error raised by a ledger store backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("write conflict on account {user_id}")]
    Conflict { user_id: String },

    #[error("retry budget exhausted for account {user_id} after {attempts} attempts")]
    RetryExhausted { user_id: String, attempts: u32 },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_credits_display() {
        let err = LedgerError::InsufficientCredits {
            available: 0,
            requested: 1,
        };
        assert_eq!(
            err.to_string(),
            "insufficient credits: 0 available, 1 requested"
        );
    }

    #[test]
    fn test_store_error_wraps_into_ledger_error() {
        let store_err = StoreError::Unavailable("connection refused".to_string());
        let ledger_err: LedgerError = store_err.into();
        assert!(matches!(ledger_err, LedgerError::Store(_)));
        assert!(ledger_err.is_retryable());
    }

    #[test]
    fn test_domain_errors_are_not_retryable() {
        assert!(!LedgerError::InvalidAmount.is_retryable());
        assert!(!LedgerError::InsufficientCredits {
            available: 2,
            requested: 5
        }
        .is_retryable());
    }

    #[test]
    fn test_retry_exhausted_display() {
        let err = StoreError::RetryExhausted {
            user_id: "uid_1".to_string(),
            attempts: 8,
        };
        assert!(err.to_string().contains("uid_1"));
        assert!(err.to_string().contains('8'));
    }
}
