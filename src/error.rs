use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures surfaced by the recording and reporting core.
#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Transaction already recorded for user {user_id} at {created_at}")]
    Duplicate {
        user_id: i64,
        created_at: DateTime<Utc>,
    },
    #[error("{operation} failed")]
    Store {
        operation: String,
        #[source]
        source: anyhow::Error,
    },
}

impl LedgerError {
    pub(crate) fn store(operation: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Store {
            operation: operation.into(),
            source,
        }
    }
}

pub(crate) type LedgerResult<T> = std::result::Result<T, LedgerError>;
