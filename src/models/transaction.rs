use chrono::{DateTime, Utc};

use super::OperationType;

/// Largest amount a single record may carry. Keeps any window total well
/// inside the signed 64-bit range SQLite sums in.
pub const MAX_QUANTITIES: u64 = 1_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub telegram_id: i64,
    pub created_at: DateTime<Utc>,
    pub operation_type: OperationType,
    /// Unsigned magnitude; the direction lives in `operation_type`.
    pub quantities: u64,
    pub category: String,
    pub description: String,
}

impl Transaction {
    pub fn new(
        telegram_id: i64,
        created_at: DateTime<Utc>,
        operation_type: OperationType,
        quantities: u64,
        category: String,
        description: String,
    ) -> Self {
        Self {
            id: None,
            telegram_id,
            created_at,
            operation_type,
            quantities,
            category,
            description,
        }
    }
}
