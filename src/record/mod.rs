use chrono::{DateTime, SubsecRound, Utc};

use crate::db::TransactionStore;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{OperationType, Transaction, MAX_QUANTITIES};

/// Amount and note as typed by the user: `"<amount>, <description>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntryPayload {
    pub(crate) amount: u64,
    pub(crate) description: String,
}

impl EntryPayload {
    /// The separator is required; the description after it may be empty.
    pub(crate) fn parse(text: &str) -> LedgerResult<Self> {
        let (amount, description) = text.split_once(',').ok_or_else(|| {
            LedgerError::Validation("expected \"<amount>, <description>\"".into())
        })?;
        let amount = amount.trim();
        let parsed: u64 = amount.parse().map_err(|_| {
            LedgerError::Validation(format!(
                "amount must be a non-negative whole number, got {amount:?}"
            ))
        })?;
        if parsed > MAX_QUANTITIES {
            return Err(LedgerError::Validation(format!(
                "amount {parsed} is too large, the limit is {MAX_QUANTITIES}"
            )));
        }
        Ok(Self {
            amount: parsed,
            description: description.trim().to_string(),
        })
    }
}

/// Validates and stores new transactions, one per user and instant.
pub(crate) struct Recorder<S> {
    store: S,
}

impl<S: TransactionStore> Recorder<S> {
    pub(crate) fn new(store: S) -> Self {
        Self { store }
    }

    /// Parse `payload` and record it under `category`. Returns the new row id.
    pub(crate) fn record(
        &self,
        user_id: i64,
        created_at: DateTime<Utc>,
        op: OperationType,
        payload: &str,
        category: &str,
    ) -> LedgerResult<i64> {
        let entry = EntryPayload::parse(payload)?;
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation("category is required".into()));
        }
        self.insert(Transaction::new(
            user_id,
            created_at,
            op,
            entry.amount,
            category.to_string(),
            entry.description,
        ))
    }

    /// Store `txn` unless the user already has a transaction at that instant.
    pub(crate) fn insert(&self, mut txn: Transaction) -> LedgerResult<i64> {
        // Storage keeps microseconds; compare at the same precision.
        txn.created_at = txn.created_at.trunc_subsecs(6);
        let duplicate = || {
            tracing::warn!(
                user_id = txn.telegram_id,
                created_at = %txn.created_at,
                "transaction already exists"
            );
            LedgerError::Duplicate {
                user_id: txn.telegram_id,
                created_at: txn.created_at,
            }
        };

        let existing = self
            .store
            .find_transaction(txn.telegram_id, &txn.created_at)
            .map_err(|e| LedgerError::store("duplicate lookup", e))?;
        if existing.is_some() {
            return Err(duplicate());
        }

        // The store's unique key also catches a concurrent insert that
        // slipped in after the lookup.
        match self.store.insert_transaction(&txn) {
            Ok(Some(id)) => {
                tracing::info!(
                    id,
                    user_id = txn.telegram_id,
                    op = %txn.operation_type,
                    category = %txn.category,
                    quantities = txn.quantities,
                    "transaction recorded"
                );
                Ok(id)
            }
            Ok(None) => Err(duplicate()),
            Err(e) => {
                tracing::error!(error = %e, "transaction insert failed");
                Err(LedgerError::store("transaction insert", e))
            }
        }
    }
}
