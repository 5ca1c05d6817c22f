use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};

use super::TransactionStore;
use crate::analytics::Window;
use crate::models::{OperationType, Transaction};

/// In-memory stand-in for the SQLite store.
#[derive(Default)]
pub(crate) struct FakeStore {
    pub(crate) rows: RefCell<Vec<Transaction>>,
    /// Returned verbatim by `category_totals_in_window` when set.
    pub(crate) grouped_rows: Option<Vec<(String, u64)>>,
    pub(crate) fail: bool,
    pub(crate) inserts: Cell<usize>,
    /// Makes `find_transaction` miss, as if another writer raced us.
    pub(crate) blind_lookup: bool,
}

impl FakeStore {
    pub(crate) fn with_rows(rows: Vec<Transaction>) -> Self {
        Self {
            rows: RefCell::new(rows),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl TransactionStore for FakeStore {
    fn transactions_in_window(
        &self,
        user_id: i64,
        op: OperationType,
        window: &Window,
    ) -> Result<Vec<Transaction>> {
        if self.fail {
            bail!("connection reset");
        }
        let mut found: Vec<Transaction> = self
            .rows
            .borrow()
            .iter()
            .filter(|t| {
                t.telegram_id == user_id && t.operation_type == op && window.contains(&t.created_at)
            })
            .cloned()
            .collect();
        found.sort_by_key(|t| t.created_at);
        Ok(found)
    }

    fn category_totals_in_window(
        &self,
        user_id: i64,
        op: OperationType,
        window: &Window,
    ) -> Result<Vec<(String, u64)>> {
        if self.fail {
            bail!("connection reset");
        }
        if let Some(rows) = &self.grouped_rows {
            return Ok(rows.clone());
        }
        Ok(self
            .transactions_in_window(user_id, op, window)?
            .into_iter()
            .map(|t| (t.category, t.quantities))
            .collect())
    }

    fn find_transaction(
        &self,
        user_id: i64,
        created_at: &DateTime<Utc>,
    ) -> Result<Option<Transaction>> {
        if self.fail {
            bail!("connection reset");
        }
        if self.blind_lookup {
            return Ok(None);
        }
        Ok(self
            .rows
            .borrow()
            .iter()
            .find(|t| t.telegram_id == user_id && t.created_at == *created_at)
            .cloned())
    }

    fn insert_transaction(&self, txn: &Transaction) -> Result<Option<i64>> {
        if self.fail {
            bail!("disk full");
        }
        let mut rows = self.rows.borrow_mut();
        if rows
            .iter()
            .any(|t| t.telegram_id == txn.telegram_id && t.created_at == txn.created_at)
        {
            return Ok(None);
        }
        self.inserts.set(self.inserts.get() + 1);
        let mut stored = txn.clone();
        stored.id = Some(rows.len() as i64 + 1);
        rows.push(stored);
        Ok(Some(rows.len() as i64))
    }
}
