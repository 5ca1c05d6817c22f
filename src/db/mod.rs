mod schema;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;

use crate::analytics::Window;
use crate::models::{OperationType, Transaction, MAX_QUANTITIES};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Fixed-width UTC text, so string order matches time order.
pub(crate) fn to_store_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn parse_store_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").map(|n| n.and_utc())
}

/// Queryable store of transaction records.
///
/// The recorder and the aggregator only talk to persistence through this
/// trait, so tests can swap in a fake.
pub(crate) trait TransactionStore {
    /// Raw rows of one user and operation type inside `window`, oldest first.
    fn transactions_in_window(
        &self,
        user_id: i64,
        op: OperationType,
        window: &Window,
    ) -> Result<Vec<Transaction>>;

    /// `(category, SUM(quantities))` rows grouped by category.
    fn category_totals_in_window(
        &self,
        user_id: i64,
        op: OperationType,
        window: &Window,
    ) -> Result<Vec<(String, u64)>>;

    fn find_transaction(
        &self,
        user_id: i64,
        created_at: &DateTime<Utc>,
    ) -> Result<Option<Transaction>>;

    /// Insert `txn`. Returns `None` when a row with the same user and
    /// timestamp already exists; nothing is written in that case.
    fn insert_transaction(&self, txn: &Transaction) -> Result<Option<i64>>;
}

impl<T: TransactionStore + ?Sized> TransactionStore for &T {
    fn transactions_in_window(
        &self,
        user_id: i64,
        op: OperationType,
        window: &Window,
    ) -> Result<Vec<Transaction>> {
        (**self).transactions_in_window(user_id, op, window)
    }

    fn category_totals_in_window(
        &self,
        user_id: i64,
        op: OperationType,
        window: &Window,
    ) -> Result<Vec<(String, u64)>> {
        (**self).category_totals_in_window(user_id, op, window)
    }

    fn find_transaction(
        &self,
        user_id: i64,
        created_at: &DateTime<Utc>,
    ) -> Result<Option<Transaction>> {
        (**self).find_transaction(user_id, created_at)
    }

    fn insert_transaction(&self, txn: &Transaction) -> Result<Option<i64>> {
        (**self).insert_transaction(txn)
    }
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            let tx = self.conn.transaction()?;
            tx.execute_batch(schema::SCHEMA_V1)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tx.commit()?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    /// Write the raw transactions of a window to `path` as CSV.
    pub(crate) fn export_to_csv(
        &self,
        path: &Path,
        user_id: i64,
        op: OperationType,
        window: &Window,
    ) -> Result<usize> {
        let txns = self.transactions_in_window(user_id, op, window)?;
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        wtr.write_record(["created_at", "type", "category", "quantities", "description"])?;
        for txn in &txns {
            wtr.write_record([
                txn.created_at.to_rfc3339(),
                txn.operation_type.to_string(),
                txn.category.clone(),
                txn.quantities.to_string(),
                txn.description.clone(),
            ])?;
        }
        wtr.flush().context("Failed to flush CSV file")?;
        Ok(txns.len())
    }
}

const TRANSACTION_COLUMNS: &str =
    "id, telegram_id, created_at, operation_type, quantities, category, description";

fn window_filter(window: &Window) -> &'static str {
    if window.end_inclusive {
        "telegram_id = ?1 AND operation_type = ?2 AND created_at >= ?3 AND created_at <= ?4"
    } else {
        "telegram_id = ?1 AND operation_type = ?2 AND created_at >= ?3 AND created_at < ?4"
    }
}

fn non_negative(idx: usize, value: i64) -> rusqlite::Result<u64> {
    u64::try_from(value).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, value))
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let created_at: String = row.get(2)?;
    let created_at = parse_store_timestamp(&created_at).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Transaction {
        id: Some(row.get(0)?),
        telegram_id: row.get(1)?,
        created_at,
        operation_type: OperationType::from_flag(row.get(3)?),
        quantities: non_negative(4, row.get(4)?)?,
        category: row.get(5)?,
        description: row.get(6)?,
    })
}

impl TransactionStore for Database {
    fn transactions_in_window(
        &self,
        user_id: i64,
        op: OperationType,
        window: &Window,
    ) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE {} ORDER BY created_at, id",
            window_filter(window)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![
                user_id,
                op.as_flag(),
                to_store_timestamp(&window.start),
                to_store_timestamp(&window.end),
            ],
            transaction_from_row,
        )?;
        let txns = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        tracing::debug!(user_id, %op, window = %window.kind, rows = txns.len(), "window scan");
        Ok(txns)
    }

    fn category_totals_in_window(
        &self,
        user_id: i64,
        op: OperationType,
        window: &Window,
    ) -> Result<Vec<(String, u64)>> {
        let sql = format!(
            "SELECT category, SUM(quantities) FROM transactions WHERE {} GROUP BY category",
            window_filter(window)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![
                user_id,
                op.as_flag(),
                to_store_timestamp(&window.start),
                to_store_timestamp(&window.end),
            ],
            |row| Ok((row.get(0)?, non_negative(1, row.get(1)?)?)),
        )?;
        let totals = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        tracing::debug!(user_id, %op, window = %window.kind, rows = totals.len(), "category totals");
        Ok(totals)
    }

    fn find_transaction(
        &self,
        user_id: i64,
        created_at: &DateTime<Utc>,
    ) -> Result<Option<Transaction>> {
        let result = self.conn.query_row(
            &format!(
                "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE telegram_id = ?1 AND created_at = ?2"
            ),
            params![user_id, to_store_timestamp(created_at)],
            transaction_from_row,
        );
        match result {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn insert_transaction(&self, txn: &Transaction) -> Result<Option<i64>> {
        if txn.quantities > MAX_QUANTITIES {
            bail!(
                "Amount {} exceeds the per-record limit of {MAX_QUANTITIES}",
                txn.quantities
            );
        }
        let quantities =
            i64::try_from(txn.quantities).context("Amount exceeds the storable range")?;
        let changed = self.conn.execute(
            "INSERT INTO transactions (telegram_id, created_at, operation_type, quantities, category, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(telegram_id, created_at) DO NOTHING",
            params![
                txn.telegram_id,
                to_store_timestamp(&txn.created_at),
                txn.operation_type.as_flag(),
                quantities,
                txn.category,
                txn.description,
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(Some(self.conn.last_insert_rowid()))
    }
}

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod tests;
