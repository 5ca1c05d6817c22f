mod window;

use chrono::{DateTime, TimeZone};
use std::collections::BTreeMap;

use crate::db::TransactionStore;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{OperationType, Transaction};
use crate::report::{self, Report};

pub(crate) use window::{Window, WindowKind};

/// Category label → summed amount. Sorted by label, so reports list
/// categories in a stable order.
pub(crate) type CategoryTotals = BTreeMap<String, u64>;

/// Fold `(category, amount)` rows into totals. Repeated labels accumulate.
pub(crate) fn fold_category_rows<I>(rows: I) -> CategoryTotals
where
    I: IntoIterator<Item = (String, u64)>,
{
    rows.into_iter()
        .fold(CategoryTotals::new(), |mut totals, (category, amount)| {
            let entry = totals.entry(category).or_insert(0);
            *entry = entry.saturating_add(amount);
            totals
        })
}

/// Name of a store operation for error reporting, e.g. "month income aggregation".
fn operation_name(window: &Window, op: OperationType, action: &str) -> String {
    format!("{} {} {}", window.kind, op, action)
}

/// Windowed reads against a transaction store.
pub(crate) struct Aggregator<S> {
    store: S,
}

impl<S: TransactionStore> Aggregator<S> {
    pub(crate) fn new(store: S) -> Self {
        Self { store }
    }

    /// Individual transactions, for the per-entry day report.
    pub(crate) fn fetch_raw(
        &self,
        user_id: i64,
        window: &Window,
        op: OperationType,
    ) -> LedgerResult<Vec<Transaction>> {
        self.store
            .transactions_in_window(user_id, op, window)
            .map_err(|e| {
                let operation = operation_name(window, op, "query");
                tracing::error!(user_id, %operation, error = %e, "store query failed");
                LedgerError::store(operation, e)
            })
    }

    /// Per-category sums, for the week and month summaries.
    pub(crate) fn fetch_grouped(
        &self,
        user_id: i64,
        window: &Window,
        op: OperationType,
    ) -> LedgerResult<CategoryTotals> {
        let rows = self
            .store
            .category_totals_in_window(user_id, op, window)
            .map_err(|e| {
                let operation = operation_name(window, op, "aggregation");
                tracing::error!(user_id, %operation, error = %e, "store aggregation failed");
                LedgerError::store(operation, e)
            })?;
        Ok(fold_category_rows(rows))
    }

    /// Resolve the window around `now`, read the store, and shape the report.
    pub(crate) fn report<Tz: TimeZone>(
        &self,
        user_id: i64,
        kind: WindowKind,
        op: OperationType,
        now: &DateTime<Tz>,
        currency: &str,
    ) -> LedgerResult<Report> {
        let window = Window::resolve(now, kind);
        tracing::debug!(
            user_id,
            %op,
            window = %kind,
            start = %window.start,
            end = %window.end,
            "building report"
        );
        let report = match kind {
            WindowKind::Day => {
                let txns = self.fetch_raw(user_id, &window, op)?;
                report::daily_detail(op, &txns, currency)
            }
            WindowKind::Week => {
                let totals = self.fetch_grouped(user_id, &window, op)?;
                report::weekly_summary(op, &totals, currency)
            }
            WindowKind::Month => {
                let totals = self.fetch_grouped(user_id, &window, op)?;
                report::monthly_summary(op, &totals, currency)
            }
        };
        Ok(report)
    }
}
