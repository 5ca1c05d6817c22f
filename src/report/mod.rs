mod text;

use crate::analytics::{CategoryTotals, WindowKind};
use crate::models::{emoji_for, Locale, OperationType, Transaction};

/// One logical line of a report. Wording is applied at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    NoActivity(WindowKind),
    Title(WindowKind),
    Blank,
    EntryCategory(String),
    EntryAmount(u64),
    EntryComment(String),
    WeekCategory {
        category: String,
        total: u64,
    },
    MonthCategory {
        emoji: Option<&'static str>,
        category: String,
        total: u64,
        percent: u64,
    },
    Total {
        period: WindowKind,
        amount: u64,
        currency: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Report {
    pub(crate) operation: OperationType,
    pub(crate) lines: Vec<Line>,
}

impl Report {
    fn no_activity(operation: OperationType, period: WindowKind) -> Self {
        Self {
            operation,
            lines: vec![Line::NoActivity(period)],
        }
    }

    /// Sum of the report's figures; 0 for a report with no activity.
    pub(crate) fn grand_total(&self) -> u64 {
        self.lines
            .iter()
            .find_map(|line| match line {
                Line::Total { amount, .. } => Some(*amount),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub(crate) fn render(&self, locale: Locale) -> String {
        self.lines
            .iter()
            .map(|line| text::render_line(line, self.operation, locale))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Integer percentage of `value` in `total`, truncated. 0 when `total` is 0.
pub(crate) fn percentage(value: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (u128::from(value) * 100 / u128::from(total)) as u64
}

fn sum(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(0u64, u64::saturating_add)
}

/// Per-transaction listing for the day window, in input order.
pub(crate) fn daily_detail(op: OperationType, txns: &[Transaction], currency: &str) -> Report {
    if txns.is_empty() {
        return Report::no_activity(op, WindowKind::Day);
    }

    let mut lines = vec![Line::Title(WindowKind::Day), Line::Blank];
    for txn in txns {
        lines.push(Line::EntryCategory(txn.category.clone()));
        lines.push(Line::EntryAmount(txn.quantities));
        if !txn.description.is_empty() {
            lines.push(Line::EntryComment(txn.description.clone()));
        }
        lines.push(Line::Blank);
    }
    lines.push(Line::Total {
        period: WindowKind::Day,
        amount: sum(txns.iter().map(|t| t.quantities)),
        currency: currency.to_string(),
    });

    Report {
        operation: op,
        lines,
    }
}

pub(crate) fn weekly_summary(op: OperationType, totals: &CategoryTotals, currency: &str) -> Report {
    if totals.is_empty() {
        return Report::no_activity(op, WindowKind::Week);
    }

    let mut lines = vec![Line::Title(WindowKind::Week), Line::Blank];
    lines.extend(totals.iter().map(|(category, total)| Line::WeekCategory {
        category: category.clone(),
        total: *total,
    }));
    lines.push(Line::Blank);
    lines.push(Line::Total {
        period: WindowKind::Week,
        amount: sum(totals.values().copied()),
        currency: currency.to_string(),
    });

    Report {
        operation: op,
        lines,
    }
}

/// Category breakdown with icons and share of the grand total.
pub(crate) fn monthly_summary(
    op: OperationType,
    totals: &CategoryTotals,
    currency: &str,
) -> Report {
    if totals.is_empty() {
        return Report::no_activity(op, WindowKind::Month);
    }

    let grand_total = sum(totals.values().copied());
    let mut lines = vec![Line::Title(WindowKind::Month), Line::Blank];
    lines.extend(totals.iter().map(|(category, total)| Line::MonthCategory {
        emoji: emoji_for(op, category),
        category: category.clone(),
        total: *total,
        percent: percentage(*total, grand_total),
    }));
    lines.push(Line::Blank);
    lines.push(Line::Total {
        period: WindowKind::Month,
        amount: grand_total,
        currency: currency.to_string(),
    });

    Report {
        operation: op,
        lines,
    }
}
