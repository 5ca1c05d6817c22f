#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};

use super::*;
use crate::analytics::WindowKind;

fn at(d: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, d, h, m, s).unwrap()
}

fn txn(user: i64, ts: DateTime<Utc>, op: OperationType, amount: u64, cat: &str) -> Transaction {
    Transaction::new(user, ts, op, amount, cat.into(), String::new())
}

fn reference() -> DateTime<Utc> {
    at(15, 10, 0, 0)
}

fn setup_test_data(db: &Database) {
    let rows = [
        txn(1, at(15, 8, 0, 0), OperationType::Expense, 120, "Household"),
        txn(1, at(15, 9, 0, 0), OperationType::Expense, 80, "Household"),
        txn(1, at(15, 9, 30, 0), OperationType::Expense, 200, "Health"),
        txn(1, at(15, 9, 45, 0), OperationType::Income, 5000, "Salary"),
        txn(1, at(10, 12, 0, 0), OperationType::Expense, 300, "Clothing"),
        txn(1, at(1, 0, 0, 0), OperationType::Expense, 50, "Household"),
        txn(1, at(31, 23, 59, 59), OperationType::Expense, 7, "Other expenses"),
        txn(2, at(15, 9, 0, 0), OperationType::Expense, 999, "Household"),
    ];
    for t in &rows {
        db.insert_transaction(t).unwrap();
    }
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_open_in_memory_starts_empty() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

#[test]
fn test_reopen_file_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cashbook.db");
    {
        let db = Database::open(&path).unwrap();
        db.insert_transaction(&txn(1, reference(), OperationType::Expense, 10, "Health"))
            .unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_transaction_count().unwrap(), 1);
}

// ── Timestamps ────────────────────────────────────────────────

#[test]
fn test_store_timestamp_fixed_width() {
    let ts = at(5, 7, 3, 9);
    assert_eq!(to_store_timestamp(&ts), "2024-03-05 07:03:09.000000");
}

#[test]
fn test_store_timestamp_parse_back() {
    let ts = Utc.timestamp_micros(1_710_496_800_123_456).unwrap();
    let parsed = parse_store_timestamp(&to_store_timestamp(&ts)).unwrap();
    assert_eq!(parsed, ts);
}

#[test]
fn test_store_timestamp_orders_lexicographically() {
    let earlier = to_store_timestamp(&at(9, 23, 59, 59));
    let later = to_store_timestamp(&at(10, 0, 0, 0));
    assert!(earlier < later);
}

// ── Insert / lookup ───────────────────────────────────────────

#[test]
fn test_insert_and_find() {
    let db = Database::open_in_memory().unwrap();
    let mut t = txn(7, reference(), OperationType::Income, 1500, "Salary");
    t.description = "March".into();
    let id = db.insert_transaction(&t).unwrap();
    assert!(id.is_some());

    let found = db.find_transaction(7, &reference()).unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.quantities, 1500);
    assert_eq!(found.category, "Salary");
    assert_eq!(found.description, "March");
    assert_eq!(found.operation_type, OperationType::Income);
    assert_eq!(found.created_at, reference());
}

#[test]
fn test_find_missing() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.find_transaction(7, &reference()).unwrap().is_none());
}

#[test]
fn test_find_is_scoped_to_user() {
    let db = Database::open_in_memory().unwrap();
    db.insert_transaction(&txn(7, reference(), OperationType::Expense, 1, "Health"))
        .unwrap();
    assert!(db.find_transaction(8, &reference()).unwrap().is_none());
}

#[test]
fn test_unique_user_timestamp_enforced() {
    let db = Database::open_in_memory().unwrap();
    let first = txn(7, reference(), OperationType::Expense, 10, "Health");
    let second = txn(7, reference(), OperationType::Income, 20, "Salary");
    assert!(db.insert_transaction(&first).unwrap().is_some());
    assert!(db.insert_transaction(&second).unwrap().is_none());
    assert_eq!(db.get_transaction_count().unwrap(), 1);
}

#[test]
fn test_same_timestamp_other_user_allowed() {
    let db = Database::open_in_memory().unwrap();
    db.insert_transaction(&txn(7, reference(), OperationType::Expense, 10, "Health"))
        .unwrap();
    let id = db
        .insert_transaction(&txn(8, reference(), OperationType::Expense, 10, "Health"))
        .unwrap();
    assert!(id.is_some());
}

#[test]
fn test_amount_beyond_storage_range_rejected() {
    let db = Database::open_in_memory().unwrap();
    let t = txn(7, reference(), OperationType::Expense, u64::MAX, "Health");
    assert!(db.insert_transaction(&t).is_err());
    assert_eq!(db.get_transaction_count().unwrap(), 0);
}

#[test]
fn test_amount_above_record_limit_rejected() {
    let db = Database::open_in_memory().unwrap();
    let over = txn(7, reference(), OperationType::Expense, MAX_QUANTITIES + 1, "Health");
    assert!(db.insert_transaction(&over).is_err());
    let at_limit = txn(7, reference(), OperationType::Expense, MAX_QUANTITIES, "Health");
    assert!(db.insert_transaction(&at_limit).unwrap().is_some());
    assert_eq!(db.get_transaction_count().unwrap(), 1);
}

// ── Window scans ──────────────────────────────────────────────

#[test]
fn test_day_scan() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    let window = Window::resolve(&reference(), WindowKind::Day);
    let txns = db
        .transactions_in_window(1, OperationType::Expense, &window)
        .unwrap();
    let amounts: Vec<u64> = txns.iter().map(|t| t.quantities).collect();
    // Oldest first, income and other users excluded
    assert_eq!(amounts, vec![120, 80, 200]);
}

#[test]
fn test_day_scan_income() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    let window = Window::resolve(&reference(), WindowKind::Day);
    let txns = db
        .transactions_in_window(1, OperationType::Income, &window)
        .unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].category, "Salary");
}

#[test]
fn test_week_scan_excludes_end() {
    let db = Database::open_in_memory().unwrap();
    db.insert_transaction(&txn(1, reference(), OperationType::Expense, 5, "Health"))
        .unwrap();
    db.insert_transaction(&txn(1, at(8, 10, 0, 0), OperationType::Expense, 6, "Health"))
        .unwrap();
    let window = Window::resolve(&reference(), WindowKind::Week);
    let txns = db
        .transactions_in_window(1, OperationType::Expense, &window)
        .unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].quantities, 6);
}

#[test]
fn test_month_scan_stops_at_last_whole_second() {
    let db = Database::open_in_memory().unwrap();
    let last = at(31, 23, 59, 59);
    db.insert_transaction(&txn(1, last, OperationType::Expense, 10, "Food"))
        .unwrap();
    db.insert_transaction(&txn(
        1,
        last + chrono::Duration::milliseconds(400),
        OperationType::Expense,
        20,
        "Food",
    ))
    .unwrap();
    let window = Window::resolve(&reference(), WindowKind::Month);
    let totals = db
        .category_totals_in_window(1, OperationType::Expense, &window)
        .unwrap();
    assert_eq!(totals, vec![("Food".to_string(), 10)]);
}

#[test]
fn test_month_totals_grouped() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    let window = Window::resolve(&reference(), WindowKind::Month);
    let mut totals = db
        .category_totals_in_window(1, OperationType::Expense, &window)
        .unwrap();
    totals.sort();
    assert_eq!(
        totals,
        vec![
            ("Clothing".to_string(), 300),
            ("Health".to_string(), 200),
            ("Household".to_string(), 250),
            // Last second of the month is inside the window
            ("Other expenses".to_string(), 7),
        ]
    );
}

#[test]
fn test_totals_empty_window() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    let window = Window::resolve(&reference(), WindowKind::Week);
    let totals = db
        .category_totals_in_window(3, OperationType::Income, &window)
        .unwrap();
    assert!(totals.is_empty());
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_to_csv() {
    let db = Database::open_in_memory().unwrap();
    setup_test_data(&db);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let window = Window::resolve(&reference(), WindowKind::Day);

    let count = db
        .export_to_csv(&path, 1, OperationType::Expense, &window)
        .unwrap();
    assert_eq!(count, 3);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "created_at,type,category,quantities,description");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].contains("expense,Household,120"));
}
