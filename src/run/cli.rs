use anyhow::Result;
use chrono::{Local, Utc};
use std::borrow::Borrow;
use std::path::Path;

use crate::analytics::{Aggregator, Window, WindowKind};
use crate::config::{shellexpand, Settings};
use crate::db::Database;
use crate::error::LedgerError;
use crate::models::{well_known, OperationType};
use crate::record::Recorder;

/// Dispatch one command. `open_db` runs only for commands that touch the
/// store, so `help`, `version` and `categories` work without a database.
pub(crate) fn as_cli<D: Borrow<Database>>(
    args: &[String],
    settings: &Settings,
    open_db: impl FnOnce() -> Result<D>,
) -> Result<()> {
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };
    match command.as_str() {
        "add" | "a" => cli_add(&args[1..], open_db()?.borrow(), settings),
        "report" | "r" => cli_report(&args[1..], open_db()?.borrow(), settings),
        "categories" | "c" => cli_categories(&args[1..], settings),
        "export" => cli_export(&args[1..], open_db()?.borrow(), settings),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("cashbook {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Cashbook — income and expense tracker");
    println!();
    println!("Usage: cashbook [options] <command>");
    println!();
    println!("Commands:");
    println!("  add <expense|income> <category> \"<amount>, <description>\"");
    println!("                                Record a transaction now");
    println!("  report <day|week|month>       Print a report (expenses by default)");
    println!("    --income                    Report income instead");
    println!("  categories [expense|income]   List well-known categories");
    println!("  export <file.csv>             Export a window's transactions to CSV");
    println!("    --window <day|week|month>   Window to export (default: month)");
    println!("    --income                    Export income instead");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --user <id>                   Account id (env CASHBOOK_USER)");
    println!("  --currency <label>            Currency label (env CASHBOOK_CURRENCY)");
    println!("  --lang <en|ru>                Report language (env CASHBOOK_LANG)");
    println!("  --db <path>                   Database file (env CASHBOOK_DB)");
}

fn operation_flag(args: &[String]) -> OperationType {
    if args.iter().any(|a| a == "--income") {
        OperationType::Income
    } else {
        OperationType::Expense
    }
}

fn cli_add(args: &[String], db: &Database, settings: &Settings) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: cashbook add <expense|income> <category> \"<amount>, <description>\"");
    }
    let op = OperationType::parse(&args[0])
        .ok_or_else(|| anyhow::anyhow!("Unknown operation type: {}", args[0]))?;
    let category = &args[1];
    // Unquoted payloads arrive split on whitespace
    let payload = args[2..].join(" ");

    let recorder = Recorder::new(db);
    match recorder.record(settings.user_id, Utc::now(), op, &payload, category) {
        Ok(_) => {
            println!("Recorded {op}: {category}");
            Ok(())
        }
        Err(LedgerError::Duplicate { .. }) => {
            println!("This transaction has already been recorded");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn cli_report(args: &[String], db: &Database, settings: &Settings) -> Result<()> {
    let kind = args
        .first()
        .and_then(|a| WindowKind::parse(a))
        .ok_or_else(|| anyhow::anyhow!("Usage: cashbook report <day|week|month> [--income]"))?;
    let op = operation_flag(args);

    let aggregator = Aggregator::new(db);
    let report = aggregator.report(settings.user_id, kind, op, &Local::now(), &settings.currency)?;
    tracing::debug!(total = report.grand_total(), "report ready");
    println!("{}", report.render(settings.locale));
    Ok(())
}

fn cli_categories(args: &[String], settings: &Settings) -> Result<()> {
    let op = match args.first() {
        Some(raw) => OperationType::parse(raw)
            .ok_or_else(|| anyhow::anyhow!("Unknown operation type: {raw}"))?,
        None => OperationType::Expense,
    };
    for category in well_known(op) {
        println!("{} {}", category.emoji, category.name(settings.locale));
    }
    Ok(())
}

fn cli_export(args: &[String], db: &Database, settings: &Settings) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .ok_or_else(|| anyhow::anyhow!("Usage: cashbook export <file.csv> [--window <day|week|month>] [--income]"))?;

    let kind = match args.windows(2).find(|w| w[0] == "--window") {
        Some(w) => WindowKind::parse(&w[1])
            .ok_or_else(|| anyhow::anyhow!("Unknown window: {}", w[1]))?,
        None => WindowKind::Month,
    };
    let op = operation_flag(args);
    let window = Window::resolve(&Local::now(), kind);

    let count = db.export_to_csv(Path::new(&output_path), settings.user_id, op, &window)?;
    if count == 0 {
        println!("No {op} transactions for this {kind}");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
