use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::models::Locale;

const DEFAULT_CURRENCY: &str = "RUB";

/// Runtime settings: defaults, then `CASHBOOK_*` environment variables,
/// then command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settings {
    /// Explicit database file; `None` means the platform data directory.
    pub(crate) db_path: Option<PathBuf>,
    pub(crate) user_id: i64,
    pub(crate) currency: String,
    pub(crate) locale: Locale,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup("CASHBOOK_DB")
            .filter(|path| !path.is_empty())
            .map(|path| PathBuf::from(shellexpand(&path)));
        let user_id = match lookup("CASHBOOK_USER") {
            Some(raw) => parse_user_id(&raw).context("Invalid CASHBOOK_USER")?,
            None => 0,
        };
        let currency = lookup("CASHBOOK_CURRENCY")
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let locale = match lookup("CASHBOOK_LANG") {
            Some(raw) => parse_locale(&raw).context("Invalid CASHBOOK_LANG")?,
            None => Locale::default(),
        };
        Ok(Self {
            db_path,
            user_id,
            currency,
            locale,
        })
    }

    /// Consume global flags (`--user`, `--currency`, `--lang`, `--db`) and
    /// return the remaining arguments in order.
    pub(crate) fn apply_args(&mut self, args: &[String]) -> Result<Vec<String>> {
        let mut rest = Vec::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("Missing value for {flag}"))
            };
            match arg.as_str() {
                "--user" => self.user_id = parse_user_id(&value("--user")?)?,
                "--currency" => self.currency = value("--currency")?,
                "--lang" => self.locale = parse_locale(&value("--lang")?)?,
                "--db" => self.db_path = Some(PathBuf::from(shellexpand(&value("--db")?))),
                _ => rest.push(arg.clone()),
            }
        }
        Ok(rest)
    }

    /// The database file to open. Falls back to the platform data
    /// directory, creating it, only when no path was configured.
    pub(crate) fn resolve_db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => default_db_path(),
        }
    }
}

fn parse_user_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .with_context(|| format!("User id must be an integer, got {raw:?}"))
}

fn parse_locale(raw: &str) -> Result<Locale> {
    Locale::parse(raw.trim()).ok_or_else(|| anyhow::anyhow!("Unsupported language: {raw}"))
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "cashbook", "Cashbook")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("cashbook.db"))
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
