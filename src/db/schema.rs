pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    telegram_id     INTEGER NOT NULL,
    created_at      TEXT NOT NULL,
    operation_type  BOOLEAN NOT NULL,
    quantities      INTEGER NOT NULL CHECK (quantities >= 0),
    category        TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT ''
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_transactions_user_created
    ON transactions(telegram_id, created_at);
CREATE INDEX IF NOT EXISTS idx_transactions_user_type_created
    ON transactions(telegram_id, operation_type, created_at);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
