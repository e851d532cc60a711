//! Database enumeration types.

/// Supported database engine types (mysql, sqlite3).
pub mod engine_type;

/// Migration kinds recorded in the history table (BASELINE, SQL).
pub mod migration_kind;
