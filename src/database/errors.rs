use thiserror::Error;
use crate::database::enums::engine_type::EngineType;
use crate::database::structs::migration_info::MigrationInfo;

/// Why a call bound to a [`DriverContext`](crate::database::structs::driver_context::DriverContext) stopped early.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("operation cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown driver: {0}")]
    UnknownDriver(EngineType),

    #[error("Invalid filename format, got {filename}, want {{version}}_{{dbname}}[_{{type}}][_{{description}}].sql")]
    Format { filename: String },

    #[error("Unable to read migration {path}: {message}")]
    Read { path: String, message: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Statement error: {0}")]
    Statement(String),

    #[error("History recording error for {namespace} version {version}: {message}")]
    HistoryRecording {
        namespace: String,
        version: String,
        message: String,
    },

    #[error("Query error: {0}")]
    Query(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Driver {0} is not connected")]
    NotConnected(EngineType),

    #[error("Context error: {0}")]
    Context(#[from] ContextError),
}

impl DatabaseError {
    pub fn statement(info: &MigrationInfo, message: impl Into<String>) -> Self {
        DatabaseError::Statement(format!(
            "migration {} for {} failed: {}",
            info.version,
            info.namespace,
            message.into()
        ))
    }

    pub fn history_recording(info: &MigrationInfo, message: impl Into<String>) -> Self {
        DatabaseError::HistoryRecording {
            namespace: info.namespace.clone(),
            version: info.version.clone(),
            message: message.into(),
        }
    }

    /// Only registration mistakes are fatal; they surface while wiring the registry at startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DatabaseError::Configuration(_))
    }

    /// The schema was changed but the history table does not say so.
    pub fn requires_reconciliation(&self) -> bool {
        matches!(self, DatabaseError::HistoryRecording { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::enums::migration_kind::MigrationKind;

    fn sample_info() -> MigrationInfo {
        MigrationInfo {
            version: String::from("202401010000"),
            namespace: String::from("db1"),
            database: String::from("db1"),
            kind: MigrationKind::Sql,
            description: String::from("Create t1"),
            creator: String::new(),
        }
    }

    #[test]
    fn test_format_error_display() {
        let error = DatabaseError::Format { filename: String::from("bogus.sql") };
        assert_eq!(
            format!("{}", error),
            "Invalid filename format, got bogus.sql, want {version}_{dbname}[_{type}][_{description}].sql"
        );
    }

    #[test]
    fn test_unknown_driver_display() {
        let error = DatabaseError::UnknownDriver(EngineType::mysql);
        assert_eq!(format!("{}", error), "Unknown driver: MYSQL");
    }

    #[test]
    fn test_statement_constructor() {
        let error = DatabaseError::statement(&sample_info(), "syntax error");
        assert_eq!(format!("{}", error), "Statement error: migration 202401010000 for db1 failed: syntax error");
        assert!(!error.requires_reconciliation());
    }

    #[test]
    fn test_history_recording_constructor() {
        let error = DatabaseError::history_recording(&sample_info(), "duplicate entry");
        assert_eq!(
            format!("{}", error),
            "History recording error for db1 version 202401010000: duplicate entry"
        );
        assert!(error.requires_reconciliation());
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_context_error_conversion() {
        let error: DatabaseError = ContextError::DeadlineExceeded.into();
        assert_eq!(format!("{}", error), "Context error: deadline exceeded");
        let error: DatabaseError = ContextError::Cancelled.into();
        assert_eq!(format!("{}", error), "Context error: operation cancelled");
    }

    #[test]
    fn test_read_error_display() {
        let error = DatabaseError::Read {
            path: String::from("migrations/0001_db1.sql"),
            message: String::from("No such file or directory"),
        };
        assert_eq!(
            format!("{}", error),
            "Unable to read migration migrations/0001_db1.sql: No such file or directory"
        );
        assert!(!error.requires_reconciliation());
    }

    #[test]
    fn test_configuration_is_fatal() {
        let error = DatabaseError::Configuration(String::from("duplicate"));
        assert!(error.is_fatal());
        assert_eq!(format!("{}", error), "Configuration error: duplicate");
    }
}
