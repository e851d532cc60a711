use std::fmt;
use std::str::FromStr;
use crate::database::enums::engine_type::EngineType;
use crate::database::errors::DatabaseError;

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineType::mysql => write!(f, "MYSQL"),
            EngineType::sqlite3 => write!(f, "SQLITE3"),
        }
    }
}

impl FromStr for EngineType {
    type Err = DatabaseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "mysql" => Ok(EngineType::mysql),
            "sqlite3" => Ok(EngineType::sqlite3),
            _ => Err(DatabaseError::Decode(format!("unknown engine type '{}'", value))),
        }
    }
}

impl EngineType {
    pub fn engine_name(&self) -> &'static str {
        match self {
            EngineType::mysql => "MySQL",
            EngineType::sqlite3 => "SQLite",
        }
    }

    pub fn log_prefix(&self) -> &'static str {
        match self {
            EngineType::mysql => "[MySQL]",
            EngineType::sqlite3 => "[SQLite]",
        }
    }
}
