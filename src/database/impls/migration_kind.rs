use std::fmt;
use std::str::FromStr;
use crate::database::enums::migration_kind::MigrationKind;
use crate::database::errors::DatabaseError;

impl MigrationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationKind::Baseline => "BASELINE",
            MigrationKind::Sql => "SQL",
        }
    }
}

impl fmt::Display for MigrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Wire values are matched exactly; anything else is a decode failure.
impl FromStr for MigrationKind {
    type Err = DatabaseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "BASELINE" => Ok(MigrationKind::Baseline),
            "SQL" => Ok(MigrationKind::Sql),
            _ => Err(DatabaseError::Decode(format!("unknown migration type '{}'", value))),
        }
    }
}
