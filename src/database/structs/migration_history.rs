use serde::{
    Deserialize,
    Serialize
};
use crate::database::enums::migration_kind::MigrationKind;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MigrationHistory {
    pub id: i64,
    pub creator: String,
    pub created_ts: i64,
    pub namespace: String,
    pub version: String,
    pub kind: MigrationKind,
    pub description: String,
    pub statement: String,
    pub execution_duration_ms: i64,
}
