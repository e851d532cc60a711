use serde::{
    Deserialize,
    Serialize
};
use crate::database::enums::migration_kind::MigrationKind;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MigrationInfo {
    pub version: String,
    pub namespace: String,
    pub database: String,
    pub kind: MigrationKind,
    pub description: String,
    pub creator: String,
}
