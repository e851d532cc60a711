use serde::{
    Deserialize,
    Serialize
};

/// Whether a migration establishes a starting schema or applies an incremental change.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum MigrationKind {
    Baseline,
    Sql,
}
