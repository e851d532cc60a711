use serde::{
    Deserialize,
    Serialize
};
use crate::database::structs::db_table::DbTable;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct DbSchema {
    pub name: String,
    pub character_set: String,
    pub collation: String,
    pub tables: Vec<DbTable>,
}
