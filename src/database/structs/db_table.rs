use serde::{
    Deserialize,
    Serialize
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct DbTable {
    pub name: String,
    pub created_ts: i64,
    pub updated_ts: i64,
    pub engine: String,
    pub collation: String,
    pub row_count: i64,
    pub data_size: i64,
    pub index_size: i64,
}
