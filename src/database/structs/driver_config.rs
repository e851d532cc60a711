use serde::{
    Deserialize,
    Serialize
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub history_database: String,
    pub max_connections: u32,
    pub slow_statement_threshold: u64,
}
