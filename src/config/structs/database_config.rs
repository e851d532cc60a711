use serde::{
    Deserialize,
    Serialize
};
use crate::database::enums::engine_type::EngineType;

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub engine: EngineType,
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub database: String,
}
