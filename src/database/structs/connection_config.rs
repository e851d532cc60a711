use serde::{
    Deserialize,
    Serialize
};

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub database: String,
}
