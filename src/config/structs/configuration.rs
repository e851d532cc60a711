use serde::{
    Deserialize,
    Serialize
};
use crate::config::structs::database_config::DatabaseConfig;
use crate::config::structs::migration_config::MigrationConfig;
use crate::database::structs::driver_config::DriverConfig;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub log_level: String,
    pub database: DatabaseConfig,
    pub driver: DriverConfig,
    pub migration: MigrationConfig,
}
