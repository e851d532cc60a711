use std::time::Duration;
use crate::database::structs::driver_config::DriverConfig;

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            history_database: String::from("schemabase"),
            max_connections: 1,
            slow_statement_threshold: 1,
        }
    }
}

impl DriverConfig {
    pub fn slow_statement_duration(&self) -> Duration {
        Duration::from_secs(self.slow_statement_threshold)
    }
}
