use std::fmt;
use crate::config::structs::database_config::DatabaseConfig;
use crate::database::structs::connection_config::ConnectionConfig;

impl DatabaseConfig {
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::new(
            self.host.as_str(),
            self.port.as_str(),
            self.username.as_str(),
            self.password.as_str(),
            self.database.as_str(),
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("engine", &self.engine)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"********")
            .field("database", &self.database)
            .finish()
    }
}
