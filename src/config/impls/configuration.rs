use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use regex::Regex;
use crate::common::common::parse_log_level;
use crate::config::enums::configuration_error::ConfigurationError;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::database_config::DatabaseConfig;
use crate::config::structs::migration_config::MigrationConfig;
use crate::database::enums::engine_type::EngineType;
use crate::database::structs::connection_config::ConnectionConfig;
use crate::database::structs::driver_config::DriverConfig;
use crate::database::structs::driver_context::DriverContext;

const IDENTIFIER_REGEX: &str = r"^[a-z_][a-z0-9_]{0,30}$";

impl Configuration {
    pub fn init() -> Configuration {
        Configuration {
            log_level: String::from("info"),
            database: DatabaseConfig {
                engine: EngineType::sqlite3,
                host: String::new(),
                port: String::new(),
                username: String::new(),
                password: String::new(),
                database: String::from("sqlite://schemabase.db"),
            },
            driver: DriverConfig::default(),
            migration: MigrationConfig {
                creator: String::from("schemabase"),
                timeout: 300,
            },
        }
    }

    pub fn load(data: &[u8]) -> Result<Configuration, toml::de::Error> {
        toml::from_str(&String::from_utf8_lossy(data))
    }

    pub fn load_file(path: &str) -> Result<Configuration, ConfigurationError> {
        let data = std::fs::read(path)?;
        Ok(Self::load(data.as_slice())?)
    }

    pub fn save_file(path: &str, data: String) -> Result<(), ConfigurationError> {
        let mut file = File::create(path)?;
        file.write_all(data.as_ref())?;
        Ok(())
    }

    /// Loads and validates `path`.
    ///
    /// A missing or unreadable file is written out with defaults when `create`
    /// is set; the call still fails with [`ConfigurationError::Created`] so the
    /// operator edits the file before anything connects.
    pub fn load_from_file(path: &str, create: bool) -> Result<Configuration, ConfigurationError> {
        let config = match Configuration::load_file(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("No config file found or corrupt.");
                eprintln!("[ERROR] {}", error);

                if !create || Path::new(path).exists() {
                    eprintln!("You can either create your own {} file, or start this app using '--create-config' as parameter.", path);
                    return Err(error);
                }
                eprintln!("Creating config file..");

                let config_toml = toml::to_string(&Configuration::init())?;
                Configuration::save_file(path, config_toml)?;
                return Err(ConfigurationError::Created(path.to_string()));
            }
        };

        println!("[VALIDATE] Validating configuration...");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if parse_log_level(&self.log_level).is_none() {
            return Err(ConfigurationError::ValidationError(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }

        let check_map = vec![
            ("[DRIVER] history_database", self.driver.history_database.as_str(), IDENTIFIER_REGEX),
        ];
        for (name, value, regex) in check_map {
            Self::validate_value(name, value, regex)?;
        }

        if self.driver.max_connections == 0 {
            return Err(ConfigurationError::ValidationError(String::from(
                "[DRIVER] max_connections must be at least 1"
            )));
        }

        match self.database.engine {
            EngineType::mysql => {
                if self.database.port.parse::<u16>().is_err() {
                    return Err(ConfigurationError::ValidationError(format!(
                        "[DATABASE] port '{}' is not a valid port number",
                        self.database.port
                    )));
                }
            }
            EngineType::sqlite3 => {
                if self.database.database.trim().is_empty() {
                    return Err(ConfigurationError::ValidationError(String::from(
                        "[DATABASE] database must name a SQLite file or :memory:"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn validate_value(name: &str, value: &str, regex: &str) -> Result<(), ConfigurationError> {
        let regex_check = Regex::new(regex)
            .map_err(|error| ConfigurationError::ValidationError(error.to_string()))?;
        if !regex_check.is_match(value) {
            return Err(ConfigurationError::ValidationError(format!(
                "{} [:] Name: \"{}\" [:] Regex: \"{}\"",
                name, value, regex_check
            )));
        }
        Ok(())
    }

    pub fn connection_config(&self) -> ConnectionConfig {
        self.database.connection_config()
    }

    /// Context for one command, bounded by `migration.timeout`. Every driver call of
    /// that command shares the same deadline.
    pub fn driver_context(&self) -> DriverContext {
        match self.migration.timeout {
            0 => DriverContext::background(),
            timeout => DriverContext::with_timeout(Duration::from_secs(timeout)),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::init()
    }
}
