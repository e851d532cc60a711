mod common;

use std::sync::Arc;
use common::create_temp_dir;
use schemabase::config::enums::configuration_error::ConfigurationError;
use schemabase::config::structs::configuration::Configuration;
use schemabase::database::enums::engine_type::EngineType;
use schemabase::database::structs::driver_registry::DriverRegistry;
use schemabase::database::structs::migration_info::MigrationInfo;

fn write_sqlite_config(dir: &std::path::Path) -> String {
    let database = dir.join("schemabase.db");
    let mut config = Configuration::init();
    config.log_level = String::from("warn");
    config.database.database = database.to_str().unwrap().to_string();
    config.migration.creator = String::from("integration");
    let path = dir.join("config.toml");
    Configuration::save_file(path.to_str().unwrap(), toml::to_string(&config).unwrap()).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_load_from_file_validates() {
    let dir = create_temp_dir();
    let path = write_sqlite_config(dir.path());
    let config = Configuration::load_from_file(&path, false).unwrap();
    assert_eq!(config.database.engine, EngineType::sqlite3);
    assert_eq!(config.migration.creator, "integration");
}

#[test]
fn test_load_from_file_reports_validation_error() {
    let dir = create_temp_dir();
    let path = dir.path().join("config.toml");
    let mut config = Configuration::init();
    config.driver.history_database = String::from("1nvalid");
    Configuration::save_file(path.to_str().unwrap(), toml::to_string(&config).unwrap()).unwrap();

    let result = Configuration::load_from_file(path.to_str().unwrap(), false);
    assert!(matches!(result, Err(ConfigurationError::ValidationError(_))));
}

#[tokio::test]
async fn test_migration_file_applied_from_configuration() {
    let dir = create_temp_dir();
    let path = write_sqlite_config(dir.path());
    let config = Arc::new(Configuration::load_from_file(&path, false).unwrap());

    let migration_path = dir.path().join("202401010000_main_create_users.sql");
    std::fs::write(&migration_path, "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL);").unwrap();

    let registry = DriverRegistry::with_builtins().unwrap();
    let ctx = config.driver_context();
    let driver = registry
        .open(config.database.engine, config.driver.clone(), &config.connection_config(), &ctx)
        .await
        .unwrap();

    driver.setup_migration_if_needed(&ctx).await.unwrap();
    let info = MigrationInfo::parse_path(&migration_path)
        .unwrap()
        .with_creator(config.migration.creator.clone());
    let statement = std::fs::read_to_string(&migration_path).unwrap();
    driver.execute_migration(&ctx, &info, &statement).await.unwrap();
    driver.close().await;

    // The file-backed database keeps both the table and its history record.
    let driver = registry
        .open(config.database.engine, config.driver.clone(), &config.connection_config(), &ctx)
        .await
        .unwrap();
    assert!(!driver.needs_setup_migration(&ctx).await.unwrap());
    let history = driver.find_migration_history(&ctx, Some("main")).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].creator, "integration");
    assert_eq!(history[0].description, "Create users");

    let schemas = driver.sync_schema(&ctx).await.unwrap();
    let tables: Vec<&str> = schemas[0].tables.iter().map(|table| table.name.as_str()).collect();
    assert_eq!(tables, vec!["users"]);
    driver.close().await;
}
