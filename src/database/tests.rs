#[cfg(test)]
mod database_tests {
    mod engine_type_tests {
        use std::str::FromStr;
        use crate::database::enums::engine_type::EngineType;
        use crate::database::errors::DatabaseError;

        #[test]
        fn test_engine_type_display() {
            assert_eq!(format!("{}", EngineType::mysql), "MYSQL");
            assert_eq!(format!("{}", EngineType::sqlite3), "SQLITE3");
        }

        #[test]
        fn test_engine_type_from_str() {
            assert_eq!(EngineType::from_str("mysql").unwrap(), EngineType::mysql);
            assert_eq!(EngineType::from_str("MYSQL").unwrap(), EngineType::mysql);
            assert_eq!(EngineType::from_str("sqlite3").unwrap(), EngineType::sqlite3);
        }

        #[test]
        fn test_engine_type_unknown_is_decode_error() {
            match EngineType::from_str("UNKNOWN") {
                Err(DatabaseError::Decode(message)) => assert!(message.contains("UNKNOWN")),
                other => panic!("unexpected result: {other:?}"),
            }
        }

        #[test]
        fn test_engine_type_serialization() {
            assert_eq!(serde_json::to_string(&EngineType::mysql).unwrap(), "\"mysql\"");
            let engine: EngineType = serde_json::from_str("\"sqlite3\"").unwrap();
            assert_eq!(engine, EngineType::sqlite3);
            assert!(serde_json::from_str::<EngineType>("\"pgsql\"").is_err());
        }

        #[test]
        fn test_engine_type_names() {
            assert_eq!(EngineType::mysql.engine_name(), "MySQL");
            assert_eq!(EngineType::sqlite3.log_prefix(), "[SQLite]");
        }
    }

    mod migration_kind_tests {
        use std::str::FromStr;
        use crate::database::enums::migration_kind::MigrationKind;

        #[test]
        fn test_migration_kind_wire_values() {
            assert_eq!(MigrationKind::Baseline.as_str(), "BASELINE");
            assert_eq!(format!("{}", MigrationKind::Sql), "SQL");
            assert_eq!(serde_json::to_string(&MigrationKind::Baseline).unwrap(), "\"BASELINE\"");
        }

        #[test]
        fn test_migration_kind_strict_decode() {
            assert_eq!(MigrationKind::from_str("SQL").unwrap(), MigrationKind::Sql);
            assert_eq!(MigrationKind::from_str("BASELINE").unwrap(), MigrationKind::Baseline);
            assert!(MigrationKind::from_str("sql").is_err());
            assert!(MigrationKind::from_str("UNKNOWN").is_err());
        }
    }

    mod migration_info_tests {
        use crate::database::enums::migration_kind::MigrationKind;
        use crate::database::structs::migration_info::MigrationInfo;

        #[test]
        fn test_parse_migration_without_description() {
            let info = MigrationInfo::parse("202401010000_db1.sql").unwrap();
            assert_eq!(info.version, "202401010000");
            assert_eq!(info.namespace, "db1");
            assert_eq!(info.database, "db1");
            assert_eq!(info.kind, MigrationKind::Sql);
            assert_eq!(info.description, "Create db1 migration");
        }

        #[test]
        fn test_parse_migration_with_description() {
            let info = MigrationInfo::parse("202401010000_db1_create_t1.sql").unwrap();
            assert_eq!(info.kind, MigrationKind::Sql);
            assert_eq!(info.description, "Create t1");
        }

        #[test]
        fn test_parse_baseline_without_description() {
            let info = MigrationInfo::parse("202401010000_db1_baseline.sql").unwrap();
            assert_eq!(info.kind, MigrationKind::Baseline);
            assert_eq!(info.description, "Create db1 baseline");
        }

        #[test]
        fn test_parse_baseline_with_description() {
            let info = MigrationInfo::parse("202401010000_db1_baseline_create_t1.sql").unwrap();
            assert_eq!(info.kind, MigrationKind::Baseline);
            assert_eq!(info.description, "Create t1");
        }

        #[test]
        fn test_parse_keeps_underscored_namespace_ambiguity() {
            let info = MigrationInfo::parse("0001_my_app_add_users.sql").unwrap();
            assert_eq!(info.namespace, "my");
            assert_eq!(info.description, "App add users");
        }
    }

    mod config_value_tests {
        use crate::database::structs::connection_config::ConnectionConfig;
        use crate::database::structs::driver_config::DriverConfig;

        #[test]
        fn test_driver_config_defaults() {
            let config = DriverConfig::default();
            assert_eq!(config.history_database, "schemabase");
            assert_eq!(config.max_connections, 1);
            assert_eq!(config.slow_statement_duration().as_secs(), 1);
        }

        #[test]
        fn test_connection_config_debug_redacts_password() {
            let config = ConnectionConfig::new("localhost", "3306", "root", "hunter2", "db1");
            let debug = format!("{:?}", config);
            assert!(!debug.contains("hunter2"));
            assert!(debug.contains("localhost"));
        }
    }

    mod driver_tests {
        use crate::database::enums::engine_type::EngineType;
        use crate::database::errors::DatabaseError;
        use crate::database::structs::connection_config::ConnectionConfig;
        use crate::database::structs::driver_config::DriverConfig;
        use crate::database::structs::driver_context::DriverContext;
        use crate::database::structs::driver_mysql::DriverMySQL;
        use crate::database::structs::driver_sqlite::DriverSQLite;
        use crate::database::traits::driver::Driver;

        #[test]
        fn test_mysql_rejects_invalid_port() {
            let driver = DriverMySQL::new(DriverConfig::default());
            let config = ConnectionConfig::new("localhost", "not-a-port", "root", "", "");
            match driver.connect_options(&config) {
                Err(DatabaseError::Connection(message)) => assert!(message.contains("not-a-port")),
                other => panic!("unexpected result: {other:?}"),
            }
        }

        #[test]
        fn test_sqlite_requires_database_path() {
            let driver = DriverSQLite::new(DriverConfig::default());
            let config = ConnectionConfig::default();
            assert!(matches!(driver.connect_options(&config), Err(DatabaseError::Connection(_))));
        }

        #[test]
        fn test_sqlite_memory_detection() {
            assert!(DriverSQLite::is_memory(":memory:"));
            assert!(DriverSQLite::is_memory("sqlite::memory:"));
            assert!(!DriverSQLite::is_memory("/tmp/schemabase.db"));
        }

        #[tokio::test]
        async fn test_unopened_driver_reports_not_connected() {
            let ctx = DriverContext::background();
            let driver = DriverMySQL::new(DriverConfig::default());
            assert_eq!(driver.engine_type(), EngineType::mysql);
            assert!(matches!(driver.ping(&ctx).await, Err(DatabaseError::NotConnected(EngineType::mysql))));

            let driver = DriverSQLite::new(DriverConfig::default());
            assert!(matches!(
                driver.sync_schema(&ctx).await,
                Err(DatabaseError::NotConnected(EngineType::sqlite3))
            ));
            driver.close().await;
        }
    }
}
