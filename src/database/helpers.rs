use crate::database::enums::engine_type::EngineType;

pub const MIGRATION_HISTORY_TABLE: &str = "migration_history";

/// Schemas owned by the MySQL server itself; never part of a snapshot.
pub const MYSQL_SYSTEM_SCHEMAS: [&str; 4] = ["information_schema", "mysql", "performance_schema", "sys"];

pub fn quote_identifier(engine: EngineType, identifier: &str) -> String {
    match engine {
        EngineType::mysql | EngineType::sqlite3 => format!("`{}`", identifier.replace('`', "``")),
    }
}

/// Fully qualified history table. SQLite keeps it in the main database.
pub fn history_table(engine: EngineType, history_database: &str) -> String {
    match engine {
        EngineType::mysql => format!(
            "{}.{}",
            quote_identifier(engine, history_database),
            quote_identifier(engine, MIGRATION_HISTORY_TABLE)
        ),
        EngineType::sqlite3 => quote_identifier(engine, MIGRATION_HISTORY_TABLE),
    }
}

pub fn create_history_database_query(engine: EngineType, history_database: &str) -> Option<String> {
    match engine {
        EngineType::mysql => Some(format!(
            "CREATE DATABASE IF NOT EXISTS {}",
            quote_identifier(engine, history_database)
        )),
        EngineType::sqlite3 => None,
    }
}

pub fn create_history_table_query(engine: EngineType, history_database: &str) -> String {
    let table = history_table(engine, history_database);
    match engine {
        EngineType::mysql => format!(
            "CREATE TABLE IF NOT EXISTS {} (`id` BIGINT NOT NULL AUTO_INCREMENT, `created_by` VARCHAR(255) NOT NULL DEFAULT '', `created_ts` BIGINT NOT NULL, `namespace` VARCHAR(255) NOT NULL, `version` VARCHAR(255) NOT NULL, `type` VARCHAR(32) NOT NULL, `description` TEXT NOT NULL, `statement` LONGTEXT NOT NULL, `execution_duration` BIGINT NOT NULL DEFAULT 0, PRIMARY KEY (`id`), UNIQUE KEY `namespace_version` (`namespace`, `version`)) COLLATE='utf8mb4_general_ci'",
            table
        ),
        EngineType::sqlite3 => format!(
            "CREATE TABLE IF NOT EXISTS {} (`id` INTEGER PRIMARY KEY AUTOINCREMENT, `created_by` TEXT NOT NULL DEFAULT '', `created_ts` INTEGER NOT NULL, `namespace` TEXT NOT NULL, `version` TEXT NOT NULL, `type` TEXT NOT NULL, `description` TEXT NOT NULL, `statement` TEXT NOT NULL, `execution_duration` INTEGER NOT NULL DEFAULT 0, UNIQUE (`namespace`, `version`))",
            table
        ),
    }
}

pub fn insert_history_query(engine: EngineType, history_database: &str) -> String {
    format!(
        "INSERT INTO {} (`created_by`, `created_ts`, `namespace`, `version`, `type`, `description`, `statement`, `execution_duration`) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        history_table(engine, history_database)
    )
}

/// Oldest first. Binds one `?` for the namespace when `filtered` is set.
pub fn select_history_query(engine: EngineType, history_database: &str, filtered: bool) -> String {
    let filter = if filtered { " WHERE `namespace` = ?" } else { "" };
    format!(
        "SELECT `id`, `created_by`, `created_ts`, `namespace`, `version`, `type`, `description`, `statement`, `execution_duration` FROM {}{} ORDER BY `id` ASC",
        history_table(engine, history_database),
        filter
    )
}
