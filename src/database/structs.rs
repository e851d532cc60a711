//! Database structures: configuration values, snapshots, descriptors and drivers.

/// Connection parameters handed to a driver's open step.
pub mod connection_config;

/// Engine-independent driver settings.
pub mod driver_config;

/// Deadline and cancellation carried by every blocking driver call.
pub mod driver_context;

/// Point-in-time snapshot of one schema.
pub mod db_schema;

/// Point-in-time snapshot of one table.
pub mod db_table;

/// Descriptor derived from a migration file name.
pub mod migration_info;

/// Persisted migration history record.
pub mod migration_history;

/// Engine type to driver factory table.
pub mod driver_registry;

/// MySQL/MariaDB driver.
pub mod driver_mysql;

/// SQLite driver.
pub mod driver_sqlite;
