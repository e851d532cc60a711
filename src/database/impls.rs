//! Implementation blocks for database types.

pub mod connection_config;
pub mod driver_config;
pub mod driver_context;
pub mod driver_mysql;
pub mod driver_registry;
pub mod driver_sqlite;
pub mod engine_type;
pub mod migration_info;
pub mod migration_kind;
