//! # schemabase
//!
//! Database driver registry and schema migration executor.
//!
//! ## Overview
//!
//! Engines register a factory in a [`DriverRegistry`](database::structs::driver_registry::DriverRegistry).
//! Opening a driver through the registry always pings it first, so a returned
//! handle was reachable at the moment it was handed out. Migration files follow
//! the `{version}_{database}[_baseline][_{description}].sql` naming convention
//! and are applied together with a record in a migration history table.
//!
//! ## Supported engines
//!
//! - **MySQL/MariaDB**: schema snapshots from `information_schema`, history in a
//!   dedicated database guarded by an advisory lock during setup
//! - **SQLite**: history table inside the main database, usable in memory
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use schemabase::database::structs::driver_registry::DriverRegistry;
//! use schemabase::database::structs::migration_info::MigrationInfo;
//!
//! let registry = DriverRegistry::with_builtins()?;
//! let driver = registry.open(engine, driver_config, &connection, &ctx).await?;
//! driver.setup_migration_if_needed(&ctx).await?;
//! let info = MigrationInfo::parse("202401010000_db1_create_t1.sql")?.with_creator("ci");
//! driver.execute_migration(&ctx, &info, "CREATE TABLE t1 (id INT)").await?;
//! ```
//!
//! ## Modules
//!
//! - [`common`] - Logging setup
//! - [`config`] - Configuration management and TOML parsing
//! - [`database`] - Driver registry, drivers, migration parsing and execution
//! - [`structs`] - CLI argument parsing

/// Common utilities and shared functionality.
///
/// Contains the logging setup used by the binary.
pub mod common;

/// Configuration management module.
///
/// Handles loading, parsing, and validating configuration from TOML files.
pub mod config;

/// Database driver module.
///
/// Provides the driver registry, the MySQL and SQLite drivers, the migration
/// file name parser and the migration executor.
pub mod database;

/// CLI argument parsing.
pub mod structs;
