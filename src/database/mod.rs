//! Database driver abstraction and migration execution.
//!
//! Engines plug into a [`DriverRegistry`](structs::driver_registry::DriverRegistry)
//! through a factory keyed by [`EngineType`](enums::engine_type::EngineType).
//! Callers open a driver through the registry, which pings it before handing
//! it back, and then use the [`Driver`](traits::driver::Driver) capabilities:
//!
//! - schema introspection (`sync_schema`)
//! - migration history setup (`needs_setup_migration`, `setup_migration_if_needed`)
//! - migration execution with history bookkeeping (`execute_migration`)
//!
//! Migration file names are turned into descriptors by
//! [`MigrationInfo::parse`](structs::migration_info::MigrationInfo::parse).
//!
//! # Example
//!
//! ```rust,ignore
//! use schemabase::database::structs::driver_registry::DriverRegistry;
//!
//! let registry = DriverRegistry::with_builtins()?;
//! let driver = registry.open(EngineType::mysql, DriverConfig::default(), &conn, &ctx).await?;
//! driver.setup_migration_if_needed(&ctx).await?;
//! ```

/// Engine type and migration kind enumerations.
pub mod enums;

/// Error types for driver operations.
pub mod errors;

/// SQL text shared by the drivers.
pub mod helpers;

/// Implementation blocks for database types.
pub mod impls;

/// Data structures for drivers, snapshots and migration descriptors.
pub mod structs;

/// The driver capability trait.
pub mod traits;

/// Type aliases.
pub mod types;

#[cfg(test)]
mod tests;
