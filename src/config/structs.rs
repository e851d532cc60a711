//! Configuration data structures.
//!
//! Each struct corresponds to a section in the TOML configuration file.

/// Root configuration structure containing all settings.
pub mod configuration;

/// Database engine and connection settings.
pub mod database_config;

/// Migration defaults (creator, timeout).
pub mod migration_config;
