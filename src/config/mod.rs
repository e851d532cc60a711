//! Configuration management module.
//!
//! Loads, saves and validates `config.toml`. The file has four parts:
//! - **log_level**: one of `off`, `trace`, `debug`, `info`, `warn`, `error`
//! - **database**: engine type and connection parameters
//! - **driver**: history database, pool size and slow statement threshold
//! - **migration**: creator recorded in the history and the per-command timeout
//!
//! # Example
//!
//! ```rust,ignore
//! use schemabase::config::structs::configuration::Configuration;
//!
//! let config = Configuration::load_from_file("config.toml", false)?;
//! let connection = config.connection_config();
//! ```

/// Configuration error enumeration.
pub mod enums;

/// Configuration data structures.
pub mod structs;

/// Implementation blocks for configuration loading/saving.
pub mod impls;
