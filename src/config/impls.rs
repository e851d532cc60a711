//! Implementation blocks for configuration types.

pub mod configuration;
pub mod database_config;
