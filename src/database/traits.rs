//! Database trait definitions.

/// Capability set every engine driver implements.
pub mod driver;
