//! Common utilities and shared functionality.
//!
//! Logging setup lives here; it is installed once by the binary after the
//! configuration has been validated.

/// Core utility functions.
#[allow(clippy::module_inception)]
pub mod common;
