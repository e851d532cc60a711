use std::sync::Arc;
use crate::database::structs::driver_config::DriverConfig;
use crate::database::traits::driver::Driver;

/// Builds an unconnected driver; registered once per engine type.
pub type DriverFactory = Arc<dyn Fn(DriverConfig) -> Box<dyn Driver> + Send + Sync>;
