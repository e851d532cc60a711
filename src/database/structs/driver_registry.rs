use std::collections::HashMap;
use parking_lot::RwLock;
use crate::database::enums::engine_type::EngineType;
use crate::database::types::DriverFactory;

pub struct DriverRegistry {
    pub(crate) drivers: RwLock<HashMap<EngineType, DriverFactory>>,
}
