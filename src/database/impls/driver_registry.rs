use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use log::{
    error,
    info,
    warn
};
use parking_lot::RwLock;
use crate::database::enums::engine_type::EngineType;
use crate::database::errors::DatabaseError;
use crate::database::structs::connection_config::ConnectionConfig;
use crate::database::structs::driver_config::DriverConfig;
use crate::database::structs::driver_context::DriverContext;
use crate::database::structs::driver_mysql::DriverMySQL;
use crate::database::structs::driver_registry::DriverRegistry;
use crate::database::structs::driver_sqlite::DriverSQLite;
use crate::database::traits::driver::Driver;
use crate::database::types::DriverFactory;

impl DriverRegistry {
    /// An empty registry. Most callers want [`DriverRegistry::with_builtins`].
    pub fn new() -> DriverRegistry {
        DriverRegistry { drivers: RwLock::new(HashMap::new()) }
    }

    /// Registry holding every driver shipped with this crate.
    pub fn with_builtins() -> Result<DriverRegistry, DatabaseError> {
        let registry = DriverRegistry::new();
        registry.register(EngineType::mysql, Arc::new(DriverMySQL::factory))?;
        registry.register(EngineType::sqlite3, Arc::new(DriverSQLite::factory))?;
        Ok(registry)
    }

    /// Makes a driver available under `engine_type`.
    ///
    /// Meant for startup wiring only. Registering the same engine type twice
    /// is a configuration error; the first factory stays in place.
    pub fn register(&self, engine_type: EngineType, factory: DriverFactory) -> Result<(), DatabaseError> {
        let mut drivers = self.drivers.write();
        if drivers.contains_key(&engine_type) {
            error!("[REGISTRY] Register called twice for driver {}", engine_type);
            return Err(DatabaseError::Configuration(format!(
                "register called twice for driver {}",
                engine_type
            )));
        }
        drivers.insert(engine_type, factory);
        info!("[REGISTRY] Registered driver {}", engine_type);
        Ok(())
    }

    pub fn lookup(&self, engine_type: EngineType) -> Result<DriverFactory, DatabaseError> {
        self.drivers
            .read()
            .get(&engine_type)
            .cloned()
            .ok_or(DatabaseError::UnknownDriver(engine_type))
    }

    pub fn engines(&self) -> Vec<EngineType> {
        let mut engines: Vec<EngineType> = self.drivers.read().keys().copied().collect();
        engines.sort();
        engines
    }

    /// Builds, connects and pings a driver for `engine_type`.
    ///
    /// A driver whose ping fails is closed and dropped; the caller only ever
    /// receives a handle that answered a ping just before this returned.
    #[tracing::instrument(level = "debug", skip(self, driver_config, ctx))]
    pub async fn open(
        &self,
        engine_type: EngineType,
        driver_config: DriverConfig,
        connection_config: &ConnectionConfig,
        ctx: &DriverContext,
    ) -> Result<Box<dyn Driver>, DatabaseError> {
        let factory = self.lookup(engine_type)?;
        let driver = ctx.run(factory(driver_config).open(connection_config)).await??;

        if let Err(error) = driver.ping(ctx).await {
            warn!("{} Ping after open failed: {}", engine_type.log_prefix(), error);
            driver.close().await;
            return Err(error);
        }

        info!("{} Driver opened and reachable", engine_type.log_prefix());
        Ok(driver)
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        DriverRegistry::new()
    }
}

impl fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("engines", &self.engines())
            .finish()
    }
}
