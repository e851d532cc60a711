#![allow(dead_code)]
use std::sync::atomic::{
    AtomicUsize,
    Ordering
};
use std::sync::Arc;
use async_trait::async_trait;
use tempfile::TempDir;
use schemabase::database::enums::engine_type::EngineType;
use schemabase::database::errors::DatabaseError;
use schemabase::database::structs::connection_config::ConnectionConfig;
use schemabase::database::structs::db_schema::DbSchema;
use schemabase::database::structs::driver_config::DriverConfig;
use schemabase::database::structs::driver_context::DriverContext;
use schemabase::database::structs::driver_registry::DriverRegistry;
use schemabase::database::structs::migration_history::MigrationHistory;
use schemabase::database::structs::migration_info::MigrationInfo;
use schemabase::database::traits::driver::Driver;
use schemabase::database::types::DriverFactory;

/// Counters shared between a test and every fake driver its factory builds.
#[derive(Debug, Clone, Default)]
pub struct FakeProbe {
    pub built: Arc<AtomicUsize>,
    pub pinged: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
    pub dropped: Arc<AtomicUsize>,
}

impl FakeProbe {
    pub fn built(&self) -> usize {
        self.built.load(Ordering::SeqCst)
    }

    pub fn pinged(&self) -> usize {
        self.pinged.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FakeBehaviour {
    pub fail_open: bool,
    pub fail_ping: bool,
}

/// In-process driver that never touches a database.
#[derive(Debug)]
pub struct FakeDriver {
    pub behaviour: FakeBehaviour,
    pub probe: FakeProbe,
    pub connected: bool,
}

impl Drop for FakeDriver {
    fn drop(&mut self) {
        self.probe.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Driver for FakeDriver {
    fn engine_type(&self) -> EngineType {
        EngineType::mysql
    }

    async fn open(self: Box<Self>, _config: &ConnectionConfig) -> Result<Box<dyn Driver>, DatabaseError> {
        if self.behaviour.fail_open {
            return Err(DatabaseError::Connection(String::from("connection refused")));
        }
        let mut driver = self;
        driver.connected = true;
        Ok(driver)
    }

    async fn ping(&self, _ctx: &DriverContext) -> Result<(), DatabaseError> {
        self.probe.pinged.fetch_add(1, Ordering::SeqCst);
        if self.behaviour.fail_ping {
            return Err(DatabaseError::Connection(String::from("ping refused")));
        }
        Ok(())
    }

    async fn sync_schema(&self, _ctx: &DriverContext) -> Result<Vec<DbSchema>, DatabaseError> {
        Ok(Vec::new())
    }

    async fn execute(&self, _ctx: &DriverContext, _statement: &str) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn needs_setup_migration(&self, _ctx: &DriverContext) -> Result<bool, DatabaseError> {
        Ok(false)
    }

    async fn setup_migration_if_needed(&self, _ctx: &DriverContext) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn execute_migration(
        &self,
        _ctx: &DriverContext,
        _info: &MigrationInfo,
        _statement: &str,
    ) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn find_migration_history(
        &self,
        _ctx: &DriverContext,
        _namespace: Option<&str>,
    ) -> Result<Vec<MigrationHistory>, DatabaseError> {
        Ok(Vec::new())
    }

    async fn close(&self) {
        self.probe.closed.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn fake_factory(behaviour: FakeBehaviour, probe: FakeProbe) -> DriverFactory {
    Arc::new(move |_config: DriverConfig| -> Box<dyn Driver> {
        probe.built.fetch_add(1, Ordering::SeqCst);
        Box::new(FakeDriver { behaviour, probe: probe.clone(), connected: false })
    })
}

pub fn memory_connection() -> ConnectionConfig {
    ConnectionConfig::new("", "", "", "", ":memory:")
}

pub async fn open_sqlite_memory() -> Box<dyn Driver> {
    let registry = DriverRegistry::with_builtins().unwrap();
    registry
        .open(EngineType::sqlite3, DriverConfig::default(), &memory_connection(), &DriverContext::background())
        .await
        .unwrap()
}

pub fn migration(filename: &str) -> MigrationInfo {
    MigrationInfo::parse(filename).unwrap().with_creator("tester")
}

pub async fn table_names(driver: &dyn Driver, schema: &str) -> Vec<String> {
    driver
        .sync_schema(&DriverContext::background())
        .await
        .unwrap()
        .into_iter()
        .find(|snapshot| snapshot.name == schema)
        .map(|snapshot| snapshot.tables.into_iter().map(|table| table.name).collect())
        .unwrap_or_default()
}

pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}
