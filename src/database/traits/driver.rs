use async_trait::async_trait;
use crate::database::enums::engine_type::EngineType;
use crate::database::errors::DatabaseError;
use crate::database::structs::connection_config::ConnectionConfig;
use crate::database::structs::db_schema::DbSchema;
use crate::database::structs::driver_context::DriverContext;
use crate::database::structs::migration_history::MigrationHistory;
use crate::database::structs::migration_info::MigrationInfo;

/// Uniform capability set implemented once per engine type.
///
/// Drivers are built unconnected by a registered factory, then turned into a
/// connected handle by [`Driver::open`]. Callers normally go through
/// [`DriverRegistry::open`](crate::database::structs::driver_registry::DriverRegistry),
/// which also pings the fresh connection. A driver is owned by one caller and
/// is not meant to be shared between concurrent sessions.
///
/// None of these calls retry. Retry and backoff belong to the caller.
#[async_trait]
pub trait Driver: Send + Sync {
    fn engine_type(&self) -> EngineType;

    /// Establishes the engine connection and returns the connected driver.
    async fn open(self: Box<Self>, config: &ConnectionConfig) -> Result<Box<dyn Driver>, DatabaseError>;

    async fn ping(&self, ctx: &DriverContext) -> Result<(), DatabaseError>;

    /// Reads the engine catalog into a fresh, fully materialized snapshot.
    async fn sync_schema(&self, ctx: &DriverContext) -> Result<Vec<DbSchema>, DatabaseError>;

    async fn execute(&self, ctx: &DriverContext, statement: &str) -> Result<(), DatabaseError>;

    /// Whether the migration history storage is still missing. Read-only.
    async fn needs_setup_migration(&self, ctx: &DriverContext) -> Result<bool, DatabaseError>;

    /// Creates the migration history storage unless it already exists.
    async fn setup_migration_if_needed(&self, ctx: &DriverContext) -> Result<(), DatabaseError>;

    /// Applies `statement` and then records `info` in the history table.
    ///
    /// A failing statement yields [`DatabaseError::Statement`] and writes no
    /// history. A successful statement followed by a failed history write
    /// yields [`DatabaseError::HistoryRecording`]; the statement is not undone.
    async fn execute_migration(
        &self,
        ctx: &DriverContext,
        info: &MigrationInfo,
        statement: &str,
    ) -> Result<(), DatabaseError>;

    /// History records in application order, optionally limited to one namespace.
    async fn find_migration_history(
        &self,
        ctx: &DriverContext,
        namespace: Option<&str>,
    ) -> Result<Vec<MigrationHistory>, DatabaseError>;

    async fn close(&self);
}
