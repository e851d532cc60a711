use std::str::FromStr;
use std::time::Instant;
use async_trait::async_trait;
use chrono::Utc;
use log::{
    debug,
    error,
    info,
    warn
};
use sqlx::sqlite::{
    SqliteConnectOptions,
    SqlitePoolOptions,
    SqliteRow
};
use sqlx::{
    ConnectOptions,
    Connection,
    Pool,
    Row,
    Sqlite
};
use crate::database::enums::engine_type::EngineType;
use crate::database::enums::migration_kind::MigrationKind;
use crate::database::errors::DatabaseError;
use crate::database::helpers::{
    create_history_table_query,
    insert_history_query,
    quote_identifier,
    select_history_query,
    MIGRATION_HISTORY_TABLE
};
use crate::database::structs::connection_config::ConnectionConfig;
use crate::database::structs::db_schema::DbSchema;
use crate::database::structs::db_table::DbTable;
use crate::database::structs::driver_config::DriverConfig;
use crate::database::structs::driver_context::DriverContext;
use crate::database::structs::driver_sqlite::DriverSQLite;
use crate::database::structs::migration_history::MigrationHistory;
use crate::database::structs::migration_info::MigrationInfo;
use crate::database::traits::driver::Driver;

const ENGINE: EngineType = EngineType::sqlite3;
const LOG_PREFIX: &str = "[SQLite]";
const MAIN_SCHEMA: &str = "main";
const TEMP_SCHEMA: &str = "temp";

impl DriverSQLite {
    pub fn new(config: DriverConfig) -> DriverSQLite {
        DriverSQLite { config, pool: None }
    }

    pub fn factory(config: DriverConfig) -> Box<dyn Driver> {
        Box::new(DriverSQLite::new(config))
    }

    /// In-memory databases vanish with their last connection.
    pub fn is_memory(database: &str) -> bool {
        database.contains(":memory:") || database.contains("mode=memory")
    }

    pub fn connect_options(&self, config: &ConnectionConfig) -> Result<SqliteConnectOptions, DatabaseError> {
        if config.database.trim().is_empty() {
            return Err(DatabaseError::Connection(String::from("a database path is required for SQLite")));
        }
        let options = SqliteConnectOptions::from_str(&config.database)
            .map_err(|error| DatabaseError::Connection(error.to_string()))?
            .create_if_missing(true)
            .log_statements(log::LevelFilter::Debug)
            .log_slow_statements(log::LevelFilter::Warn, self.config.slow_statement_duration());
        Ok(options)
    }

    fn pool(&self) -> Result<&Pool<Sqlite>, DatabaseError> {
        self.pool.as_ref().ok_or(DatabaseError::NotConnected(ENGINE))
    }

    fn history_from_row(row: &SqliteRow) -> Result<MigrationHistory, DatabaseError> {
        let decode = |error: sqlx::Error| DatabaseError::Decode(error.to_string());
        let kind: String = row.try_get("type").map_err(decode)?;
        Ok(MigrationHistory {
            id: row.try_get("id").map_err(decode)?,
            creator: row.try_get("created_by").map_err(decode)?,
            created_ts: row.try_get("created_ts").map_err(decode)?,
            namespace: row.try_get("namespace").map_err(decode)?,
            version: row.try_get("version").map_err(decode)?,
            kind: MigrationKind::from_str(&kind)?,
            description: row.try_get("description").map_err(decode)?,
            statement: row.try_get("statement").map_err(decode)?,
            execution_duration_ms: row.try_get("execution_duration").map_err(decode)?,
        })
    }

    /// Schemas visible on this connection, `temp` excluded, sorted by name.
    async fn attached_schemas<'c, E>(executor: E) -> Result<Vec<String>, sqlx::Error>
    where
        E: sqlx::Executor<'c, Database = Sqlite>,
    {
        let mut names = Vec::new();
        for row in sqlx::query("PRAGMA database_list").fetch_all(executor).await?.iter() {
            let name: String = row.try_get("name")?;
            if name != TEMP_SCHEMA {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    async fn load_schemas(&self, pool: &Pool<Sqlite>) -> Result<Vec<DbSchema>, sqlx::Error> {
        let encoding: String = sqlx::query_scalar("PRAGMA encoding").fetch_one(pool).await?;
        let names = DriverSQLite::attached_schemas(pool).await?;

        let mut schemas = Vec::with_capacity(names.len());
        for name in names {
            let quoted_schema = quote_identifier(ENGINE, &name);
            let table_query = format!(
                "SELECT name FROM {}.sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                quoted_schema
            );
            let table_names: Vec<String> = sqlx::query_scalar(&table_query).fetch_all(pool).await?;

            let mut tables = Vec::with_capacity(table_names.len());
            for table in table_names {
                if name == MAIN_SCHEMA && table == MIGRATION_HISTORY_TABLE {
                    continue;
                }
                let count_query = format!(
                    "SELECT COUNT(*) FROM {}.{}",
                    quoted_schema,
                    quote_identifier(ENGINE, &table)
                );
                let row_count: i64 = sqlx::query_scalar(&count_query).fetch_one(pool).await?;
                tables.push(DbTable {
                    name: table,
                    row_count,
                    ..DbTable::default()
                });
            }

            schemas.push(DbSchema {
                name,
                character_set: encoding.clone(),
                collation: String::new(),
                tables,
            });
        }
        Ok(schemas)
    }
}

#[async_trait]
impl Driver for DriverSQLite {
    fn engine_type(&self) -> EngineType {
        ENGINE
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn open(self: Box<Self>, config: &ConnectionConfig) -> Result<Box<dyn Driver>, DatabaseError> {
        let options = self.connect_options(config)?;
        let mut pool_options = SqlitePoolOptions::new().max_connections(self.config.max_connections.max(1));
        if DriverSQLite::is_memory(&config.database) {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await.map_err(|error| {
            error!("{} Unable to open SQLite database {}", LOG_PREFIX, config.database);
            DatabaseError::Connection(error.to_string())
        })?;
        info!("{} Opened {}", LOG_PREFIX, config.database);
        Ok(Box::new(DriverSQLite { config: self.config, pool: Some(pool) }))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn ping(&self, ctx: &DriverContext) -> Result<(), DatabaseError> {
        let pool = self.pool()?;
        ctx.run(async {
            let mut conn = pool.acquire().await?;
            conn.ping().await
        })
        .await?
        .map_err(|error| DatabaseError::Connection(error.to_string()))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn sync_schema(&self, ctx: &DriverContext) -> Result<Vec<DbSchema>, DatabaseError> {
        let pool = self.pool()?;
        let schemas = ctx
            .run(self.load_schemas(pool))
            .await?
            .map_err(|error| DatabaseError::Query(error.to_string()))?;
        debug!("{} Synced {} schemas", LOG_PREFIX, schemas.len());
        Ok(schemas)
    }

    #[tracing::instrument(level = "debug", skip(self, statement))]
    async fn execute(&self, ctx: &DriverContext, statement: &str) -> Result<(), DatabaseError> {
        let pool = self.pool()?;
        ctx.run(sqlx::raw_sql(statement).execute(pool))
            .await?
            .map(|_| ())
            .map_err(|error| DatabaseError::Statement(error.to_string()))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn needs_setup_migration(&self, ctx: &DriverContext) -> Result<bool, DatabaseError> {
        let pool = self.pool()?;
        let count: i64 = ctx
            .run(
                sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
                    .bind(MIGRATION_HISTORY_TABLE)
                    .fetch_one(pool),
            )
            .await?
            .map_err(|error| DatabaseError::Query(error.to_string()))?;
        Ok(count == 0)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn setup_migration_if_needed(&self, ctx: &DriverContext) -> Result<(), DatabaseError> {
        if !self.needs_setup_migration(ctx).await? {
            debug!("{} Migration history already present", LOG_PREFIX);
            return Ok(());
        }
        let pool = self.pool()?;
        info!("{} Creating table {}", LOG_PREFIX, MIGRATION_HISTORY_TABLE);
        let query = create_history_table_query(ENGINE, &self.config.history_database);
        ctx.run(sqlx::query(&query).execute(pool))
            .await?
            .map(|_| ())
            .map_err(|error| DatabaseError::Statement(error.to_string()))
    }

    #[tracing::instrument(level = "debug", skip(self, info, statement), fields(namespace = %info.namespace, version = %info.version))]
    async fn execute_migration(
        &self,
        ctx: &DriverContext,
        info: &MigrationInfo,
        statement: &str,
    ) -> Result<(), DatabaseError> {
        let pool = self.pool()?;
        let mut conn = ctx
            .run(pool.acquire())
            .await
            .map_err(|error| DatabaseError::statement(info, error.to_string()))?
            .map_err(|error| DatabaseError::Connection(error.to_string()))?;

        // No USE on SQLite: the target must be main or an attached schema, and
        // statements for attached schemas qualify their names.
        let schemas = ctx
            .run(DriverSQLite::attached_schemas(&mut *conn))
            .await
            .map_err(|error| DatabaseError::statement(info, error.to_string()))?
            .map_err(|error| DatabaseError::statement(info, error.to_string()))?;
        if !schemas.contains(&info.database) {
            return Err(DatabaseError::statement(
                info,
                format!("database {} is not attached", info.database),
            ));
        }

        // SQLite DDL is transactional, so a failing statement leaves nothing behind.
        let started = Instant::now();
        ctx.run(async {
            let mut tx = conn.begin().await?;
            if let Err(error) = sqlx::Executor::execute(&mut *tx, sqlx::raw_sql(statement)).await {
                if let Err(rollback) = tx.rollback().await {
                    warn!("{} Rollback of {} version {} failed: {}", LOG_PREFIX, info.namespace, info.version, rollback);
                }
                return Err(error);
            }
            tx.commit().await
        })
        .await
        .map_err(|error| DatabaseError::statement(info, error.to_string()))?
        .map_err(|error| DatabaseError::statement(info, error.to_string()))?;
        let duration_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);

        let history_query = insert_history_query(ENGINE, &self.config.history_database);
        let recorded = ctx
            .run(
                sqlx::query(&history_query)
                    .bind(&info.creator)
                    .bind(Utc::now().timestamp())
                    .bind(&info.namespace)
                    .bind(&info.version)
                    .bind(info.kind.as_str())
                    .bind(&info.description)
                    .bind(statement)
                    .bind(duration_ms)
                    .execute(&mut *conn),
            )
            .await
            .map_err(|error| error.to_string())
            .and_then(|result| result.map_err(|error| error.to_string()));

        if let Err(message) = recorded {
            error!(
                "[MIGRATION] {} {} version {} applied but not recorded: {}",
                LOG_PREFIX, info.namespace, info.version, message
            );
            error!("[MIGRATION] Reconcile {} before retrying", MIGRATION_HISTORY_TABLE);
            return Err(DatabaseError::history_recording(info, message));
        }

        info!(
            "[MIGRATION] {} Applied {} version {} ({}) in {}ms",
            LOG_PREFIX, info.namespace, info.version, info.kind, duration_ms
        );
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn find_migration_history(
        &self,
        ctx: &DriverContext,
        namespace: Option<&str>,
    ) -> Result<Vec<MigrationHistory>, DatabaseError> {
        let pool = self.pool()?;
        let query = select_history_query(ENGINE, &self.config.history_database, namespace.is_some());
        let mut select = sqlx::query(&query);
        if let Some(namespace) = namespace {
            select = select.bind(namespace);
        }
        let rows = ctx
            .run(select.fetch_all(pool))
            .await?
            .map_err(|error| DatabaseError::Query(error.to_string()))?;
        rows.iter().map(DriverSQLite::history_from_row).collect()
    }

    async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("{} Connection pool closed", LOG_PREFIX);
        }
    }
}
