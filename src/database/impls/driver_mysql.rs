use std::collections::HashMap;
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
use sqlx::mysql::{
    MySqlConnectOptions,
    MySqlPoolOptions,
    MySqlRow
};
use sqlx::{
    ConnectOptions,
    Connection,
    MySql,
    Pool,
    Row
};
use crate::database::enums::engine_type::EngineType;
use crate::database::enums::migration_kind::MigrationKind;
use crate::database::errors::DatabaseError;
use crate::database::helpers::{
    create_history_database_query,
    create_history_table_query,
    insert_history_query,
    quote_identifier,
    select_history_query,
    MIGRATION_HISTORY_TABLE,
    MYSQL_SYSTEM_SCHEMAS
};
use crate::database::structs::connection_config::ConnectionConfig;
use crate::database::structs::db_schema::DbSchema;
use crate::database::structs::db_table::DbTable;
use crate::database::structs::driver_config::DriverConfig;
use crate::database::structs::driver_context::DriverContext;
use crate::database::structs::driver_mysql::DriverMySQL;
use crate::database::structs::migration_history::MigrationHistory;
use crate::database::structs::migration_info::MigrationInfo;
use crate::database::traits::driver::Driver;

const ENGINE: EngineType = EngineType::mysql;
const LOG_PREFIX: &str = "[MySQL]";
const SETUP_LOCK_TIMEOUT_SECS: i64 = 60;

impl DriverMySQL {
    pub fn new(config: DriverConfig) -> DriverMySQL {
        DriverMySQL { config, pool: None }
    }

    pub fn factory(config: DriverConfig) -> Box<dyn Driver> {
        Box::new(DriverMySQL::new(config))
    }

    pub fn connect_options(&self, config: &ConnectionConfig) -> Result<MySqlConnectOptions, DatabaseError> {
        let port = config.port.parse::<u16>().map_err(|error| {
            DatabaseError::Connection(format!("invalid port '{}': {}", config.port, error))
        })?;
        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(port)
            .username(&config.username)
            .password(&config.password)
            .log_statements(log::LevelFilter::Debug)
            .log_slow_statements(log::LevelFilter::Warn, self.config.slow_statement_duration());
        if !config.database.is_empty() {
            options = options.database(&config.database);
        }
        Ok(options)
    }

    fn pool(&self) -> Result<&Pool<MySql>, DatabaseError> {
        self.pool.as_ref().ok_or(DatabaseError::NotConnected(ENGINE))
    }

    fn setup_lock_name(&self) -> String {
        format!("{}.{}", self.config.history_database, MIGRATION_HISTORY_TABLE)
    }

    async fn create_history_storage(&self, pool: &Pool<MySql>) -> Result<(), DatabaseError> {
        // Detached so the advisory lock dies with the session if this future is dropped.
        let mut conn = pool
            .acquire()
            .await
            .map_err(|error| DatabaseError::Connection(error.to_string()))?
            .detach();
        let lock_name = self.setup_lock_name();

        let locked: Option<i64> = sqlx::query_scalar("SELECT GET_LOCK(?, ?)")
            .bind(&lock_name)
            .bind(SETUP_LOCK_TIMEOUT_SECS)
            .fetch_one(&mut conn)
            .await
            .map_err(|error| DatabaseError::Query(error.to_string()))?;
        if locked != Some(1) {
            return Err(DatabaseError::Query(format!("unable to acquire lock {}", lock_name)));
        }

        let mut queries = Vec::new();
        if let Some(query) = create_history_database_query(ENGINE, &self.config.history_database) {
            queries.push(query);
        }
        queries.push(create_history_table_query(ENGINE, &self.config.history_database));

        let mut created = Ok(());
        for query in queries.iter() {
            if let Err(error) = sqlx::query(query).execute(&mut conn).await {
                created = Err(DatabaseError::Statement(error.to_string()));
                break;
            }
        }

        if let Err(error) = sqlx::query("SELECT RELEASE_LOCK(?)").bind(&lock_name).execute(&mut conn).await {
            warn!("{} Unable to release lock {}: {}", LOG_PREFIX, lock_name, error);
        }
        if let Err(error) = conn.close().await {
            debug!("{} Closing setup connection failed: {}", LOG_PREFIX, error);
        }
        created
    }

    fn history_from_row(row: &MySqlRow) -> Result<MigrationHistory, DatabaseError> {
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

    async fn load_schemas(&self, pool: &Pool<MySql>) -> Result<Vec<DbSchema>, sqlx::Error> {
        let excluded = format!("?{}", ", ?".repeat(MYSQL_SYSTEM_SCHEMAS.len()));

        let schema_query = format!(
            "SELECT CAST(SCHEMA_NAME AS CHAR) AS name, CAST(DEFAULT_CHARACTER_SET_NAME AS CHAR) AS character_set, CAST(DEFAULT_COLLATION_NAME AS CHAR) AS collation FROM information_schema.SCHEMATA WHERE SCHEMA_NAME NOT IN ({}) ORDER BY SCHEMA_NAME",
            excluded
        );
        let mut query = sqlx::query(&schema_query);
        for schema in MYSQL_SYSTEM_SCHEMAS.iter() {
            query = query.bind(*schema);
        }
        let schema_rows = query.bind(&self.config.history_database).fetch_all(pool).await?;

        let table_query = format!(
            "SELECT CAST(TABLE_SCHEMA AS CHAR) AS table_schema, CAST(TABLE_NAME AS CHAR) AS name, CAST(IFNULL(UNIX_TIMESTAMP(CREATE_TIME), 0) AS SIGNED) AS created_ts, CAST(IFNULL(UNIX_TIMESTAMP(UPDATE_TIME), 0) AS SIGNED) AS updated_ts, CAST(IFNULL(ENGINE, '') AS CHAR) AS engine, CAST(IFNULL(TABLE_COLLATION, '') AS CHAR) AS collation, CAST(IFNULL(TABLE_ROWS, 0) AS SIGNED) AS row_count, CAST(IFNULL(DATA_LENGTH, 0) AS SIGNED) AS data_size, CAST(IFNULL(INDEX_LENGTH, 0) AS SIGNED) AS index_size FROM information_schema.TABLES WHERE TABLE_TYPE = 'BASE TABLE' AND TABLE_SCHEMA NOT IN ({}) ORDER BY TABLE_SCHEMA, TABLE_NAME",
            excluded
        );
        let mut query = sqlx::query(&table_query);
        for schema in MYSQL_SYSTEM_SCHEMAS.iter() {
            query = query.bind(*schema);
        }
        let table_rows = query.bind(&self.config.history_database).fetch_all(pool).await?;

        let mut tables: HashMap<String, Vec<DbTable>> = HashMap::new();
        for row in table_rows.iter() {
            let schema: String = row.try_get("table_schema")?;
            tables.entry(schema).or_default().push(DbTable {
                name: row.try_get("name")?,
                created_ts: row.try_get("created_ts")?,
                updated_ts: row.try_get("updated_ts")?,
                engine: row.try_get("engine")?,
                collation: row.try_get("collation")?,
                row_count: row.try_get("row_count")?,
                data_size: row.try_get("data_size")?,
                index_size: row.try_get("index_size")?,
            });
        }

        let mut schemas = Vec::with_capacity(schema_rows.len());
        for row in schema_rows.iter() {
            let name: String = row.try_get("name")?;
            let tables = tables.remove(&name).unwrap_or_default();
            schemas.push(DbSchema {
                name,
                character_set: row.try_get("character_set")?,
                collation: row.try_get("collation")?,
                tables,
            });
        }
        Ok(schemas)
    }
}

#[async_trait]
impl Driver for DriverMySQL {
    fn engine_type(&self) -> EngineType {
        ENGINE
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn open(self: Box<Self>, config: &ConnectionConfig) -> Result<Box<dyn Driver>, DatabaseError> {
        let options = self.connect_options(config)?;
        let pool = MySqlPoolOptions::new()
            .max_connections(self.config.max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|error| {
                error!("{} Unable to connect to MySQL on {}:{}", LOG_PREFIX, config.host, config.port);
                DatabaseError::Connection(error.to_string())
            })?;
        info!("{} Connected to {}:{}", LOG_PREFIX, config.host, config.port);
        Ok(Box::new(DriverMySQL { config: self.config, pool: Some(pool) }))
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
                sqlx::query_scalar("SELECT COUNT(*) FROM information_schema.TABLES WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?")
                    .bind(&self.config.history_database)
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
            debug!("{} Migration history already present in {}", LOG_PREFIX, self.config.history_database);
            return Ok(());
        }
        let pool = self.pool()?;
        info!("{} Creating migration history in {}", LOG_PREFIX, self.config.history_database);
        ctx.run(self.create_history_storage(pool)).await?
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
            .map_err(|error| DatabaseError::Connection(error.to_string()))?
            .detach();

        // The connection switches its default database, so it never goes back to the pool.
        let use_database = format!("USE {}", quote_identifier(ENGINE, &info.database));
        let started = Instant::now();
        ctx.run(async {
            sqlx::Executor::execute(&mut conn, sqlx::raw_sql(&use_database)).await?;
            sqlx::Executor::execute(&mut conn, sqlx::raw_sql(statement)).await?;
            Ok::<(), sqlx::Error>(())
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
                    .execute(&mut conn),
            )
            .await
            .map_err(|error| error.to_string())
            .and_then(|result| result.map_err(|error| error.to_string()));

        if let Err(message) = recorded {
            error!(
                "[MIGRATION] {} {} version {} applied but not recorded: {}",
                LOG_PREFIX, info.namespace, info.version, message
            );
            error!("[MIGRATION] Reconcile {}.{} before retrying", self.config.history_database, MIGRATION_HISTORY_TABLE);
            return Err(DatabaseError::history_recording(info, message));
        }

        if let Err(error) = conn.close().await {
            debug!("{} Closing migration connection failed: {}", LOG_PREFIX, error);
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
        rows.iter().map(DriverMySQL::history_from_row).collect()
    }

    async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("{} Connection pool closed", LOG_PREFIX);
        }
    }
}
