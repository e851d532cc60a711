use sqlx::{
    Pool,
    Sqlite
};
use crate::database::structs::driver_config::DriverConfig;

#[derive(Debug, Clone)]
pub struct DriverSQLite {
    pub(crate) config: DriverConfig,
    pub(crate) pool: Option<Pool<Sqlite>>,
}
