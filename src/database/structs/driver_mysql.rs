use sqlx::{
    MySql,
    Pool
};
use crate::database::structs::driver_config::DriverConfig;

#[derive(Debug, Clone)]
pub struct DriverMySQL {
    pub(crate) config: DriverConfig,
    pub(crate) pool: Option<Pool<MySql>>,
}
