use diesel::{r2d2::{ConnectionManager, PoolError}, PgConnection};
use r2d2::Pool;

use crate::config::Settings;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

fn init_pool(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

pub fn establish_connection(settings: &Settings) -> Result<PgPool, PoolError> {
    init_pool(&settings.database_url, settings.pool_size)
}
