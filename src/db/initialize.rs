use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Initialize the local database.
/// Delegates all schema creation / upgrades to the migration list.
pub fn init_db(pool: &DbPool) -> AppResult<usize> {
    pool.with_conn(run_pending_migrations)
}
