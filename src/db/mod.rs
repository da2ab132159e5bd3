pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod query;
pub mod rest;

use crate::config::{Backend, Config};
use crate::errors::AppResult;
use async_trait::async_trait;
use query::{Filter, Select, Table};
use serde_json::Value;

/// Row-level access to the tables behind the dashboard.
///
/// Rows travel as JSON objects keyed by column name. Every call is a single
/// round trip; nothing spans two calls.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn select(&self, query: &Select) -> AppResult<Vec<Value>>;

    /// Insert one or more rows and return them as stored.
    async fn insert(&self, table: Table, rows: Vec<Value>) -> AppResult<Vec<Value>>;

    /// Patch every row matching `filters` and return the updated rows.
    async fn update(&self, table: Table, patch: Value, filters: &[Filter])
    -> AppResult<Vec<Value>>;

    /// Delete every row matching `filters`, returning how many went away.
    async fn delete(&self, table: Table, filters: &[Filter]) -> AppResult<usize>;
}

/// Open the store selected by the configuration.
pub fn open_store(cfg: &Config) -> AppResult<Box<dyn DataStore>> {
    match cfg.backend {
        Backend::Sqlite => Ok(Box::new(pool::DbPool::new(&cfg.database)?)),
        Backend::Rest => Ok(Box::new(rest::RestStore::new(&cfg.rest)?)),
    }
}
