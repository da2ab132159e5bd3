pub mod assignment;
pub mod geocoder;
pub mod grouping;
pub mod location;
pub mod project;
pub mod resolver;
pub mod task;
pub mod zone_matcher;
pub mod zones;

use crate::errors::AppResult;
use tracing::error;

/// Read-side policy: a failed fetch is logged and rendered as an empty list.
pub fn or_empty<T>(what: &str, result: AppResult<Vec<T>>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "failed to load {what}");
            Vec::new()
        }
    }
}
