//! PostgREST client for the hosted store.
//!
//! Tables are served under `{url}/rest/v1/{table}`; filters travel as
//! `column=eq.value` query pairs and writes ask for the affected rows back
//! with `Prefer: return=representation`.

use crate::config::RestConfig;
use crate::db::DataStore;
use crate::db::query::{Filter, Select, Table};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const RETURN_REPRESENTATION: &str = "return=representation";

pub struct RestStore {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl RestStore {
    pub fn new(cfg: &RestConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let api_key = Some(cfg.api_key.trim().to_string()).filter(|k| !k.is_empty());

        Ok(Self {
            base_url: cfg.url.trim_end_matches('/').to_string(),
            api_key,
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: Table) -> RequestBuilder {
        let mut req = self.client.request(method, self.endpoint(table));
        if let Some(key) = &self.api_key {
            req = req.header("apikey", key).bearer_auth(key);
        }
        req
    }

    async fn rows(response: Response) -> AppResult<Vec<Value>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Store {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&text)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            single => Ok(vec![single]),
        }
    }
}

fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| (f.column.to_string(), f.to_param()))
        .collect()
}

/// Query pairs for a select, in the order PostgREST documents them.
pub fn select_params(query: &Select) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), query.select_param())];
    params.extend(filter_params(&query.filters));
    if let Some(order) = &query.order {
        params.push((
            "order".to_string(),
            format!("{}.{}", order.column, order.direction.as_str()),
        ));
    }
    params
}

#[async_trait]
impl DataStore for RestStore {
    async fn select(&self, query: &Select) -> AppResult<Vec<Value>> {
        debug!(table = %query.table, "select");
        let response = self
            .request(Method::GET, query.table)
            .query(&select_params(query))
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn insert(&self, table: Table, rows: Vec<Value>) -> AppResult<Vec<Value>> {
        debug!(%table, count = rows.len(), "insert");
        let response = self
            .request(Method::POST, table)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&rows)
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn update(
        &self,
        table: Table,
        patch: Value,
        filters: &[Filter],
    ) -> AppResult<Vec<Value>> {
        debug!(%table, "update");
        let response = self
            .request(Method::PATCH, table)
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&filter_params(filters))
            .json(&patch)
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn delete(&self, table: Table, filters: &[Filter]) -> AppResult<usize> {
        debug!(%table, "delete");
        let response = self
            .request(Method::DELETE, table)
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&filter_params(filters))
            .send()
            .await?;
        Ok(Self::rows(response).await?.len())
    }
}
