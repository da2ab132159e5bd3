//! SQLite-backed store (lightweight for CLI usage).
//!
//! Mirrors the remote table layout so the dashboard runs against a local
//! file. Rows are converted to and from JSON objects at this boundary.

use crate::db::DataStore;
use crate::db::query::{Embed, Filter, Select, Table};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Connection, Row, params_from_iter};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

pub struct DbPool {
    conn: Mutex<Connection>,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> AppResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Helper to execute a closure with the connection locked.
    pub fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| AppError::Other("SQLite connection lock poisoned".into()))?;
        func(&conn)
    }
}

#[async_trait]
impl DataStore for DbPool {
    async fn select(&self, query: &Select) -> AppResult<Vec<Value>> {
        self.with_conn(|conn| select_rows(conn, query))
    }

    async fn insert(&self, table: Table, rows: Vec<Value>) -> AppResult<Vec<Value>> {
        self.with_conn(move |conn| insert_rows(conn, table, rows))
    }

    async fn update(
        &self,
        table: Table,
        patch: Value,
        filters: &[Filter],
    ) -> AppResult<Vec<Value>> {
        self.with_conn(move |conn| update_rows(conn, table, patch, filters))
    }

    async fn delete(&self, table: Table, filters: &[Filter]) -> AppResult<usize> {
        self.with_conn(|conn| delete_rows(conn, table, filters))
    }
}

fn check_column(table: Table, column: &str) -> AppResult<()> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(AppError::UnknownColumn {
            table: table.name().to_string(),
            column: column.to_string(),
        })
    }
}

/// ` WHERE a = ?n AND b = ?n+1`, numbering placeholders after `offset`.
fn where_clause(
    table: Table,
    filters: &[Filter],
    offset: usize,
) -> AppResult<(String, Vec<SqlValue>)> {
    if filters.is_empty() {
        return Ok((String::new(), Vec::new()));
    }

    let mut parts = Vec::with_capacity(filters.len());
    let mut params = Vec::with_capacity(filters.len());
    for (i, f) in filters.iter().enumerate() {
        check_column(table, f.column)?;
        parts.push(format!("{} = ?{}", f.column, offset + i + 1));
        params.push(to_sql(&f.value));
    }

    Ok((format!(" WHERE {}", parts.join(" AND ")), params))
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn row_to_json(row: &Row, names: &[String]) -> rusqlite::Result<Value> {
    let mut map = Map::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        let value = match row.get_ref(i)? {
            ValueRef::Null | ValueRef::Blob(_) => Value::Null,
            ValueRef::Integer(n) => Value::from(n),
            ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        };
        map.insert(name.clone(), value);
    }
    Ok(Value::Object(map))
}

fn query_rows(conn: &Connection, sql: &str, params: Vec<SqlValue>) -> AppResult<Vec<Value>> {
    let mut stmt = conn.prepare(sql)?;
    let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

    let rows = stmt.query_map(params_from_iter(params), |row| row_to_json(row, &names))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Keep only `columns` (plus `keep`) of a row; an empty list keeps everything.
fn project(row: Value, columns: &[&str], keep: &[&str]) -> Value {
    if columns.is_empty() {
        return row;
    }
    match row {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(k, _)| columns.contains(&k.as_str()) || keep.contains(&k.as_str()))
                .collect(),
        ),
        other => other,
    }
}

fn select_rows(conn: &Connection, q: &Select) -> AppResult<Vec<Value>> {
    for c in &q.columns {
        check_column(q.table, c)?;
    }

    let (where_sql, params) = where_clause(q.table, &q.filters, 0)?;
    let mut sql = format!("SELECT * FROM {}{}", q.table, where_sql);

    if let Some(order) = &q.order {
        check_column(q.table, order.column)?;
        sql.push_str(&format!(
            " ORDER BY {} {}, rowid ASC",
            order.column,
            order.direction.as_str().to_uppercase()
        ));
    }

    let mut rows = query_rows(conn, &sql, params)?;

    // Foreign keys must still be present while embedding; project afterwards.
    for embed in &q.embeds {
        attach_embed(conn, q.table, &mut rows, embed)?;
    }

    let embedded: Vec<&str> = q.embeds.iter().map(|e| e.table.name()).collect();
    Ok(rows
        .into_iter()
        .map(|r| project(r, &q.columns, &embedded))
        .collect())
}

fn attach_embed(conn: &Connection, base: Table, rows: &mut [Value], embed: &Embed) -> AppResult<()> {
    check_column(base, embed.via)?;
    for c in &embed.columns {
        check_column(embed.table, c)?;
    }
    let key = embed.table.primary_key().ok_or_else(|| {
        AppError::Other(format!("cannot embed join table {}", embed.table))
    })?;

    let sql = format!("SELECT * FROM {} WHERE {} = ?1", embed.table, key);
    let mut cache: HashMap<i64, Value> = HashMap::new();

    for row in rows.iter_mut() {
        let Some(obj) = row.as_object_mut() else {
            continue;
        };

        let related = match obj.get(embed.via).and_then(Value::as_i64) {
            Some(fk) => match cache.get(&fk) {
                Some(hit) => hit.clone(),
                None => {
                    let found = query_rows(conn, &sql, vec![SqlValue::Integer(fk)])?
                        .into_iter()
                        .next()
                        .map_or(Value::Null, |r| project(r, &embed.columns, &[]));
                    cache.insert(fk, found.clone());
                    found
                }
            },
            None => Value::Null,
        };

        obj.insert(embed.table.name().to_string(), related);
    }

    Ok(())
}

fn insert_rows(conn: &Connection, table: Table, rows: Vec<Value>) -> AppResult<Vec<Value>> {
    let tx = conn.unchecked_transaction()?;
    let mut out = Vec::with_capacity(rows.len());

    for row in &rows {
        let obj = row
            .as_object()
            .ok_or_else(|| AppError::Other(format!("insert into {table} expects JSON objects")))?;

        let mut cols = Vec::with_capacity(obj.len());
        let mut params = Vec::with_capacity(obj.len());
        for (k, v) in obj {
            check_column(table, k)?;
            cols.push(k.as_str());
            params.push(to_sql(v));
        }

        let sql = if cols.is_empty() {
            format!("INSERT INTO {table} DEFAULT VALUES RETURNING *")
        } else {
            let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("?{i}")).collect();
            format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
                table,
                cols.join(", "),
                placeholders.join(", ")
            )
        };

        out.extend(query_rows(&tx, &sql, params)?);
    }

    tx.commit()?;
    Ok(out)
}

fn update_rows(
    conn: &Connection,
    table: Table,
    patch: Value,
    filters: &[Filter],
) -> AppResult<Vec<Value>> {
    if filters.is_empty() {
        return Err(AppError::Other(format!(
            "refusing to update {table} without a filter"
        )));
    }

    let obj = patch
        .as_object()
        .filter(|o| !o.is_empty())
        .ok_or_else(|| AppError::Other(format!("update of {table} needs a non-empty object")))?;

    let mut sets = Vec::with_capacity(obj.len());
    let mut params = Vec::with_capacity(obj.len() + filters.len());
    for (i, (k, v)) in obj.iter().enumerate() {
        check_column(table, k)?;
        sets.push(format!("{} = ?{}", k, i + 1));
        params.push(to_sql(v));
    }

    let (where_sql, where_params) = where_clause(table, filters, params.len())?;
    params.extend(where_params);

    let sql = format!(
        "UPDATE {} SET {}{} RETURNING *",
        table,
        sets.join(", "),
        where_sql
    );
    query_rows(conn, &sql, params)
}

fn delete_rows(conn: &Connection, table: Table, filters: &[Filter]) -> AppResult<usize> {
    if filters.is_empty() {
        return Err(AppError::Other(format!(
            "refusing to delete from {table} without a filter"
        )));
    }

    let (where_sql, params) = where_clause(table, filters, 0)?;
    let sql = format!("DELETE FROM {table}{where_sql}");
    Ok(conn.execute(&sql, params_from_iter(params))?)
}
