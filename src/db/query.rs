//! Backend-neutral description of table operations.
//!
//! Both the REST client and the SQLite store consume these types, so the
//! typed queries in [`crate::db::queries`] never know which one is active.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Projects,
    Tasks,
    Technicians,
    Locations,
    ProjectTechnicians,
    TaskTechnicians,
    ControlledZones,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Projects => "projects",
            Table::Tasks => "tasks",
            Table::Technicians => "technicians",
            Table::Locations => "locations",
            Table::ProjectTechnicians => "project_technicians",
            Table::TaskTechnicians => "task_technicians",
            Table::ControlledZones => "controlled_zones",
        }
    }

    /// Columns a caller may read, write or filter on.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Projects => &["id", "name", "duration", "start_date", "end_date"],
            Table::Tasks => &[
                "id",
                "name",
                "duration",
                "start_date",
                "end_date",
                "project_id",
                "state",
                "note",
            ],
            Table::Technicians => &["id", "name"],
            Table::Locations => &["id", "latitude", "longitude", "recorded_at", "technician_id"],
            Table::ProjectTechnicians => &["project_id", "technician_id"],
            Table::TaskTechnicians => &["task_id", "technician_id"],
            Table::ControlledZones => &["id", "name", "lat", "lon", "tolerance"],
        }
    }

    /// Join tables have a composite key and no `id`.
    pub fn primary_key(&self) -> Option<&'static str> {
        match self {
            Table::ProjectTechnicians | Table::TaskTechnicians => None,
            _ => Some("id"),
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns().contains(&column)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `column = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    /// Right-hand side as it appears in a query string (`eq.42`, `eq.pending`).
    pub fn to_param(&self) -> String {
        format!("eq.{}", literal(&self.value))
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub direction: Direction,
}

/// A to-one related row pulled in alongside each result row.
/// `via` is the foreign-key column on the base table; the target row is
/// matched on its primary key and appears under the target table's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub table: Table,
    pub via: &'static str,
    pub columns: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: Table,
    pub columns: Vec<&'static str>,
    pub embeds: Vec<Embed>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl Select {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            columns: Vec::new(),
            embeds: Vec::new(),
            filters: Vec::new(),
            order: None,
        }
    }

    pub fn columns(mut self, columns: &[&'static str]) -> Self {
        self.columns = columns.to_vec();
        self
    }

    pub fn embed(mut self, table: Table, via: &'static str, columns: &[&'static str]) -> Self {
        self.embeds.push(Embed {
            table,
            via,
            columns: columns.to_vec(),
        });
        self
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn order_by(mut self, column: &'static str, direction: Direction) -> Self {
        self.order = Some(Order { column, direction });
        self
    }

    /// PostgREST `select=` value: `*` or `id,name,technicians(name)`.
    pub fn select_param(&self) -> String {
        let mut parts: Vec<String> = if self.columns.is_empty() {
            vec!["*".to_string()]
        } else {
            self.columns.iter().map(|c| c.to_string()).collect()
        };

        for e in &self.embeds {
            let cols = if e.columns.is_empty() {
                "*".to_string()
            } else {
                e.columns.join(",")
            };
            parts.push(format!("{}({})", e.table.name(), cols));
        }

        parts.join(",")
    }
}
