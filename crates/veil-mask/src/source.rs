//! The data-source collaborator the scanner samples from.
//!
//! Real deployments back this with a database driver; [`MemorySource`] holds
//! tables in memory (and loads them from JSON) for the CLI and tests.

use std::fmt;

use anyhow::anyhow;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::Row;

/// A table or view, optionally schema-qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    /// An unqualified table reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// A schema-qualified table reference.
    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// Parse `table` or `schema.table`.
    pub fn parse(qualified: &str) -> Self {
        match qualified.split_once('.') {
            Some((schema, name)) => Self::with_schema(schema, name),
            None => Self::new(qualified),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Read access to table/view metadata and rows.
///
/// Implementations own their retry and timeout policy; callers make one
/// synchronous call and propagate the error as is.
pub trait DataSource {
    /// Column names of a table/view, in catalog order.
    fn columns(&self, table: &TableRef) -> anyhow::Result<Vec<String>>;

    /// Up to `limit` rows starting at `offset`, restricted to `columns`.
    fn fetch(
        &self,
        table: &TableRef,
        columns: &[String],
        offset: usize,
        limit: usize,
    ) -> anyhow::Result<Vec<Row>>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn columns(&self, table: &TableRef) -> anyhow::Result<Vec<String>> {
        (**self).columns(table)
    }

    fn fetch(
        &self,
        table: &TableRef,
        columns: &[String],
        offset: usize,
        limit: usize,
    ) -> anyhow::Result<Vec<Row>> {
        (**self).fetch(table, columns, offset, limit)
    }
}

/// One in-memory table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryTable {
    /// Catalog column order. When empty, columns are taken from the rows in
    /// first-seen order.
    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default)]
    pub rows: Vec<Row>,
}

impl MemoryTable {
    fn column_names(&self) -> Vec<String> {
        if !self.columns.is_empty() {
            return self.columns.clone();
        }
        let mut names: Vec<String> = Vec::new();
        for row in &self.rows {
            for name in row.keys() {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }
}

/// Tables held in memory, keyed by `table` or `schema.table`.
///
/// Deserializes from a JSON object of that shape:
///
/// ```json
/// { "public.users": { "columns": ["id", "email"], "rows": [{ "id": 1, "email": "a@b.io" }] } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemorySource {
    tables: IndexMap<String, MemoryTable>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table.
    pub fn insert(&mut self, table: &TableRef, columns: Vec<String>, rows: Vec<Row>) {
        self.tables
            .insert(table.to_string(), MemoryTable { columns, rows });
    }

    /// Parse tables from JSON text.
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn tables(&self) -> impl Iterator<Item = TableRef> + '_ {
        self.tables.keys().map(|key| TableRef::parse(key))
    }

    fn table(&self, table: &TableRef) -> anyhow::Result<&MemoryTable> {
        self.tables
            .get(&table.to_string())
            .ok_or_else(|| anyhow!("table or view '{}' does not exist", table))
    }
}

impl DataSource for MemorySource {
    fn columns(&self, table: &TableRef) -> anyhow::Result<Vec<String>> {
        Ok(self.table(table)?.column_names())
    }

    fn fetch(
        &self,
        table: &TableRef,
        columns: &[String],
        offset: usize,
        limit: usize,
    ) -> anyhow::Result<Vec<Row>> {
        let table = self.table(table)?;
        let rows: Vec<Row> = table
            .rows
            .iter()
            .skip(offset)
            .take(limit)
            .map(|row| {
                columns
                    .iter()
                    .map(|column| {
                        let value = row.get(column).cloned().unwrap_or(Value::Null);
                        (column.clone(), value)
                    })
                    .collect::<Row>()
            })
            .collect();
        Ok(rows)
    }
}
