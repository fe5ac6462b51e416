// src/query/mod.rs

use anyhow::{Context, Result};
use duckdb::{types::Value, Connection};
use prettytable::{Cell, Table};
use tracing::{debug, info};

use crate::table::pretty_table;

/// Fully materialized result of one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_pretty(&self) -> Table {
        let headers: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let rows = self.rows.iter().map(|row| {
            row.iter()
                .map(|v| match v {
                    Value::Text(s) => Cell::new(s),
                    other => Cell::new(&render_value(other)).style_spec("r"),
                })
                .collect()
        });
        pretty_table(&headers, rows)
    }
}

/// `select * from <table> where <column> >= <threshold>`
pub fn gdp_filter_statement(table_name: &str, column: &str, threshold: u32) -> String {
    format!("select * from {table_name} where {column} >= {threshold}")
}

/// Run `sql` and collect every row, keeping the statement's column order.
#[tracing::instrument(level = "info", skip(conn))]
pub fn run_query(conn: &Connection, sql: &str) -> Result<QueryResult> {
    let mut stmt = conn
        .prepare(sql)
        .with_context(|| format!("preparing query {:?}", sql))?;
    let mut rows = stmt
        .query([])
        .with_context(|| format!("executing query {:?}", sql))?;

    let columns = rows
        .as_ref()
        .map(|s| s.column_names())
        .unwrap_or_default();
    debug!(?columns, "query columns");

    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let values = (0..columns.len())
            .map(|i| row.get::<_, Value>(i))
            .collect::<duckdb::Result<Vec<_>>>()?;
        out.push(values);
    }

    info!(rows = out.len(), "query finished");
    Ok(QueryResult { columns, rows: out })
}

/// Print the statement, then its result table.
pub fn print_query_result(sql: &str, result: &QueryResult) {
    println!("\n{}\n", sql);
    result.to_pretty().printstd();
}

fn render_value(v: &Value) -> String {
    match v {
        Value::Null => "NULL".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::TinyInt(i) => i.to_string(),
        Value::SmallInt(i) => i.to_string(),
        Value::Int(i) => i.to_string(),
        Value::BigInt(i) => i.to_string(),
        Value::HugeInt(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Double(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        other => format!("{:?}", other),
    }
}
