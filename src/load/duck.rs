// src/load/duck.rs

use anyhow::{Context, Result};
use duckdb::{params, Connection};
use std::path::Path;
use tracing::info;

use crate::table::GdpTable;

/// Open a DuckDB database on disk at `path`, creating the file if it doesn't exist.
pub fn open_database<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    Connection::open(path).with_context(|| format!("opening database {:?}", path))
}

/// Double-quote an identifier for use in generated SQL.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Write `table` into `table_name`, dropping whatever was there before.
///
/// Columns are `(<country> VARCHAR, <gdp> DOUBLE)` in that order; rows are appended
/// in table order with no index column.
#[tracing::instrument(level = "info", skip(conn, table), fields(rows = table.len()))]
pub fn load_table(conn: &Connection, table: &GdpTable, table_name: &str) -> Result<()> {
    let ddl = format!(
        "CREATE OR REPLACE TABLE {} ({} VARCHAR, {} DOUBLE);",
        quote_ident(table_name),
        quote_ident(&table.columns.country),
        quote_ident(&table.columns.gdp),
    );
    conn.execute_batch(&ddl)
        .with_context(|| format!("replacing table {}", table_name))?;

    let mut appender = conn
        .appender(table_name)
        .with_context(|| format!("creating appender for {}", table_name))?;
    for row in &table.rows {
        appender
            .append_row(params![row.country, row.gdp_usd_billions])
            .with_context(|| format!("appending {} to {}", row.country, table_name))?;
    }
    appender
        .flush()
        .with_context(|| format!("flushing appender for {}", table_name))?;

    info!(table = table_name, "table loaded");
    Ok(())
}
