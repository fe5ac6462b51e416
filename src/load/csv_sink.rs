// src/load/csv_sink.rs

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;
use tracing::info;

use crate::config::TableColumns;
use crate::table::{GdpRow, GdpTable};

/// Write `table` to `path` as comma-separated text: header row, then one line per row.
///
/// The file is truncated first. There is no index column.
#[tracing::instrument(level = "info", skip(table, path), fields(path = %path.as_ref().display()))]
pub fn write_csv<P: AsRef<Path>>(table: &GdpTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating CSV file {:?}", path))?;

    wtr.write_record([&table.columns.country, &table.columns.gdp])
        .context("writing CSV header")?;
    for row in &table.rows {
        wtr.serialize(row)
            .with_context(|| format!("writing CSV row for {}", row.country))?;
    }
    wtr.flush()
        .with_context(|| format!("flushing CSV file {:?}", path))?;

    info!(rows = table.len(), "CSV written");
    Ok(())
}

/// Read a file produced by [`write_csv`] back into memory.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<GdpTable> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening CSV file {:?}", path))?;

    let headers = rdr.headers().context("reading CSV header")?.clone();
    if headers.len() != 2 {
        bail!(
            "expected 2 CSV columns in {:?}, found {}",
            path,
            headers.len()
        );
    }
    let columns = TableColumns::new(&headers[0], &headers[1]);

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        let row: GdpRow = record
            .deserialize(None)
            .with_context(|| format!("decoding CSV record {}", idx))?;
        rows.push(row);
    }

    Ok(GdpTable { columns, rows })
}
