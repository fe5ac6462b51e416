// src/table.rs

use prettytable::{format, Cell, Row, Table};
use serde::{Deserialize, Serialize};

use crate::config::TableColumns;

/// One row as scraped: the GDP figure is still the raw cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub country: String,
    pub gdp_usd_millions: String,
}

/// One row after unit conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdpRow {
    pub country: String,
    pub gdp_usd_billions: f64,
}

/// Rows in source document order, plus the labels of their two columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    pub columns: TableColumns,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GdpTable {
    pub columns: TableColumns,
    pub rows: Vec<GdpRow>,
}

impl ExtractedTable {
    pub fn new(columns: TableColumns) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl GdpTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Box-drawn console rendering, index column first.
    pub fn to_pretty(&self) -> Table {
        let rows = self.rows.iter().map(|r| {
            vec![
                Cell::new(&r.country),
                Cell::new(&r.gdp_usd_billions.to_string()).style_spec("r"),
            ]
        });
        pretty_table(&[&self.columns.country, &self.columns.gdp], rows)
    }
}

/// Build a console table with a bold header and a leading row-number column.
pub fn pretty_table<I>(headers: &[&str], rows: I) -> Table
where
    I: IntoIterator<Item = Vec<Cell>>,
{
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    let mut header = vec![Cell::new("").style_spec("b")];
    header.extend(headers.iter().map(|h| Cell::new(h).style_spec("b")));
    table.set_titles(Row::new(header));

    for (idx, cells) in rows.into_iter().enumerate() {
        let mut row = vec![Cell::new(&idx.to_string()).style_spec("r")];
        row.extend(cells);
        table.add_row(Row::new(row));
    }
    table
}
