// src/extract/mod.rs

use anyhow::{anyhow, bail, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use crate::config::TableColumns;
use crate::table::{ExtractedTable, RawRow};

/// Zero-based position of the GDP table among all `<tbody>` elements of the page.
pub const TABLE_INDEX: usize = 2;

/// Cell text used by the source for "no estimate".
pub const PLACEHOLDER: &str = "—";

/// Pull `(country, GDP in millions)` pairs out of the third `<tbody>` of `html`.
///
/// Rows without `<td>` cells are headers or separators and are skipped. A data
/// row is kept only if its first cell holds a link (the country name) and its
/// third cell is not the placeholder dash. Everything else is dropped quietly.
#[tracing::instrument(level = "info", skip(html), fields(bytes = html.len()))]
pub fn extract_gdp_table(html: &str, columns: &TableColumns) -> Result<ExtractedTable> {
    let document = Html::parse_document(html);
    let tbody_sel = Selector::parse("tbody").expect("tbody selector should parse");
    let tr_sel = Selector::parse("tr").expect("tr selector should parse");
    let td_sel = Selector::parse("td").expect("td selector should parse");
    let a_sel = Selector::parse("a").expect("a selector should parse");

    let bodies: Vec<ElementRef> = document.select(&tbody_sel).collect();
    let body = match bodies.get(TABLE_INDEX) {
        Some(b) => *b,
        None => bail!(
            "expected at least {} <tbody> elements, found {}",
            TABLE_INDEX + 1,
            bodies.len()
        ),
    };

    let mut table = ExtractedTable::new(columns.clone());
    for (idx, row) in body.select(&tr_sel).enumerate() {
        let cells: Vec<ElementRef> = row.select(&td_sel).collect();
        if cells.is_empty() {
            trace!(row = idx, "no data cells");
            continue;
        }

        let Some(link) = cells[0].select(&a_sel).next() else {
            trace!(row = idx, "no country link");
            continue;
        };

        let gdp_cell = cells
            .get(2)
            .ok_or_else(|| anyhow!("row {} has {} cells, expected at least 3", idx, cells.len()))?;
        let gdp = cell_text(*gdp_cell);
        if gdp == PLACEHOLDER {
            trace!(row = idx, "placeholder GDP");
            continue;
        }

        table.rows.push(RawRow {
            country: cell_text(link),
            gdp_usd_millions: gdp,
        });
    }

    debug!(rows = table.len(), "rows extracted");
    Ok(table)
}

/// All text below `el`, with surrounding whitespace removed.
fn cell_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
