// src/transform/mod.rs

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::table::{ExtractedTable, GdpRow, GdpTable};

/// Convert every GDP string from millions to billions and relabel the column.
///
/// One output row per input row, same order.
#[tracing::instrument(level = "info", skip(table), fields(rows = table.len()))]
pub fn to_billions(table: &ExtractedTable, billions_column: &str) -> Result<GdpTable> {
    let rows = table
        .rows
        .iter()
        .map(|raw| {
            let millions = parse_millions(&raw.gdp_usd_millions).with_context(|| {
                format!(
                    "converting GDP {:?} for {}",
                    raw.gdp_usd_millions, raw.country
                )
            })?;
            if !millions.is_finite() || millions < 0.0 {
                warn!(country = %raw.country, value = millions, "implausible GDP value");
            }
            Ok(GdpRow {
                country: raw.country.clone(),
                gdp_usd_billions: round2(millions / 1000.0),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(rows = rows.len(), "rows converted");
    Ok(GdpTable {
        columns: table.columns.with_gdp(billions_column),
        rows,
    })
}

/// `"23,315,081"` → `23315081.0`
pub fn parse_millions(s: &str) -> Result<f64> {
    let digits: String = s.chars().filter(|&c| c != ',').collect();
    digits
        .trim()
        .parse::<f64>()
        .with_context(|| format!("not a number: {:?}", s))
}

/// Round to two decimal places using the exact binary value of `v`.
///
/// `0.015` is stored just below the tie, so it rounds down to `0.01`.
pub fn round2(v: f64) -> f64 {
    format!("{:.2}", v).parse().unwrap_or(v)
}
