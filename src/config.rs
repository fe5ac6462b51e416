// src/config.rs

use std::path::{Path, PathBuf};

/// Archived copy of the Wikipedia "List of countries by GDP (nominal)" page.
pub const DEFAULT_URL: &str = "https://web.archive.org/web/20230902185326/https://en.wikipedia.org/wiki/List_of_countries_by_GDP_%28nominal%29";

pub const DEFAULT_DB_PATH: &str = "World_Economies.db";
pub const DEFAULT_TABLE_NAME: &str = "Countries_by_GDP";
pub const DEFAULT_CSV_PATH: &str = "Countries_by_GDP.csv";
pub const DEFAULT_LOG_PATH: &str = "log.txt";

/// Labels of the two columns carried through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumns {
    pub country: String,
    pub gdp: String,
}

impl TableColumns {
    pub fn new(country: impl Into<String>, gdp: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            gdp: gdp.into(),
        }
    }

    /// Same country label, different GDP label.
    pub fn with_gdp(&self, gdp: impl Into<String>) -> Self {
        Self::new(self.country.clone(), gdp)
    }
}

/// Everything a run needs, built once at process entry and handed to each stage.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub url: String,
    /// Column labels of the extracted (millions) table.
    pub extract_columns: TableColumns,
    /// Label the GDP column gets after conversion to billions.
    pub billions_column: String,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
    pub table_name: String,
    pub log_path: PathBuf,
    /// Lower bound (inclusive, in billions) of the filter query.
    pub query_threshold: u32,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            extract_columns: TableColumns::new("Country", "GDP_USD_millions"),
            billions_column: "GDP_USD_billions".to_string(),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            query_threshold: 100,
        }
    }
}

impl EtlConfig {
    /// Default configuration with the CSV, database and log file placed under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            csv_path: dir.join(DEFAULT_CSV_PATH),
            db_path: dir.join(DEFAULT_DB_PATH),
            log_path: dir.join(DEFAULT_LOG_PATH),
            ..Self::default()
        }
    }

    /// Column labels of the transformed (billions) table.
    pub fn transformed_columns(&self) -> TableColumns {
        self.extract_columns.with_gdp(&self.billions_column)
    }
}
