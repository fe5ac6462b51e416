// src/pipeline.rs

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    config::EtlConfig,
    extract::extract_gdp_table,
    fetch::PageSource,
    load::{load_table, open_database, write_csv},
    progress::{ProgressSink, Stage},
    query::{gdp_filter_statement, print_query_result, run_query, QueryResult},
    table::GdpTable,
    transform::to_billions,
};

/// What a finished run produced, for callers that want more than the files on disk.
#[derive(Debug)]
pub struct RunSummary {
    pub extracted_rows: usize,
    pub transformed: GdpTable,
    pub query: String,
    pub result: QueryResult,
}

/// Drives one extract → transform → load → query run.
///
/// Stages run strictly in order. The first error ends the run; files already
/// written by earlier stages are left as they are.
pub struct Pipeline<'a, S, P> {
    config: &'a EtlConfig,
    source: S,
    progress: P,
}

impl<'a, S: PageSource, P: ProgressSink> Pipeline<'a, S, P> {
    pub fn new(config: &'a EtlConfig, source: S, progress: P) -> Self {
        Self {
            config,
            source,
            progress,
        }
    }

    pub fn run(&self) -> Result<RunSummary> {
        let cfg = self.config;
        self.progress.stage_complete(Stage::Preliminaries)?;

        // ─── extract ─────────────────────────────────────────────────
        let html = self.source.fetch().context("fetching source page")?;
        let extracted = extract_gdp_table(&html, &cfg.extract_columns)?;
        self.progress.stage_complete(Stage::Extract)?;

        // ─── transform ───────────────────────────────────────────────
        let transformed = to_billions(&extracted, &cfg.billions_column)?;
        println!("Transformed Data");
        transformed.to_pretty().printstd();
        self.progress.stage_complete(Stage::Transform)?;

        // ─── load ────────────────────────────────────────────────────
        write_csv(&transformed, &cfg.csv_path)?;
        self.progress.stage_complete(Stage::LoadCsv)?;

        let conn = open_database(&cfg.db_path)?;
        self.progress.stage_complete(Stage::Connect)?;

        load_table(&conn, &transformed, &cfg.table_name)?;
        self.progress.stage_complete(Stage::LoadDb)?;

        // ─── query ───────────────────────────────────────────────────
        let query = gdp_filter_statement(
            &cfg.table_name,
            &cfg.billions_column,
            cfg.query_threshold,
        );
        let result = run_query(&conn, &query)?;
        print_query_result(&query, &result);
        self.progress.stage_complete(Stage::Query)?;

        conn.close()
            .map_err(|(_, e)| e)
            .with_context(|| format!("closing database {:?}", cfg.db_path))?;
        self.progress.stage_complete(Stage::Close)?;

        info!(
            extracted = extracted.len(),
            matched = result.len(),
            "run complete"
        );
        Ok(RunSummary {
            extracted_rows: extracted.len(),
            transformed,
            query,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticSource;
    use crate::load::read_csv;
    use crate::progress::FileProgressLog;
    use anyhow::Result;
    use duckdb::types::Value;
    use std::{cell::RefCell, fs};
    use tempfile::tempdir;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl ProgressSink for &Recorder {
        fn log_progress(&self, message: &str) -> Result<()> {
            self.0.borrow_mut().push(message.to_string());
            Ok(())
        }
    }

    const PAGE: &str = r#"<html><body>
<table><tbody><tr><td>nav</td></tr></tbody></table>
<table><tbody><tr><td>nav</td></tr></tbody></table>
<table class="wikitable sortable"><tbody>
<tr><th>Country/Territory</th><th>UN region</th><th>IMF estimate</th><th>Year</th></tr>
<tr><td><a href="/wiki/World">World</a></td><td>—</td><td>105,568,776</td><td>2023</td></tr>
<tr><td><a href="/wiki/United_States">United States</a></td><td>Americas</td><td>26,854,599</td><td>2023</td></tr>
<tr><td>European Union</td><td>Europe</td><td>17,818,000</td><td>2023</td></tr>
<tr><td><a href="/wiki/Ghana">Ghana</a></td><td>Africa</td><td>76,628</td><td>2023</td></tr>
<tr><td><a href="/wiki/Afghanistan">Afghanistan</a></td><td>Asia</td><td>—</td><td>—</td></tr>
<tr><td><a href="/wiki/Qatar">Qatar</a></td><td>Asia</td><td>235,500</td><td>2023</td></tr>
</tbody></table>
</body></html>"#;

    #[test]
    fn announces_every_stage_in_order() -> Result<()> {
        let dir = tempdir()?;
        let cfg = EtlConfig::in_dir(dir.path());
        let recorder = Recorder::default();

        Pipeline::new(&cfg, StaticSource(PAGE.into()), &recorder).run()?;

        let expected: Vec<String> = Stage::ALL.iter().map(|s| s.message().to_string()).collect();
        assert_eq!(*recorder.0.borrow(), expected);
        Ok(())
    }

    #[test]
    fn end_to_end_writes_csv_db_and_log() -> Result<()> {
        let dir = tempdir()?;
        let cfg = EtlConfig::in_dir(dir.path());

        let summary = Pipeline::new(
            &cfg,
            StaticSource(PAGE.into()),
            FileProgressLog::new(&cfg.log_path),
        )
        .run()?;

        // World, United States, Ghana, Qatar
        assert_eq!(summary.extracted_rows, 4);
        let billions: Vec<f64> = summary
            .transformed
            .rows
            .iter()
            .map(|r| r.gdp_usd_billions)
            .collect();
        assert_eq!(billions, vec![105568.78, 26854.6, 76.63, 235.5]);

        assert_eq!(read_csv(&cfg.csv_path)?, summary.transformed);
        let header = fs::read_to_string(&cfg.csv_path)?;
        assert!(header.starts_with("Country,GDP_USD_billions\n"));

        assert_eq!(
            summary.query,
            "select * from Countries_by_GDP where GDP_USD_billions >= 100"
        );
        let countries: Vec<&Value> = summary.result.rows.iter().map(|r| &r[0]).collect();
        assert_eq!(
            countries,
            vec![
                &Value::Text("World".into()),
                &Value::Text("United States".into()),
                &Value::Text("Qatar".into()),
            ]
        );

        let log = fs::read_to_string(&cfg.log_path)?;
        assert_eq!(log.lines().count(), Stage::ALL.len());
        assert!(log.lines().last().unwrap().ends_with(": Server Connection closed"));
        Ok(())
    }

    #[test]
    fn rerun_replaces_outputs_and_appends_log() -> Result<()> {
        let dir = tempdir()?;
        let cfg = EtlConfig::in_dir(dir.path());

        for _ in 0..2 {
            Pipeline::new(
                &cfg,
                StaticSource(PAGE.into()),
                FileProgressLog::new(&cfg.log_path),
            )
            .run()?;
        }

        assert_eq!(read_csv(&cfg.csv_path)?.len(), 4);
        let conn = open_database(&cfg.db_path)?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM Countries_by_GDP", [], |r| r.get(0))?;
        assert_eq!(count, 4);

        let log = fs::read_to_string(&cfg.log_path)?;
        assert_eq!(log.lines().count(), 2 * Stage::ALL.len());
        Ok(())
    }

    #[test]
    fn bad_number_stops_before_any_output() -> Result<()> {
        let dir = tempdir()?;
        let cfg = EtlConfig::in_dir(dir.path());
        let page = PAGE.replace("76,628", "76.6k");
        let recorder = Recorder::default();

        let err = Pipeline::new(&cfg, StaticSource(page), &recorder)
            .run()
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Ghana"));
        assert_eq!(recorder.0.borrow().len(), 2);
        assert!(!cfg.csv_path.exists());
        assert!(!cfg.db_path.exists());
        Ok(())
    }
}
