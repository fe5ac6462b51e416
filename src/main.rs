use anyhow::Result;
use gdpscraper::{
    config::EtlConfig, fetch::HttpSource, pipeline::Pipeline, progress::FileProgressLog,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // stderr only; stdout carries the printed tables
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let config = EtlConfig::default();
    let source = HttpSource::new(&config.url)?;
    let progress = FileProgressLog::new(&config.log_path);

    // ─── 3) run ──────────────────────────────────────────────────────
    let summary = Pipeline::new(&config, source, progress).run()?;
    info!(
        rows = summary.transformed.len(),
        matched = summary.result.len(),
        "all done"
    );
    Ok(())
}
