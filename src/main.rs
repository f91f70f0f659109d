use anyhow::Result;
use clap::Parser;
use pydocscraper::{
    cli::{Cli, Mode},
    extract::{self, MAIN_DOC_URL, PEP_DOC_URL},
    fetch, output,
};
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

const LOGS_DIR: &str = "logs";
const CACHE_DIR: &str = "http-cache";
const DOWNLOADS_DIR: &str = "downloads";
const RESULTS_DIR: &str = "results";

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging: stderr + rotating file ─────────────────────
    fs::create_dir_all(LOGS_DIR)?;
    let file_appender = tracing_appender::rolling::daily(LOGS_DIR, "scraper.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    let cli = Cli::parse();
    info!(args = ?cli, "scraper started");

    // ─── 2) cache-aware HTTP session ─────────────────────────────────
    let cache_dir = Path::new(CACHE_DIR);
    if cli.clear_cache {
        fetch::clear_cache(cache_dir).await?;
        info!("HTTP cache cleared");
    }
    let client = fetch::cached_client(cache_dir);

    // ─── 3) run the selected mode ────────────────────────────────────
    let report = match cli.mode {
        Mode::WhatsNew => {
            extract::whats_new::scrape(&client, &Url::parse(MAIN_DOC_URL)?).await?
        }
        Mode::LatestVersions => {
            extract::latest_versions::scrape(&client, &Url::parse(MAIN_DOC_URL)?).await?
        }
        Mode::Download => {
            extract::download::scrape(
                &client,
                &Url::parse(MAIN_DOC_URL)?,
                Path::new(DOWNLOADS_DIR),
            )
            .await?
        }
        Mode::Pep => extract::pep::scrape(&client, &Url::parse(PEP_DOC_URL)?).await?,
    };

    // ─── 4) render ───────────────────────────────────────────────────
    if let Some(report) = report {
        output::render(&report, &cli, Path::new(RESULTS_DIR))?;
    }

    info!("scraper finished");
    Ok(())
}
