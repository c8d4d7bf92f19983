use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use page_sync::{
    config::{SyncConfig, apply_env_overrides, default_config, load_config_path},
    sink::HtmlPageSink,
    sync::{run_sync, summary_lines},
    tz::{parse_tz, today},
    window::FetchWindows,
};
use spot_price_ingestor::providers::smm_rest::SmmProvider;
use tracing_subscriber::EnvFilter;

/// Fetch SMM spot prices and rewrite the price block of an HTML page.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// TOML config; the built-in defaults are used when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Page to update (overrides SMM_PAGE_PATH and the config)
    #[arg(long, value_name = "FILE")]
    page: Option<PathBuf>,

    /// Run date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Fetch and render, but do not write the page
    #[arg(long)]
    dry_run: bool,

    /// Fail when the page has no data block
    #[arg(long)]
    require_block: bool,
}

fn load(cli: &Cli) -> anyhow::Result<SyncConfig> {
    let mut cfg = match &cli.config {
        Some(path) => load_config_path(path)?,
        None => default_config()?,
    };
    apply_env_overrides(&mut cfg);
    if let Some(page) = &cli.page {
        cfg.page.path = page.display().to_string();
    }
    if cli.require_block {
        cfg.page.require_block = true;
    }
    Ok(cfg)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = load(&cli)?;

    let run_date = match cli.date {
        Some(d) => d,
        None => {
            let tz = cfg.timezone.as_deref().map(parse_tz).transpose()?;
            today(tz)
        }
    };
    let windows = FetchWindows::new(run_date, cfg.windows.spot_days, cfg.windows.cost_index_days);
    let products = cfg.catalog.to_products()?;

    let provider = SmmProvider::with_options(cfg.provider.to_client_options())
        .context("failed to build SMM client")?;
    let sink = HtmlPageSink::new(&cfg.page.path, products.clone())
        .require_block(cfg.page.require_block)
        .dry_run(cli.dry_run);

    let report = run_sync(&provider, &sink, &products, &windows).await?;

    let outcome = report.output;
    if cli.dry_run {
        println!("Dry run: {} not written", sink.path().display());
    } else {
        println!("Updated {}", sink.path().display());
    }
    if !outcome.block_replaced {
        println!("No smmData block found; only the update date was refreshed");
    }
    println!("Latest prices ({}):", report.update_date);
    for line in summary_lines(&products, &report.data) {
        println!("  {line}");
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
