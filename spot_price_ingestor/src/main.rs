use std::{error::Error, time::Duration};

use clap::Parser;
use spot_price_ingestor::{
    cli::commands::Cli,
    models::request_params::HistoryRequestParams,
    providers::{
        DataProvider,
        smm_rest::{SmmClientOptions, SmmProvider},
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut options = SmmClientOptions {
        timeout: Duration::from_secs(cli.timeout_secs),
        accept_invalid_certs: cli.insecure,
        ..Default::default()
    };
    if let Some(base_url) = cli.base_url {
        options.base_url = base_url;
    }

    let params = HistoryRequestParams::new(cli.product_id, cli.start, cli.end)?;
    let provider = SmmProvider::with_options(options)?;

    // Unlike the page refresh, a one-off fetch reports provider errors.
    let series = provider.fetch_history(&params).await?;

    // Summary goes to stderr so stdout stays machine-readable.
    eprintln!("SUMMARY: {} points for {}", series.len(), params.product_id);
    println!("{}", serde_json::to_string_pretty(&series)?);
    Ok(())
}
