use chrono::NaiveDate;
use clap::Parser;

/// Fetch the price history of a single SMM product and print it as JSON.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// SMM product identifier (e.g. "202512220022")
    #[arg(long)]
    pub product_id: String,

    /// First day of the window, YYYY-MM-DD
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day of the window, YYYY-MM-DD
    #[arg(short, long)]
    pub end: NaiveDate,

    /// Override the provider base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Skip TLS certificate validation for the provider
    #[arg(long)]
    pub insecure: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dates_and_flags() {
        let cli = Cli::try_parse_from([
            "spot-price-ingestor",
            "--product-id",
            "202303220001",
            "--start",
            "2025-01-01",
            "-e",
            "2025-02-15",
            "--insecure",
        ])
        .unwrap();
        assert_eq!(cli.start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(cli.end, NaiveDate::from_ymd_opt(2025, 2, 15).unwrap());
        assert!(cli.insecure);
        assert_eq!(cli.timeout_secs, 30);
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn rejects_bad_date() {
        assert!(
            Cli::try_parse_from([
                "spot-price-ingestor",
                "--product-id",
                "1",
                "--start",
                "2025-13-01",
                "--end",
                "2025-01-01",
            ])
            .is_err()
        );
    }
}
