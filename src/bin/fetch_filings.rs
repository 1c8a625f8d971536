// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Download EDINET filing PDFs for a date range

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Parser;
use dotenv::dotenv;
use tracing::{info, warn};

use finax_retrieval::edinet::{date_range, EdinetClient};

#[derive(Debug, Parser)]
#[command(name = "fetch-filings", about = "Download EDINET filings for a date range")]
struct Args {
    /// First publication date to fetch (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Last publication date to fetch (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,

    /// Restrict to one filer's EDINET code (e.g. E33735)
    #[arg(long)]
    edinet_code: Option<String>,

    /// Directory to write filings into
    #[arg(long, default_value = "documents")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    if args.end < args.start {
        bail!("end date is before start date");
    }

    let client = EdinetClient::from_env();
    if !client.is_available() {
        bail!("EDINET_SUBSCRIPTION_KEY not set in environment variables");
    }

    let mut total = 0usize;
    for date in date_range(args.start, args.end) {
        let filings = match client
            .list_filings(date, args.edinet_code.as_deref())
            .await
        {
            Ok(filings) => filings,
            Err(e) => {
                warn!(%date, error = %e, "Skipping date");
                continue;
            }
        };

        if filings.is_empty() {
            continue;
        }

        info!(%date, count = filings.len(), "Downloading filings");
        let written = client
            .download_filings(&filings, date, &args.out_dir)
            .await?;
        total += written.len();
    }

    info!(total, "Download complete");
    Ok(())
}
