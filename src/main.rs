//! # ticker_news
//!
//! Command-line entry point: fetch recent news for one ticker, clean it, and
//! print the cleaned table (optionally also writing it as JSON).
//!
//! ## Usage
//!
//! ```sh
//! ticker_news BBCA -n 3 -m 5
//! ```

use chrono::Local;
use clap::Parser;
use std::error::Error;
use ticker_news::cli::Cli;
use ticker_news::config::Settings;
use ticker_news::outputs::{json, table};
use ticker_news::utils::ensure_writable_dir;
use ticker_news::{GoogleNews, HttpArticleExtractor, clean_fetched_articles, fetch_daily_stock_articles};
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("ticker_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = args.merge_into(Settings::load(args.config.as_deref())?);
    let options = settings.fetch_options();
    info!(
        ticker = %args.ticker,
        n_days = options.n_days,
        max_articles = options.max_articles,
        delay = ?options.pause.delay,
        "Resolved fetch options"
    );

    let search = GoogleNews::new(&settings.user_agent, settings.request_timeout())?;
    let extractor = HttpArticleExtractor::new(&settings.user_agent, settings.request_timeout())?;

    // Early check: ensure JSON output dir is writable
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Fetch ----
    let raw = fetch_daily_stock_articles(&search, &extractor, &args.ticker, &options).await?;

    // ---- Clean ----
    let cleaned = clean_fetched_articles(&raw)?;
    info!(
        fetched = raw.len(),
        cleaned = cleaned.len(),
        failed = raw.len() - cleaned.len(),
        "Cleaned article table"
    );

    // ---- Output ----
    print!("{}", table::render(&cleaned));

    if let Some(dir) = &args.json_output_dir {
        let today = Local::now().date_naive();
        if let Err(e) = json::write_table(&cleaned, dir, &args.ticker, today).await {
            error!(path = %dir, error = %e, "Failed to write JSON table");
            return Err(e);
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
