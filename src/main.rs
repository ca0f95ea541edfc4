//! Entry point: analyze a batch of articles once, or serve the analyzer over
//! HTTP.
//!
//! ```sh
//! jaundice_rate analyze https://inosmi.ru/politic/20211105/250848301.html
//! jaundice_rate serve --addr 127.0.0.1:8080
//! ```

use clap::Parser;
use jaundice_rate::analyzer::{ArticleAnalyzer, TEST_ARTICLES};
use jaundice_rate::cli::{Cli, Command};
use jaundice_rate::server::{self, AppState};
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("jaundice_rate starting up");

    let args = Cli::parse();
    let config = args.analyzer_config()?;
    debug!(?config, "Parsed CLI arguments");

    let analyzer = ArticleAnalyzer::from_config(&config).await?;

    match args.command {
        Command::Analyze { urls } => {
            let results = if urls.is_empty() {
                info!(count = TEST_ARTICLES.len(), "No URLs given; using test articles");
                analyzer.analyze(TEST_ARTICLES).await
            } else {
                analyzer.analyze(&urls).await
            };
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Serve { addr, max_urls } => {
            let state = AppState::new(Arc::new(analyzer)).with_max_urls(max_urls);
            server::run_server(state, addr).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}
